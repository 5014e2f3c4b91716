pub mod free_dictionary;
pub mod gemini;

pub use free_dictionary::FreeDictionaryPronunciation;
pub use gemini::GeminiGenerator;
