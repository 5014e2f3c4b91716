pub mod clock;
pub mod failure;
pub mod featured;
pub mod normalizer;
pub mod parser;
pub mod preprocess;
pub mod trending;

pub use clock::{Clock, ManualClock, SystemClock};
pub use failure::FailureKind;
pub use normalizer::{hydrate, normalize, to_flat};
pub use parser::parse;
pub use preprocess::normalize_term;
pub use trending::TrendingTracker;
