pub mod events;
pub mod types;

pub use events::AppEvent;
pub use types::*;
