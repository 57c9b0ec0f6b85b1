pub mod models;
mod progress;

pub use models::{MatchedResult, PlayerResult, Tournament};
pub use progress::FetchProgress;
