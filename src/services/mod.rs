pub mod providers;
pub mod search;

pub use search::SearchFeature;
