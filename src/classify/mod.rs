//! Classification gateway — provider adapter and wire types

pub mod gateway;
pub mod types;

pub use gateway::{parse_suggestion, Classifier, GeminiClassifier};
pub use types::Suggestion;
