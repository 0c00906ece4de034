//! Insight pipeline — records, persistence, lifecycle, aggregates

pub mod service;
pub mod stats;
pub mod store;
pub mod types;

pub use service::{apply, InsightService, Intent, Touched, TriageState};
pub use store::{Collection, FileStore, MemoryStore, RecordStore};
pub use types::{Insight, Sentiment, Topic};
