//! InsightDeck - Local-first triage pipeline for free-text customer insights
//!
//! InsightDeck stages raw feedback snippets with their source URL, asks an
//! external text-classification provider for a (sentiment, topic)
//! suggestion on demand, and promotes confirmed records into a processed
//! collection that feeds aggregate counts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  Presentation (CLI)                  │
//! └────────────┬──────────────────────────┬──────────────┘
//!              │                          │
//! ┌────────────▼─────────────┐ ┌──────────▼──────────────┐
//! │  Insight Lifecycle       │ │  Classification Gateway │
//! │  - identity assignment   │ │  - Gemini adapter       │
//! │  - staged → processed    │ │  - label re-validation  │
//! │  - aggregate counts      │ │  - no local state       │
//! └────────────┬─────────────┘ └──────────┬──────────────┘
//!              │                          │ HTTPS
//! ┌────────────▼─────────────┐ ┌──────────▼──────────────┐
//! │  Record Store            │ │  generateContent API    │
//! │  staged.json             │ └─────────────────────────┘
//! │  processed.json          │
//! └──────────────────────────┘
//! ```
//!
//! Two collections, one invariant set: an id lives in at most one of them,
//! staged records never carry labels, processed records always carry both.
//! The store is a trait so the lifecycle service runs identically against
//! JSON files or the in-memory test double. The classifier is a trait so
//! the remote provider can be swapped for a local double.

pub mod classify;
pub mod config;
pub mod error;
pub mod insights;

pub use classify::{Classifier, GeminiClassifier, Suggestion};
pub use config::{ClassifierConfig, DeckConfig, StorageConfig};
pub use error::{Error, Result};
pub use insights::{
    Collection, FileStore, Insight, InsightService, MemoryStore, RecordStore, Sentiment, Topic,
};
