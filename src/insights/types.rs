//! Insight record and label types
//!
//! An `Insight` is a single piece of free-text feedback moving through the
//! triage pipeline. While staged it carries no labels; once processed both
//! labels are set. The wire strings for `Topic` keep the human-readable
//! spacing used by the persisted JSON and the classification provider
//! (`"Product Quality"`, `"Customer Service"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Sentiment label for a processed insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All sentiment labels in declaration order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Wire string for persistence and the provider boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment: {}", other)),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic label for a processed insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    Campaign,
    Shipping,
    Price,
    #[serde(rename = "Product Quality")]
    ProductQuality,
    #[serde(rename = "Customer Service")]
    CustomerService,
    General,
}

impl Topic {
    /// All topic labels in declaration order
    pub const ALL: [Topic; 6] = [
        Topic::Campaign,
        Topic::Shipping,
        Topic::Price,
        Topic::ProductQuality,
        Topic::CustomerService,
        Topic::General,
    ];

    /// Wire string for persistence and the provider boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Campaign => "Campaign",
            Topic::Shipping => "Shipping",
            Topic::Price => "Price",
            Topic::ProductQuality => "Product Quality",
            Topic::CustomerService => "Customer Service",
            Topic::General => "General",
        }
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Campaign" => Ok(Topic::Campaign),
            "Shipping" => Ok(Topic::Shipping),
            "Price" => Ok(Topic::Price),
            "Product Quality" => Ok(Topic::ProductQuality),
            "Customer Service" => Ok(Topic::CustomerService),
            "General" => Ok(Topic::General),
            other => Err(format!("unknown topic: {}", other)),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single insight record.
///
/// `id`, `timestamp`, `source_url` and `raw_content` are assigned at
/// creation and never change. The labels are `None` exactly while the
/// record sits in the staged collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable identifier, unique across both collections
    pub id: String,
    /// Creation time (RFC 3339 on the wire)
    pub timestamp: DateTime<Utc>,
    /// Where the content came from
    pub source_url: String,
    /// The feedback text itself
    pub raw_content: String,
    /// Sentiment label, present once processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Topic label, present once processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl Insight {
    /// Create a new staged insight with a derived id and a fresh timestamp
    pub fn new(source_url: impl Into<String>, raw_content: impl Into<String>) -> Self {
        let source_url = source_url.into();
        let raw_content = raw_content.into();
        let timestamp = Utc::now();
        let id = derive_id(&source_url, &raw_content, timestamp);

        Self {
            id,
            timestamp,
            source_url,
            raw_content,
            sentiment: None,
            topic: None,
        }
    }

    /// Whether both labels are set
    pub fn is_labeled(&self) -> bool {
        self.sentiment.is_some() && self.topic.is_some()
    }
}

/// Derive the insight id from its content and creation time.
///
/// Hex SHA-256 of `source_url + raw_content + creation millis`. Consumers
/// must treat the id as opaque; the derivation is not a contract.
fn derive_id(source_url: &str, raw_content: &str, timestamp: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_url.as_bytes());
    hasher.update(raw_content.as_bytes());
    hasher.update(timestamp.timestamp_millis().to_le_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
