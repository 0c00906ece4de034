//! Aggregate counts over the processed collection
//!
//! Feeds the summary view: how many processed insights fall under each
//! sentiment and each topic. Both distributions are exhaustive over their
//! enumeration (zero-filled) so a consumer can render them without checking
//! for missing labels.

use crate::insights::types::{Insight, Sentiment, Topic};

/// Count of processed insights per sentiment, in declaration order.
pub fn sentiment_distribution(insights: &[Insight]) -> Vec<(Sentiment, usize)> {
    Sentiment::ALL
        .iter()
        .map(|&s| {
            let count = insights.iter().filter(|i| i.sentiment == Some(s)).count();
            (s, count)
        })
        .collect()
}

/// Count of processed insights per topic, sorted by descending count.
/// Ties keep declaration order.
pub fn topic_distribution(insights: &[Insight]) -> Vec<(Topic, usize)> {
    let mut counts: Vec<(Topic, usize)> = Topic::ALL
        .iter()
        .map(|&t| {
            let count = insights.iter().filter(|i| i.topic == Some(t)).count();
            (t, count)
        })
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
