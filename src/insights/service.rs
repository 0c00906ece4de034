//! Insight lifecycle service
//!
//! Owns the rules for moving an insight through the pipeline: staged on
//! creation, promoted to processed once labels are confirmed, or deleted
//! outright. Transitions are pure functions over a full `TriageState`
//! snapshot; the service applies a transition and then persists exactly the
//! collections it touched, so callers observe either the prior state or the
//! fully-applied one.

use crate::error::{Error, Result};
use crate::insights::store::{Collection, RecordStore};
use crate::insights::types::{Insight, Sentiment, Topic};
use std::sync::Arc;

/// Full snapshot of both collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageState {
    /// Insights awaiting labeling, newest first
    pub staged: Vec<Insight>,
    /// Insights with finalized labels, newest first
    pub processed: Vec<Insight>,
}

impl TriageState {
    /// Whether an id exists in either collection
    pub fn contains_id(&self, id: &str) -> bool {
        self.staged.iter().any(|i| i.id == id) || self.processed.iter().any(|i| i.id == id)
    }
}

/// A requested state transition
#[derive(Debug, Clone)]
pub enum Intent {
    /// Prepend a freshly created insight to the staged collection
    Stage(Insight),
    /// Move a staged insight to processed with final labels
    Promote {
        id: String,
        sentiment: Sentiment,
        topic: Topic,
    },
    /// Remove a staged insight
    DeleteStaged(String),
    /// Empty the staged collection
    ClearStaged,
    /// Empty the processed collection
    ClearProcessed,
}

/// Which collections a transition modified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub staged: bool,
    pub processed: bool,
}

/// Apply an intent to a state snapshot, returning the next state and which
/// collections changed.
///
/// Promote and delete of an unknown id are no-ops, not errors: the desired
/// end state already holds. Staging an insight whose id exists anywhere is
/// rejected so id uniqueness across both collections can never break
/// silently.
pub fn apply(state: TriageState, intent: Intent) -> Result<(TriageState, Touched)> {
    let mut next = state;
    match intent {
        Intent::Stage(insight) => {
            if next.contains_id(&insight.id) {
                return Err(Error::Conflict(format!(
                    "insight id already exists: {}",
                    insight.id
                )));
            }
            next.staged.insert(0, insight);
            Ok((next, Touched { staged: true, processed: false }))
        }
        Intent::Promote { id, sentiment, topic } => {
            let Some(pos) = next.staged.iter().position(|i| i.id == id) else {
                return Ok((next, Touched::default()));
            };
            let mut insight = next.staged.remove(pos);
            insight.sentiment = Some(sentiment);
            insight.topic = Some(topic);
            next.processed.insert(0, insight);
            Ok((next, Touched { staged: true, processed: true }))
        }
        Intent::DeleteStaged(id) => {
            let Some(pos) = next.staged.iter().position(|i| i.id == id) else {
                return Ok((next, Touched::default()));
            };
            next.staged.remove(pos);
            Ok((next, Touched { staged: true, processed: false }))
        }
        Intent::ClearStaged => {
            next.staged.clear();
            Ok((next, Touched { staged: true, processed: false }))
        }
        Intent::ClearProcessed => {
            next.processed.clear();
            Ok((next, Touched { staged: false, processed: true }))
        }
    }
}

/// Lifecycle service over an injected record store
pub struct InsightService {
    store: Arc<dyn RecordStore>,
}

impl InsightService {
    /// Create a service backed by the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// List staged insights, newest first
    pub async fn list_staged(&self) -> Vec<Insight> {
        self.store.read(Collection::Staged).await
    }

    /// List processed insights, newest first
    pub async fn list_processed(&self) -> Vec<Insight> {
        self.store.read(Collection::Processed).await
    }

    /// Create a new staged insight and persist it.
    ///
    /// Any strings are tolerated, including empty ones; input hygiene is
    /// the caller's concern. An id collision with an existing record in
    /// either collection is rejected and leaves both collections unchanged.
    pub async fn add_insight(&self, source_url: &str, raw_content: &str) -> Result<Insight> {
        let insight = Insight::new(source_url, raw_content);
        let state = self.load_state().await;
        let (next, touched) = apply(state, Intent::Stage(insight.clone()))?;
        self.persist(&next, touched).await?;
        tracing::debug!(id = %insight.id, "staged insight");
        Ok(insight)
    }

    /// Promote a staged insight to processed with its final labels.
    ///
    /// Silent no-op when the id is not staged: the record was already
    /// processed or deleted, which is the end state the caller wanted.
    pub async fn process_insight(&self, id: &str, sentiment: Sentiment, topic: Topic) -> Result<()> {
        let state = self.load_state().await;
        let (next, touched) = apply(
            state,
            Intent::Promote {
                id: id.to_string(),
                sentiment,
                topic,
            },
        )?;
        if touched == Touched::default() {
            tracing::debug!(id, "process skipped, id not staged");
            return Ok(());
        }
        self.persist(&next, touched).await?;
        tracing::debug!(id, %sentiment, %topic, "processed insight");
        Ok(())
    }

    /// Delete a staged insight. Silent no-op when the id is not staged.
    /// Never touches the processed collection.
    pub async fn delete_staged(&self, id: &str) -> Result<()> {
        let state = self.load_state().await;
        let (next, touched) = apply(state, Intent::DeleteStaged(id.to_string()))?;
        if touched == Touched::default() {
            return Ok(());
        }
        self.persist(&next, touched).await
    }

    /// Empty the staged collection. Processed is untouched.
    pub async fn clear_staged(&self) -> Result<()> {
        let state = self.load_state().await;
        let (next, touched) = apply(state, Intent::ClearStaged)?;
        self.persist(&next, touched).await
    }

    /// Empty the processed collection. Staged is untouched.
    pub async fn clear_processed(&self) -> Result<()> {
        let state = self.load_state().await;
        let (next, touched) = apply(state, Intent::ClearProcessed)?;
        self.persist(&next, touched).await
    }

    async fn load_state(&self) -> TriageState {
        TriageState {
            staged: self.store.read(Collection::Staged).await,
            processed: self.store.read(Collection::Processed).await,
        }
    }

    /// Persist the collections a transition touched. Processed is written
    /// before staged: if the second write fails, a promoted record can
    /// appear in both collections but is never lost.
    async fn persist(&self, state: &TriageState, touched: Touched) -> Result<()> {
        if touched.processed {
            self.store
                .write(Collection::Processed, &state.processed)
                .await?;
        }
        if touched.staged {
            self.store.write(Collection::Staged, &state.staged).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::store::MemoryStore;

    fn service() -> InsightService {
        InsightService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_add_insight_prepends_to_staged() {
        let svc = service();

        let first = svc.add_insight("http://x.com", "Great product!").await.unwrap();
        let second = svc.add_insight("http://y.com", "Meh").await.unwrap();

        let staged = svc.list_staged().await;
        assert_eq!(staged.len(), 2);
        assert_eq!(staged[0].id, second.id);
        assert_eq!(staged[1].id, first.id);
        assert!(staged.iter().all(|i| i.sentiment.is_none() && i.topic.is_none()));
    }

    #[tokio::test]
    async fn test_add_insight_ids_are_distinct() {
        let svc = service();
        let mut ids = Vec::new();
        for n in 0..20 {
            let insight = svc
                .add_insight("http://x.com", &format!("comment {}", n))
                .await
                .unwrap();
            ids.push(insight.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_process_insight_moves_record_atomically() {
        let svc = service();
        let insight = svc.add_insight("http://x.com", "Great product!").await.unwrap();

        svc.process_insight(&insight.id, Sentiment::Positive, Topic::ProductQuality)
            .await
            .unwrap();

        let staged = svc.list_staged().await;
        let processed = svc.list_processed().await;
        assert!(staged.is_empty());
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].id, insight.id);
        assert_eq!(processed[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(processed[0].topic, Some(Topic::ProductQuality));
        // Original fields survive the move untouched
        assert_eq!(processed[0].source_url, insight.source_url);
        assert_eq!(processed[0].raw_content, insight.raw_content);
        assert_eq!(processed[0].timestamp, insight.timestamp);
    }

    #[tokio::test]
    async fn test_process_insight_prepends_to_processed() {
        let svc = service();
        let a = svc.add_insight("http://a.com", "first").await.unwrap();
        let b = svc.add_insight("http://b.com", "second").await.unwrap();

        svc.process_insight(&a.id, Sentiment::Neutral, Topic::General)
            .await
            .unwrap();
        svc.process_insight(&b.id, Sentiment::Negative, Topic::Shipping)
            .await
            .unwrap();

        let processed = svc.list_processed().await;
        assert_eq!(processed[0].id, b.id);
        assert_eq!(processed[1].id, a.id);
    }

    #[tokio::test]
    async fn test_process_unknown_id_is_a_noop() {
        let svc = service();
        let insight = svc.add_insight("http://x.com", "hello").await.unwrap();
        let staged_before = svc.list_staged().await;

        svc.process_insight("nonexistent-id", Sentiment::Positive, Topic::General)
            .await
            .unwrap();

        assert_eq!(svc.list_staged().await, staged_before);
        assert!(svc.list_processed().await.is_empty());
        assert_eq!(staged_before[0].id, insight.id);
    }

    #[tokio::test]
    async fn test_delete_staged_removes_only_matching_record() {
        let svc = service();
        let a = svc.add_insight("http://a.com", "keep").await.unwrap();
        let b = svc.add_insight("http://b.com", "drop").await.unwrap();

        svc.delete_staged(&b.id).await.unwrap();

        let staged = svc.list_staged().await;
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].id, a.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_a_noop() {
        let svc = service();
        svc.add_insight("http://a.com", "hello").await.unwrap();
        let before = svc.list_staged().await;

        svc.delete_staged("nonexistent-id").await.unwrap();

        assert_eq!(svc.list_staged().await, before);
    }

    #[tokio::test]
    async fn test_clear_staged_leaves_processed_untouched() {
        let svc = service();
        let a = svc.add_insight("http://a.com", "done").await.unwrap();
        svc.process_insight(&a.id, Sentiment::Positive, Topic::Price)
            .await
            .unwrap();
        svc.add_insight("http://b.com", "pending").await.unwrap();

        svc.clear_staged().await.unwrap();

        assert!(svc.list_staged().await.is_empty());
        assert_eq!(svc.list_processed().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_processed_leaves_staged_untouched() {
        let svc = service();
        let a = svc.add_insight("http://a.com", "done").await.unwrap();
        svc.process_insight(&a.id, Sentiment::Positive, Topic::Price)
            .await
            .unwrap();
        let b = svc.add_insight("http://b.com", "pending").await.unwrap();

        svc.clear_processed().await.unwrap();

        assert!(svc.list_processed().await.is_empty());
        let staged = svc.list_staged().await;
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].id, b.id);
    }

    #[tokio::test]
    async fn test_ids_stay_disjoint_across_collections() {
        let svc = service();
        let a = svc.add_insight("http://a.com", "one").await.unwrap();
        let b = svc.add_insight("http://b.com", "two").await.unwrap();
        svc.process_insight(&a.id, Sentiment::Neutral, Topic::General)
            .await
            .unwrap();

        let staged = svc.list_staged().await;
        let processed = svc.list_processed().await;
        for s in &staged {
            assert!(!processed.iter().any(|p| p.id == s.id));
        }
        assert_eq!(staged.len() + processed.len(), 2);
        assert_eq!(staged[0].id, b.id);
    }

    #[test]
    fn test_stage_rejects_duplicate_id() {
        let insight = Insight::new("http://x.com", "hello");
        let state = TriageState {
            staged: vec![insight.clone()],
            processed: vec![],
        };

        let result = apply(state.clone(), Intent::Stage(insight));
        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[test]
    fn test_stage_rejects_id_already_processed() {
        let mut done = Insight::new("http://x.com", "hello");
        done.sentiment = Some(Sentiment::Positive);
        done.topic = Some(Topic::General);
        let dup = Insight {
            sentiment: None,
            topic: None,
            ..done.clone()
        };
        let state = TriageState {
            staged: vec![],
            processed: vec![done],
        };

        assert!(matches!(
            apply(state, Intent::Stage(dup)),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn test_promote_touches_both_collections() {
        let insight = Insight::new("http://x.com", "hello");
        let state = TriageState {
            staged: vec![insight.clone()],
            processed: vec![],
        };

        let (next, touched) = apply(
            state,
            Intent::Promote {
                id: insight.id.clone(),
                sentiment: Sentiment::Negative,
                topic: Topic::CustomerService,
            },
        )
        .unwrap();

        assert!(touched.staged && touched.processed);
        assert!(next.staged.is_empty());
        assert!(next.processed[0].is_labeled());
    }

    #[test]
    fn test_noop_intents_report_nothing_touched() {
        let state = TriageState::default();

        let (next, touched) =
            apply(state.clone(), Intent::DeleteStaged("missing".into())).unwrap();
        assert_eq!(next, state);
        assert_eq!(touched, Touched::default());

        let (next, touched) = apply(
            state.clone(),
            Intent::Promote {
                id: "missing".into(),
                sentiment: Sentiment::Neutral,
                topic: Topic::General,
            },
        )
        .unwrap();
        assert_eq!(next, state);
        assert_eq!(touched, Touched::default());
    }
}
