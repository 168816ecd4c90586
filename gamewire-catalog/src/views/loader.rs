//! Keyed fetch state machine
//!
//! `Idle → Loading → {Ready, Failed}`, re-entered at `Loading` every time a
//! new key arrives. Each load takes a generation number; a completion whose
//! generation is no longer current is dropped, so a slow response for an old
//! key never overwrites the state of a newer one.

use futures::future::BoxFuture;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::services::RawgResult;

/// Lifecycle phase of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Point-in-time copy of a view's state
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<V> {
    pub phase: Phase,
    pub value: Option<V>,
    /// User-facing failure message
    pub error: Option<String>,
    pub generation: u64,
}

impl<V> ViewSnapshot<V> {
    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }
}

/// What happened to one `load` call
#[derive(Debug, Clone)]
pub enum LoadOutcome<V> {
    /// The result was stored; snapshot taken right after
    Applied(ViewSnapshot<V>),
    /// A newer load started before this one finished; result dropped
    Superseded { generation: u64 },
    /// The key short-circuited; no request was issued
    Skipped(ViewSnapshot<V>),
}

impl<V> LoadOutcome<V> {
    /// Snapshot for applied or skipped loads
    pub fn snapshot(self) -> Option<ViewSnapshot<V>> {
        match self {
            LoadOutcome::Applied(snapshot) | LoadOutcome::Skipped(snapshot) => Some(snapshot),
            LoadOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, LoadOutcome::Superseded { .. })
    }
}

type FetchFn<K, V> = Arc<dyn Fn(K) -> BoxFuture<'static, RawgResult<V>> + Send + Sync>;
type SkipFn<K> = Arc<dyn Fn(&K) -> bool + Send + Sync>;

struct Slot<V> {
    phase: Phase,
    value: Option<V>,
    error: Option<String>,
    generation: u64,
}

impl<V: Clone> Slot<V> {
    fn snapshot(&self) -> ViewSnapshot<V> {
        ViewSnapshot {
            phase: self.phase,
            value: self.value.clone(),
            error: self.error.clone(),
            generation: self.generation,
        }
    }

    fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.value = None;
        self.error = None;
    }
}

/// Generation-guarded fetch/store cycle for one view
pub struct Loader<K, V> {
    name: &'static str,
    failure_message: String,
    fetch: FetchFn<K, V>,
    skip: Option<SkipFn<K>>,
    slot: Arc<Mutex<Slot<V>>>,
}

impl<K, V> Clone for Loader<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            failure_message: self.failure_message.clone(),
            fetch: Arc::clone(&self.fetch),
            skip: self.skip.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<K, V> Loader<K, V>
where
    K: Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create an idle loader
    ///
    /// `failure_message` is what the view shows when a fetch fails; the
    /// underlying error only goes to the log.
    pub fn new<F, Fut>(name: &'static str, failure_message: impl Into<String>, fetch: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RawgResult<V>> + Send + 'static,
    {
        Self {
            name,
            failure_message: failure_message.into(),
            fetch: Arc::new(move |key| Box::pin(fetch(key))),
            skip: None,
            slot: Arc::new(Mutex::new(Slot {
                phase: Phase::Idle,
                value: None,
                error: None,
                generation: 0,
            })),
        }
    }

    /// Keys matching `predicate` reset the view to idle without fetching
    pub fn skip_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(predicate));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn snapshot(&self) -> ViewSnapshot<V> {
        self.slot.lock().await.snapshot()
    }

    /// Run one fetch for `key` and store its result if still current
    pub async fn load(&self, key: K) -> LoadOutcome<V> {
        if let Some(skip) = &self.skip {
            if skip(&key) {
                let mut slot = self.slot.lock().await;
                slot.generation += 1;
                slot.clear();
                tracing::debug!(view = self.name, "Key short-circuited, view left idle");
                return LoadOutcome::Skipped(slot.snapshot());
            }
        }

        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.phase = Phase::Loading;
            slot.error = None;
            slot.generation
        };

        let result = (self.fetch)(key).await;
        self.complete(generation, result).await
    }

    /// Load `key` and return the view's state afterwards
    pub async fn settle(&self, key: K) -> ViewSnapshot<V> {
        match self.load(key).await.snapshot() {
            Some(snapshot) => snapshot,
            None => self.snapshot().await,
        }
    }

    async fn complete(&self, generation: u64, result: RawgResult<V>) -> LoadOutcome<V> {
        let mut slot = self.slot.lock().await;

        if slot.generation != generation {
            tracing::debug!(
                view = self.name,
                generation,
                current = slot.generation,
                "Discarding stale response"
            );
            return LoadOutcome::Superseded { generation };
        }

        match result {
            Ok(value) => {
                slot.phase = Phase::Ready;
                slot.value = Some(value);
            }
            Err(e) => {
                tracing::error!(view = self.name, error = %e, "View fetch failed");
                slot.phase = Phase::Failed;
                slot.value = None;
                slot.error = Some(self.failure_message.clone());
            }
        }

        LoadOutcome::Applied(slot.snapshot())
    }

    /// Drop the current state and orphan any in-flight fetch
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.clear();
    }
}
