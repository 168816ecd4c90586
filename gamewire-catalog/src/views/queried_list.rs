//! Keyed list view with client-side filtering
//!
//! Every result set passes through the view's predicate (which may look at
//! the key) and an optional cap before it is stored. Selection is tracked
//! separately and survives reloads.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::loader::{LoadOutcome, Loader, ViewSnapshot};
use crate::services::RawgResult;

/// Keep items matching `predicate` in upstream order, then cap at `max`
pub fn apply_filter<T>(items: Vec<T>, predicate: impl Fn(&T) -> bool, max: Option<usize>) -> Vec<T> {
    let matched = items.into_iter().filter(|item| predicate(item));
    match max {
        Some(max) => matched.take(max).collect(),
        None => matched.collect(),
    }
}

pub struct QueriedList<K, T> {
    loader: Loader<K, Vec<T>>,
    selection: Arc<Mutex<Option<u64>>>,
}

impl<K, T> Clone for QueriedList<K, T> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            selection: Arc::clone(&self.selection),
        }
    }
}

impl<K, T> QueriedList<K, T>
where
    K: Clone + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new<Q, Fut, P>(
        name: &'static str,
        failure_message: impl Into<String>,
        query: Q,
        predicate: P,
        max: Option<usize>,
    ) -> Self
    where
        Q: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RawgResult<Vec<T>>> + Send + 'static,
        P: Fn(&K, &T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let loader = Loader::new(name, failure_message, move |key: K| {
            let filter_key = key.clone();
            let predicate = Arc::clone(&predicate);
            let fetch = query(key);
            async move {
                fetch
                    .await
                    .map(|items| apply_filter(items, |item| (*predicate)(&filter_key, item), max))
            }
        });

        Self {
            loader,
            selection: Arc::new(Mutex::new(None)),
        }
    }

    /// Keys matching `predicate` leave the list idle and empty
    pub fn skip_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
    {
        self.loader = self.loader.skip_when(predicate);
        self
    }

    pub fn name(&self) -> &'static str {
        self.loader.name()
    }

    pub async fn load(&self, key: K) -> LoadOutcome<Vec<T>> {
        self.loader.load(key).await
    }

    pub async fn settle(&self, key: K) -> ViewSnapshot<Vec<T>> {
        self.loader.settle(key).await
    }

    pub async fn snapshot(&self) -> ViewSnapshot<Vec<T>> {
        self.loader.snapshot().await
    }

    /// Current items; empty unless the last load succeeded
    pub async fn items(&self) -> Vec<T> {
        self.loader.snapshot().await.value.unwrap_or_default()
    }

    pub async fn select(&self, id: u64) {
        *self.selection.lock().await = Some(id);
    }

    pub async fn clear_selection(&self) {
        *self.selection.lock().await = None;
    }

    pub async fn selected(&self) -> Option<u64> {
        *self.selection.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RawgError;
    use crate::views::Phase;

    fn numbers() -> QueriedList<u32, u32> {
        QueriedList::new(
            "numbers",
            "Failed to fetch numbers",
            |upper: u32| async move {
                if upper == 0 {
                    return Err(RawgError::NetworkError("down".to_string()));
                }
                Ok((1..=upper).collect::<Vec<u32>>())
            },
            |_, n: &u32| n % 2 == 0,
            Some(3),
        )
    }

    #[test]
    fn test_apply_filter_keeps_order() {
        let kept = apply_filter(vec![5, 2, 8, 3, 6], |n| n % 2 == 0, None);
        assert_eq!(kept, vec![2, 8, 6]);
    }

    #[test]
    fn test_apply_filter_truncates_after_filtering() {
        let kept = apply_filter((1..=50).collect::<Vec<u32>>(), |n| n % 2 == 0, Some(20));
        assert_eq!(kept.len(), 20);
        assert_eq!(kept[19], 40);
    }

    #[test]
    fn test_apply_filter_is_idempotent() {
        let once = apply_filter(vec![1, 2, 3, 4, 5, 6], |n| *n > 2, Some(3));
        let twice = apply_filter(once.clone(), |n| *n > 2, Some(3));
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_load_filters_and_caps() {
        let list = numbers();
        list.load(20).await;

        assert_eq!(list.items().await, vec![2, 4, 6]);
        assert_eq!(list.snapshot().await.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_failure_empties_items() {
        let list = numbers();
        list.load(10).await;
        list.load(0).await;

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Failed);
        assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch numbers"));
        assert!(list.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_predicate_sees_key() {
        let list: QueriedList<u32, u32> = QueriedList::new(
            "multiples",
            "Failed",
            |_: u32| async move { Ok((1..=12).collect::<Vec<u32>>()) },
            |factor: &u32, n: &u32| n % factor == 0,
            None,
        );

        list.load(4).await;
        assert_eq!(list.items().await, vec![4, 8, 12]);
    }

    #[tokio::test]
    async fn test_selection_survives_reload() {
        let list = numbers();
        assert_eq!(list.selected().await, None);

        list.select(42).await;
        list.load(6).await;
        assert_eq!(list.selected().await, Some(42));

        list.clear_selection().await;
        assert_eq!(list.selected().await, None);
    }
}
