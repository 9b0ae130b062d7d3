//! Process-lifetime cache with single-flight request de-duplication.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::trace;

use crate::error::AppError;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, Arc<AppError>>>>;

enum Slot<V> {
    Ready(V),
    Pending(SharedFetch<V>),
}

/// Append-only map from key to value where at most one fetch per key is ever
/// in flight.
///
/// Callers arriving while a fetch is pending await that same fetch and observe
/// the same value or the same failure. Failures are not stored, so the next
/// caller after a failure starts a fresh fetch.
pub struct InFlightCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> InFlightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>> + Send + 'static,
    {
        let pending = {
            let mut slots = self.slots.lock().await;
            match slots.get(&key) {
                Some(Slot::Ready(value)) => return Ok(value.clone()),
                Some(Slot::Pending(pending)) => {
                    trace!("⏳ joining in-flight request");
                    pending.clone()
                }
                None => {
                    let pending = fetch().map(|res| res.map_err(Arc::new)).boxed().shared();
                    slots.insert(key.clone(), Slot::Pending(pending.clone()));
                    pending
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slots = self.slots.lock().await;
        match &outcome {
            Ok(value) => {
                slots.insert(key, Slot::Ready(value.clone()));
            }
            Err(_) => {
                // A newer fetch may already own the slot.
                let owns_slot = matches!(
                    slots.get(&key),
                    Some(Slot::Pending(current)) if current.ptr_eq(&pending)
                );
                if owns_slot {
                    slots.remove(&key);
                }
            }
        }

        outcome.map_err(AppError::Shared)
    }

    /// Returns the cached value without fetching.
    pub async fn peek(&self, key: &K) -> Option<V> {
        match self.slots.lock().await.get(key) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

impl<K, V> Default for InFlightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
