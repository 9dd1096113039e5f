use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::{operation::Operation, response::ClientResponse};

pub enum CacheRequest {
    Lookup(Operation, oneshot::Sender<Option<CacheEntry>>),
    Update(Operation, ClientResponse),
    Clear,
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub response: ClientResponse,
}

/// In-memory query cache. A background task owns the map; handles talk to it
/// over a channel so the client can be cloned freely across tasks.
#[derive(Debug, Clone)]
pub struct ClientCache {
    sender: mpsc::Sender<CacheRequest>,
}

pub struct CacheInner {
    max_age: Duration,
    entries: HashMap<Operation, CacheEntry>,
}

impl ClientCache {
    const CLEANUP_INTERVAL: u64 = 100;
    const CHANNEL_SIZE: usize = 100;

    /// Spawns the cache task, so this has to be called inside a tokio runtime.
    pub fn new(max_age: Duration) -> Self {
        let (tx, mut rx) = mpsc::channel::<CacheRequest>(Self::CHANNEL_SIZE);
        tokio::spawn(async move {
            let mut inner = CacheInner::new(max_age);
            let mut counter = 0;
            while let Some(request) = rx.recv().await {
                inner.handle_request(request);
                counter += 1;
                if counter == Self::CLEANUP_INTERVAL {
                    info!("Cleaning up query cache");
                    counter = 0;
                    inner.cleanup(Utc::now());
                }
            }
            debug!("Query cache closed");
        });
        Self { sender: tx }
    }

    pub async fn lookup(&self, operation: Operation) -> Option<CacheEntry> {
        let (tx, rx) = oneshot::channel();
        if self
            .sender
            .send(CacheRequest::Lookup(operation, tx))
            .await
            .is_err()
        {
            debug!("Query cache unavailable");
            return None;
        }
        rx.await.ok().flatten()
    }

    pub async fn update(&self, operation: Operation, response: ClientResponse) {
        self.send(CacheRequest::Update(operation, response)).await;
    }

    /// Drop every cached response, e.g. after a write made them stale.
    pub async fn clear(&self) {
        self.send(CacheRequest::Clear).await;
    }

    async fn send(&self, request: CacheRequest) {
        if self.sender.send(request).await.is_err() {
            debug!("Query cache unavailable");
        }
    }
}

impl Default for ClientCache {
    fn default() -> Self {
        Self::new(CacheInner::default_max_age())
    }
}

impl CacheInner {
    const DEFAULT_MAX_AGE_S: i64 = 60 * 60;

    fn default_max_age() -> Duration {
        Duration::seconds(Self::DEFAULT_MAX_AGE_S)
    }

    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            entries: HashMap::new(),
        }
    }

    fn cleanup(&mut self, now: DateTime<Utc>) {
        let max_age = self.max_age;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.fetched_at) <= max_age);
        debug!("Purged {} cache entries", before - self.entries.len());
    }

    pub fn handle_request(&mut self, request: CacheRequest) {
        match request {
            CacheRequest::Lookup(operation, tx) => {
                let _ = tx.send(self.lookup_at(&operation, Utc::now()));
            }
            CacheRequest::Update(operation, response) => {
                self.insert_at(operation, response, Utc::now());
            }
            CacheRequest::Clear => {
                debug!("Clearing {} cache entries", self.entries.len());
                self.entries.clear();
            }
        }
    }

    /// Entries older than `max_age` count as a miss and are dropped.
    fn lookup_at(&mut self, operation: &Operation, now: DateTime<Utc>) -> Option<CacheEntry> {
        let fresh = match self.entries.get(operation) {
            Some(entry) => now.signed_duration_since(entry.fetched_at) <= self.max_age,
            None => {
                debug!("Cache miss for {}", operation);
                return None;
            }
        };
        if fresh {
            debug!("Cache hit for {}", operation);
            self.entries.get(operation).cloned()
        } else {
            debug!("Cache entry for {} expired", operation);
            self.entries.remove(operation);
            None
        }
    }

    fn insert_at(&mut self, operation: Operation, response: ClientResponse, at: DateTime<Utc>) {
        if operation.is_mutation() {
            return;
        }
        debug!("Updating cache for {}", operation);
        self.entries.insert(
            operation,
            CacheEntry {
                fetched_at: at,
                response,
            },
        );
    }
}

impl Default for CacheInner {
    fn default() -> Self {
        Self::new(Self::default_max_age())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_types::post::PostInput;
    use std::sync::Arc;

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_cache() {
        let operation = Operation::Posts;
        let cache = ClientCache::default();
        assert!(cache.lookup(operation.clone()).await.is_none());

        let resp = ClientResponse::Posts(Arc::new(vec![]));
        cache.update(operation.clone(), resp).await;

        let entry = cache.lookup(operation.clone()).await.unwrap();
        assert!(matches!(entry.response, ClientResponse::Posts(_)));
        debug!("{:?}", entry);

        cache.clear().await;
        assert!(cache.lookup(operation).await.is_none());
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_pages_are_cached_separately() {
        let cache = ClientCache::default();
        let first = Operation::PostsPage {
            page: 1,
            page_size: 10,
        };
        let second = Operation::PostsPage {
            page: 2,
            page_size: 10,
        };
        cache
            .update(first.clone(), ClientResponse::Posts(Arc::new(vec![])))
            .await;
        assert!(cache.lookup(first).await.is_some());
        assert!(cache.lookup(second).await.is_none());

        cache.clear().await;
        assert!(cache
            .lookup(Operation::PostsPage {
                page: 1,
                page_size: 10
            })
            .await
            .is_none());
    }

    #[test]
    fn test_mutations_are_not_cached() {
        let mut inner = CacheInner::default();
        let operation = Operation::CreatePost(PostInput::new("a", "b"));
        inner.insert_at(
            operation.clone(),
            ClientResponse::Posts(Arc::new(vec![])),
            Utc::now(),
        );
        assert!(inner.entries.is_empty());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let mut inner = CacheInner::new(Duration::minutes(10));
        let now = Utc::now();
        let operation = Operation::Posts;
        let resp = ClientResponse::Posts(Arc::new(vec![]));

        inner.insert_at(operation.clone(), resp.clone(), now - Duration::minutes(5));
        assert!(inner.lookup_at(&operation, now).is_some());

        inner.insert_at(operation.clone(), resp, now - Duration::minutes(11));
        assert!(inner.lookup_at(&operation, now).is_none());
        assert!(inner.entries.is_empty());
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_zero_max_age_never_serves() {
        let cache = ClientCache::new(Duration::zero());
        let operation = Operation::Posts;
        cache
            .update(operation.clone(), ClientResponse::Posts(Arc::new(vec![])))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(cache.lookup(operation).await.is_none());
    }

    #[test]
    fn test_cleanup_purges_stale_entries() {
        let mut inner = CacheInner::new(Duration::minutes(10));
        let now = Utc::now();
        let fresh = Operation::Posts;
        let stale = Operation::PostsPage {
            page: 1,
            page_size: 10,
        };
        let resp = ClientResponse::Posts(Arc::new(vec![]));
        inner.insert_at(fresh.clone(), resp.clone(), now - Duration::minutes(5));
        inner.insert_at(stale.clone(), resp, now - Duration::minutes(15));

        inner.cleanup(now);
        assert!(inner.entries.contains_key(&fresh));
        assert!(!inner.entries.contains_key(&stale));
    }
}
