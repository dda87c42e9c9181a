use cricket_api::client::ApiResult;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// In-memory copy of the player list, refreshed once it is older than `ttl`.
#[derive(Debug, Clone)]
pub struct PlayerCache {
    inner: Arc<RwLock<Option<CachedPlayers>>>,
    ttl: Duration,
}

#[derive(Debug)]
struct CachedPlayers {
    fetched_at: Instant,
    players: Value,
}

impl PlayerCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub async fn get(&self) -> Option<Value> {
        let cache = self.inner.read().await;
        cache
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.players.clone())
    }

    pub async fn insert(&self, players: Value) {
        let mut cache = self.inner.write().await;
        *cache = Some(CachedPlayers {
            fetched_at: Instant::now(),
            players,
        });
    }

    /// Serve the cached list while fresh, otherwise fetch and store it.
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> ApiResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Value>>,
    {
        if let Some(players) = self.get().await {
            return Ok(players);
        }
        let players = fetch().await?;
        self.insert(players.clone()).await;
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_api::client::ApiError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fresh_entry_skips_fetch() {
        let cache = PlayerCache::new(Duration::from_secs(3600));
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        for _ in 0..3 {
            let players = cache
                .get_or_fetch(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!([{"id": 1}]))
                })
                .await
                .unwrap();
            assert_eq!(players, json!([{"id": 1}]));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let cache = PlayerCache::new(Duration::ZERO);
        cache.insert(json!(["stale"])).await;
        assert!(cache.get().await.is_none());

        let players = cache
            .get_or_fetch(|| async { Ok(json!(["fresh"])) })
            .await
            .unwrap();
        assert_eq!(players, json!(["fresh"]));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = PlayerCache::new(Duration::from_secs(3600));
        let err = cache
            .get_or_fetch(|| async { Err(ApiError::Other("feed down".into())) })
            .await;
        assert!(err.is_err());
        assert!(cache.get().await.is_none());
    }
}
