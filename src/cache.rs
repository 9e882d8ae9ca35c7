use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// How long a stored response is served before it is fetched again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key for a cached API response: the SHA-256 of the request URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseCacheKey {
    pub url_hash: String,
}

impl ResponseCacheKey {
    pub fn for_url(url: &str) -> Self {
        Self {
            url_hash: compute_url_hash(url),
        }
    }
}

/// Response bodies stored with cacache. Entries older than the TTL are
/// treated as missing and dropped from the index on the next lookup.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub async fn new() -> Result<Self> {
        Self::at(get_cache_directory()?).await
    }

    pub async fn at(cache_dir: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&cache_dir)
            .await
            .context("Failed to create cache directory")?;

        Ok(Self {
            cache_dir,
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(self, ttl: Duration) -> Self {
        Self { ttl, ..self }
    }

    pub async fn get(&self, key: &ResponseCacheKey) -> Option<Vec<u8>> {
        let metadata = cacache::metadata(&self.cache_dir, &key.url_hash)
            .await
            .ok()??;
        if self.is_expired(metadata.time) {
            tracing::debug!(key = %key.url_hash, "Dropping expired response cache entry");
            if let Err(error) = cacache::remove(&self.cache_dir, &key.url_hash).await {
                tracing::debug!(%error, "Failed to remove expired response cache entry");
            }
            return None;
        }

        cacache::read(&self.cache_dir, &key.url_hash).await.ok()
    }

    /// `written_at` is in milliseconds since the Unix epoch, as cacache records it.
    fn is_expired(&self, written_at: u128) -> bool {
        let now = u128::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        now.saturating_sub(written_at) >= self.ttl.as_millis()
    }

    pub async fn insert(&self, key: ResponseCacheKey, body: &[u8]) {
        if let Err(error) = cacache::write(&self.cache_dir, &key.url_hash, body).await {
            tracing::debug!(%error, "Failed to write response cache entry");
        }
    }
}

fn get_cache_directory() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to determine cache directory")?;
    Ok(cache_base.join(env!("CARGO_CRATE_NAME")))
}

pub fn compute_url_hash(url: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}
