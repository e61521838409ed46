use crate::models::AnalysisReport;
use crate::services::storage::host_slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    cached_at: DateTime<Utc>,
    ttl_secs: u64,
    report: AnalysisReport,
}

/// Best-effort on-disk cache of finished reports. Every failure path is a
/// cache miss or a dropped write, never an error for the caller. Concurrent
/// processes racing on the same key overwrite each other harmlessly.
pub struct CacheService {
    cache_dir: PathBuf,
    default_ttl: Duration,
}

impl CacheService {
    pub fn new(cache_dir: PathBuf, default_ttl_secs: u64) -> Self {
        Self {
            cache_dir,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    pub async fn get(&self, key: &str) -> Option<AnalysisReport> {
        let path = self.entry_path(key);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(_) => {
                debug!("Cache miss for {}", key);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Discarding corrupt cache entry {}: {}", path.display(), err);
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(entry.cached_at);
        if age.num_seconds() < 0 || age.num_seconds() as u64 >= entry.ttl_secs {
            debug!("Cache expired for {}", key);
            return None;
        }

        debug!("Cache hit for {}", key);
        Some(entry.report)
    }

    pub async fn put(&self, key: &str, report: &AnalysisReport) {
        let entry = CacheEntry {
            cached_at: Utc::now(),
            ttl_secs: self.default_ttl.as_secs(),
            report: report.clone(),
        };

        let path = self.entry_path(key);
        if let Err(err) = self.write_entry(&path, &entry).await {
            warn!("Failed to write cache entry {}: {}", path.display(), err);
        } else {
            debug!("Cached report for {} (TTL: {:?})", key, self.default_ttl);
        }
    }

    async fn write_entry(&self, path: &Path, entry: &CacheEntry) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json).await
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Deterministic key: the host slug keeps entries inspectable, the hash
    /// folds in the filters so filtered and unfiltered runs never collide.
    pub fn cache_key(url: &Url, property: Option<&str>, selector: Option<&str>) -> String {
        let mut hasher = DefaultHasher::new();
        url.as_str().hash(&mut hasher);
        property.hash(&mut hasher);
        selector.hash(&mut hasher);
        format!("{}-{:016x}", host_slug(url), hasher.finish())
    }
}
