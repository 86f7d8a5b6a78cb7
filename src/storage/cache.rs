//! Model catalog cache
//!
//! The cache sits in `~/.specify/models_cache.json` and holds the last
//! catalog fetched from the models API. Freshness is based on the file's
//! modification time with a one hour TTL.
//!
//! Every operation returns `Result<_, CacheError>` and callers always fall
//! back to a miss on any error variant; the cache is never load-bearing.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TTL after which a cached catalog counts as stale
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Cache not found at {0}")]
    NotFound(PathBuf),

    #[error("Cache is stale")]
    Stale,

    #[error("Invalid cache contents: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk cache record
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    models: BTreeMap<String, String>,
    cached_at: String,
    source: String,
}

/// Flat JSON cache of the models catalog
pub struct ModelsCache {
    path: PathBuf,
}

impl ModelsCache {
    /// Cache at the default `~/.specify/models_cache.json` location
    pub fn open_default() -> Result<Self, CacheError> {
        let base = BaseDirs::new().ok_or(CacheError::NoHomeDir)?;
        Ok(Self {
            path: base.home_dir().join(".specify").join("models_cache.json"),
        })
    }

    /// Cache at an explicit path (used by tests)
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Age of the cache file, if it exists
    pub fn age(&self) -> Result<Duration, CacheError> {
        let metadata = fs::metadata(&self.path)
            .map_err(|_| CacheError::NotFound(self.path.clone()))?;
        let modified = metadata.modified()?;
        Ok(SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO))
    }

    /// True when the cache exists and is within the TTL
    pub fn is_fresh(&self) -> bool {
        matches!(self.age(), Ok(age) if age < CACHE_TTL)
    }

    /// Reads the cached catalog, failing on absence, staleness or corruption
    pub fn read(&self) -> Result<(BTreeMap<String, String>, String), CacheError> {
        if self.age()? >= CACHE_TTL {
            return Err(CacheError::Stale);
        }
        let content = fs::read_to_string(&self.path)?;
        let record: CacheRecord =
            serde_json::from_str(&content).map_err(|e| CacheError::Invalid(e.to_string()))?;
        if record.models.is_empty() {
            return Err(CacheError::Invalid("empty model list".to_string()));
        }
        Ok((record.models, record.cached_at))
    }

    /// Writes the catalog with a fresh timestamp
    pub fn write(
        &self,
        models: &BTreeMap<String, String>,
        source: &str,
    ) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = CacheRecord {
            models: models.clone(),
            cached_at: chrono::Utc::now().to_rfc3339(),
            source: source.to_string(),
        };
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| CacheError::Invalid(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Removes the cache file; absence is not an error
    pub fn clear(&self) -> Result<bool, CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
