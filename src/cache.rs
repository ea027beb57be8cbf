// src/cache.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::SystemTime,
};
use tracing::{debug, info};

use crate::data::{load_dataset, Transaction};

static GLOBAL: Lazy<DatasetCache> = Lazy::new(DatasetCache::new);

struct CachedDataset {
    modified: Option<SystemTime>,
    records: Arc<Vec<Transaction>>,
}

/// Read-once dataset store. A file is parsed again only when its
/// modification time differs from the one seen at the last load.
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, CachedDataset>>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide cache.
    pub fn global() -> &'static DatasetCache {
        &GLOBAL
    }

    /// Return the records of `path`, loading them on first use or after the file changed.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<Vec<Transaction>>> {
        let path = path.as_ref();
        let key = fs::canonicalize(path)
            .with_context(|| format!("resolving dataset path {}", path.display()))?;
        let modified = fs::metadata(&key)
            .with_context(|| format!("reading metadata of {}", key.display()))?
            .modified()
            .ok();

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = entries.get(&key) {
            if cached.modified == modified {
                debug!(path = %key.display(), "dataset cache hit");
                return Ok(Arc::clone(&cached.records));
            }
            info!(path = %key.display(), "dataset changed on disk; reloading");
        }

        let records = Arc::new(
            load_dataset(&key).with_context(|| format!("loading dataset {}", key.display()))?,
        );
        entries.insert(
            key,
            CachedDataset {
                modified,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    /// Drop the cached copy of `path`, if any.
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Ok(key) = fs::canonicalize(path.as_ref()) {
            entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
