//! Optional on-disk cache of extracted specifiers.
//!
//! The cache is a performance optimization only, never a correctness
//! dependency: source text is always re-read at index time, and a cache
//! entry is consulted only when the file's mtime and size both still match.
//! A missing, stale, or corrupt cache file is ignored and rebuilt.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{BundleError, Result};
use crate::index::ModuleIndex;

const CACHE_VERSION: u32 = 1;
const CACHE_FILE: &str = "tinypack-index.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    entries: HashMap<PathBuf, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    mtime_secs: u64,
    size: u64,
    specifiers: Vec<String>,
}

#[derive(Debug)]
pub struct IndexCache {
    path: PathBuf,
    data: CacheData,
}

impl IndexCache {
    /// An empty cache that will persist into `dir`.
    pub fn empty(dir: &Path) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
            data: CacheData {
                version: CACHE_VERSION,
                entries: HashMap::new(),
            },
        }
    }

    /// Load the cache from `dir`. A missing, unreadable, or
    /// version-mismatched cache file yields an empty cache.
    pub fn load(dir: &Path) -> Self {
        let mut cache = Self::empty(dir);
        let Ok(content) = fs::read(&cache.path) else {
            return cache;
        };
        match serde_json::from_slice::<CacheData>(&content) {
            Ok(data) if data.version == CACHE_VERSION => cache.data = data,
            _ => {}
        }
        cache
    }

    /// Cached specifiers for `path`, if the file is unchanged since the
    /// entry was recorded.
    pub(super) fn lookup(&self, path: &Path, metadata: &fs::Metadata) -> Option<&[String]> {
        let entry = self.data.entries.get(path)?;
        if entry.mtime_secs != mtime_secs(metadata) || entry.size != metadata.len() {
            return None;
        }
        Some(&entry.specifiers)
    }

    /// Rebuild the cache contents from a freshly built index. Files whose
    /// metadata cannot be read are simply left out.
    pub fn refresh(&mut self, index: &ModuleIndex) {
        self.data.entries.clear();
        for path in index.all_files() {
            let Ok(metadata) = fs::metadata(path) else {
                continue;
            };
            let Ok(specifiers) = index.dependencies(path) else {
                continue;
            };
            self.data.entries.insert(
                path.to_path_buf(),
                CacheEntry {
                    mtime_secs: mtime_secs(&metadata),
                    size: metadata.len(),
                    specifiers: specifiers.to_vec(),
                },
            );
        }
    }

    /// Write the cache atomically: serialize to a temp file, then rename
    /// into place.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| BundleError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_vec(&self.data).map_err(|err| BundleError::Io {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        })?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(|source| BundleError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| BundleError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }
}

fn mtime_secs(metadata: &fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
