//! File indexing: crawl a root directory, read every matching source file,
//! and statically extract its dependency specifiers.
//!
//! The index is built once per run behind a join barrier and is read-only
//! afterwards; no downstream component ever mutates it.

mod cache;
mod extract;

pub use cache::IndexCache;
pub use extract::extract_specifiers;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::config::BundleConfig;
use crate::error::{BundleError, Result};

/// One indexed source file.
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Absolute path; unique key within the index.
    pub path: PathBuf,
    /// Raw source text.
    pub source: String,
    /// Raw dependency specifiers, in textual order of occurrence.
    pub specifiers: Vec<String>,
}

/// Mapping from absolute path to [`ModuleRecord`].
///
/// Every path present in the index corresponds to a file that existed and
/// matched the extension filter at crawl time.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    records: HashMap<PathBuf, ModuleRecord>,
}

impl ModuleIndex {
    /// All indexed absolute paths, sorted for stable output.
    pub fn all_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = self.records.keys().map(PathBuf::as_path).collect();
        files.sort();
        files
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    /// Raw specifier sequence for an indexed file.
    pub fn dependencies(&self, path: &Path) -> Result<&[String]> {
        self.records
            .get(path)
            .map(|record| record.specifiers.as_slice())
            .ok_or_else(|| BundleError::UnknownModule {
                path: path.to_path_buf(),
            })
    }

    /// Source text for an indexed file.
    pub fn source(&self, path: &Path) -> Result<&str> {
        self.records
            .get(path)
            .map(|record| record.source.as_str())
            .ok_or_else(|| BundleError::UnknownModule {
                path: path.to_path_buf(),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn insert(&mut self, record: ModuleRecord) {
        self.records.insert(record.path.clone(), record);
    }
}

/// Build the module index for every file under `root` whose extension is
/// in the configured set.
///
/// File reads and specifier extraction fan out across a pool of
/// `config.max_workers` blocking tasks; results merge into the single
/// index only after every worker has finished. Any unreadable file fails
/// the whole build, since downstream resolution assumes a complete index.
pub async fn build_index(
    root: &Path,
    config: &BundleConfig,
    cache: Option<Arc<IndexCache>>,
) -> Result<ModuleIndex> {
    let files = collect_files(root, config)?;

    let mut index = ModuleIndex::default();
    if files.is_empty() {
        return Ok(index);
    }

    let workers = config.max_workers.max(1);
    let chunk_size = files.len().div_ceil(workers);

    let mut set = JoinSet::new();
    for chunk in files.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        let cache = cache.clone();
        set.spawn_blocking(move || {
            chunk
                .into_iter()
                .map(|path| index_file(path, cache.as_deref()))
                .collect::<Result<Vec<ModuleRecord>>>()
        });
    }

    // Join barrier: the single-writer merge below is the only point where
    // the index is mutated.
    while let Some(joined) = set.join_next().await {
        let batch = joined.map_err(|err| BundleError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, err),
        })??;
        for record in batch {
            index.insert(record);
        }
    }

    Ok(index)
}

/// Crawl `root` and collect every file matching the extension filter,
/// sorted by path for deterministic worker assignment.
fn collect_files(root: &Path, config: &BundleConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            BundleError::Io {
                path,
                source: err.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if config.matches_extension(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

fn index_file(path: PathBuf, cache: Option<&IndexCache>) -> Result<ModuleRecord> {
    let metadata = fs::metadata(&path).map_err(|source| BundleError::Io {
        path: path.clone(),
        source,
    })?;
    let source = fs::read_to_string(&path).map_err(|source| BundleError::Io {
        path: path.clone(),
        source,
    })?;

    let specifiers = cache
        .and_then(|cache| cache.lookup(&path, &metadata))
        .map(<[String]>::to_vec)
        .unwrap_or_else(|| extract_specifiers(&source));

    Ok(ModuleRecord {
        path,
        source,
        specifiers,
    })
}
