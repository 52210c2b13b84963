use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::graph::ReachableSet;
use crate::index::ModuleIndex;

/// Machine-readable report of a completed build, covering every
/// observational output of the pipeline.
#[derive(Serialize)]
pub struct BuildReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub entry_point: String,
    pub indexed_files: Vec<String>,
    pub entry_specifiers: Vec<String>,
    pub reachable_count: usize,
    pub reachable_files: Vec<String>,
    pub bundle: String,
}

impl BuildReport {
    pub fn new(
        root: &Path,
        entry: &Path,
        index: &ModuleIndex,
        reachable: &ReachableSet,
        bundle: &str,
    ) -> Self {
        let entry_specifiers = index
            .dependencies(entry)
            .map(|specifiers| specifiers.to_vec())
            .unwrap_or_default();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            root: root.display().to_string(),
            entry_point: entry.display().to_string(),
            indexed_files: index
                .all_files()
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            entry_specifiers,
            reachable_count: reachable.len(),
            reachable_files: reachable
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            bundle: bundle.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
