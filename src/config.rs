use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::thread;

/// Settings shared by the indexing and resolution phases.
///
/// Defaults match the reference bundler: `.js` files only, one worker per
/// logical CPU. A TOML file can override either field; CLI flags override
/// the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// File extensions eligible for indexing, stored without the leading
    /// dot. Order matters: the resolver probes extensions in this order.
    pub extensions: Vec<String>,
    /// Worker pool size for the indexing phase. Never zero.
    pub max_workers: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            max_workers: default_workers(),
        }
    }
}

impl BundleConfig {
    /// Load settings from a TOML file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        let mut config: BundleConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config `{}`", path.display()))?;
        config.extensions = config
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();
        if config.max_workers == 0 {
            config.max_workers = default_workers();
        }
        Ok(config)
    }

    /// Parse a comma-separated extension list as given on the CLI.
    /// Accepts entries with or without a leading dot.
    pub fn parse_extensions(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(normalize_extension)
            .collect()
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
