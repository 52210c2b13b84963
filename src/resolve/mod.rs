//! Relative specifier resolution against the module index.

use std::path::{Component, Path, PathBuf};

use crate::error::{BundleError, Result};
use crate::index::ModuleIndex;

/// Maps a raw specifier plus its referencing file to an indexed absolute
/// path. Pure and deterministic: same (specifier, from, index) always
/// yields the same result or the same failure.
pub struct Resolver<'a> {
    index: &'a ModuleIndex,
    extensions: &'a [String],
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ModuleIndex, extensions: &'a [String]) -> Self {
        Self { index, extensions }
    }

    /// Resolve `specifier` as written in the file at `from`.
    ///
    /// Only relative specifiers (`./`, `../`) are supported. The candidate
    /// path is tried verbatim first, then with each configured extension
    /// appended in configured order. Bare specifiers (package or
    /// core-module names) always fail; that lookup belongs to a richer
    /// resolver outside this core.
    pub fn resolve(&self, specifier: &str, from: &Path) -> Result<PathBuf> {
        if !is_relative_specifier(specifier) {
            return Err(unresolved(specifier, from));
        }

        let base = from.parent().unwrap_or_else(|| Path::new(""));
        let candidate = normalize_path(&base.join(specifier));

        if self.index.exists(&candidate) {
            return Ok(candidate);
        }

        for extension in self.extensions {
            let mut probe = candidate.clone().into_os_string();
            probe.push(format!(".{extension}"));
            let probe = PathBuf::from(probe);
            if self.index.exists(&probe) {
                return Ok(probe);
            }
        }

        Err(unresolved(specifier, from))
    }
}

fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

fn unresolved(specifier: &str, from: &Path) -> BundleError {
    BundleError::UnresolvedSpecifier {
        specifier: specifier.to_string(),
        from: from.to_path_buf(),
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component, without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
