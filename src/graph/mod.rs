//! Breadth-first dependency graph traversal.
//!
//! Traversal is single-threaded by design: the queue and the visited set
//! need a strict, globally ordered view of "already seen" to guarantee
//! each file is processed at most once.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::error::{BundleError, Result};
use crate::index::ModuleIndex;
use crate::resolve::Resolver;

/// Insertion-ordered set of absolute paths reachable from the entry point.
///
/// Frozen once traversal completes: no path appears twice and the entry
/// point is always the first element. The order is breadth-first discovery
/// order, not topological order — a module may appear before a module it
/// depends on. That matches the reference system and is a known ordering
/// caveat of the bundle format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableSet {
    paths: Vec<PathBuf>,
}

impl ReachableSet {
    pub(crate) fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Traverse the dependency graph from `entry`, resolving every raw
/// specifier along the way.
///
/// Fails with [`BundleError::EntryPointNotFound`] before any traversal step
/// if `entry` is not indexed, and aborts atomically on the first
/// resolution failure — no partial graph is ever returned. Termination is
/// guaranteed because the visited set bounds total dequeues by the number
/// of distinct reachable files.
pub fn build_graph(
    entry: &Path,
    index: &ModuleIndex,
    resolver: &Resolver<'_>,
) -> Result<ReachableSet> {
    if !index.exists(entry) {
        return Err(BundleError::EntryPointNotFound {
            path: entry.to_path_buf(),
        });
    }

    let mut queue: VecDeque<PathBuf> = VecDeque::from([entry.to_path_buf()]);
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut paths: Vec<PathBuf> = Vec::new();

    while let Some(module) = queue.pop_front() {
        // Cycle guard: duplicates may sit in the queue, the visited check
        // at dequeue time ensures each module is processed at most once.
        if !visited.insert(module.clone()) {
            continue;
        }

        for specifier in index.dependencies(&module)? {
            queue.push_back(resolver.resolve(specifier, &module)?);
        }
        paths.push(module);
    }

    Ok(ReachableSet::from_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ModuleRecord;

    fn module(path: &str, specifiers: &[&str]) -> ModuleRecord {
        ModuleRecord {
            path: PathBuf::from(path),
            source: format!("// {path}"),
            specifiers: specifiers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn index_of(records: Vec<ModuleRecord>) -> ModuleIndex {
        let mut index = ModuleIndex::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn js() -> Vec<String> {
        vec!["js".to_string()]
    }

    #[test]
    fn test_linear_chain_in_discovery_order() {
        let index = index_of(vec![
            module("/r/entry.js", &["./a.js"]),
            module("/r/a.js", &["./b.js"]),
            module("/r/b.js", &[]),
        ]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let reachable = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap();

        assert_eq!(
            reachable.paths(),
            &[
                PathBuf::from("/r/entry.js"),
                PathBuf::from("/r/a.js"),
                PathBuf::from("/r/b.js"),
            ]
        );
    }

    #[test]
    fn test_breadth_first_order() {
        let index = index_of(vec![
            module("/r/entry.js", &["./a.js", "./b.js"]),
            module("/r/a.js", &["./deep.js"]),
            module("/r/b.js", &[]),
            module("/r/deep.js", &[]),
        ]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let reachable = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap();

        // Siblings before grandchildren.
        assert_eq!(
            reachable.paths(),
            &[
                PathBuf::from("/r/entry.js"),
                PathBuf::from("/r/a.js"),
                PathBuf::from("/r/b.js"),
                PathBuf::from("/r/deep.js"),
            ]
        );
    }

    #[test]
    fn test_cycle_terminates_with_each_file_once() {
        let index = index_of(vec![
            module("/r/a.js", &["./b.js"]),
            module("/r/b.js", &["./a.js"]),
        ]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let reachable = build_graph(Path::new("/r/a.js"), &index, &resolver).unwrap();

        assert_eq!(
            reachable.paths(),
            &[PathBuf::from("/r/a.js"), PathBuf::from("/r/b.js")]
        );
    }

    #[test]
    fn test_self_reference_appears_once() {
        let index = index_of(vec![module("/r/a.js", &["./a.js"])]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let reachable = build_graph(Path::new("/r/a.js"), &index, &resolver).unwrap();
        assert_eq!(reachable.len(), 1);
    }

    #[test]
    fn test_diamond_dependency_appears_once() {
        let index = index_of(vec![
            module("/r/entry.js", &["./a.js", "./b.js"]),
            module("/r/a.js", &["./shared.js"]),
            module("/r/b.js", &["./shared.js"]),
            module("/r/shared.js", &[]),
        ]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let reachable = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap();

        assert_eq!(reachable.len(), 4);
        assert!(reachable.contains(Path::new("/r/shared.js")));
    }

    #[test]
    fn test_missing_entry_fails_before_traversal() {
        let index = index_of(vec![module("/r/a.js", &[])]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let err = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap_err();
        assert!(matches!(err, BundleError::EntryPointNotFound { .. }));
    }

    #[test]
    fn test_unresolved_specifier_aborts_traversal() {
        let index = index_of(vec![module("/r/entry.js", &["./missing.js"])]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let err = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap_err();
        assert!(matches!(
            err,
            BundleError::UnresolvedSpecifier { ref specifier, ref from }
                if specifier == "./missing.js" && from == Path::new("/r/entry.js")
        ));
    }

    #[test]
    fn test_repeated_runs_yield_identical_order() {
        let index = index_of(vec![
            module("/r/entry.js", &["./a.js", "./b.js"]),
            module("/r/a.js", &["./b.js"]),
            module("/r/b.js", &["./a.js"]),
        ]);
        let extensions = js();
        let resolver = Resolver::new(&index, &extensions);

        let first = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap();
        let second = build_graph(Path::new("/r/entry.js"), &index, &resolver).unwrap();
        assert_eq!(first, second);
    }
}
