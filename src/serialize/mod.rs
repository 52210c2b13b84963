//! Bundle serialization.

use crate::error::Result;
use crate::graph::ReachableSet;
use crate::index::ModuleIndex;

/// Concatenate the source text of every reachable file, newline-separated,
/// in discovery order.
///
/// A pure function of the frozen [`ReachableSet`] and the index's source
/// texts: the source is already resident in the index, so no I/O happens
/// here. Note that discovery order is not topological order; a file may
/// appear in the bundle before a file it depends on.
pub fn serialize_bundle(reachable: &ReachableSet, index: &ModuleIndex) -> Result<String> {
    let mut parts: Vec<&str> = Vec::with_capacity(reachable.len());
    for path in reachable.iter() {
        parts.push(index.source(path)?);
    }
    Ok(parts.join("\n"))
}
