//! Error taxonomy for the bundling pipeline.
//!
//! Every error here is fatal: there is no partial-success mode and no
//! retry. Either the full bundle is produced or nothing is.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BundleError>;

#[derive(Debug, Error)]
pub enum BundleError {
    /// The supplied entry path is not present in the module index.
    /// Detected before any traversal step runs.
    #[error("entry point `{}` is not present in the module index", path.display())]
    EntryPointNotFound { path: PathBuf },

    /// A specifier could not be mapped to an indexed file. Carries the
    /// specifier as written and the file that references it.
    #[error("cannot resolve `{specifier}` from `{}`", from.display())]
    UnresolvedSpecifier { specifier: String, from: PathBuf },

    /// A dependency or source query was made for a path the index does not
    /// contain. Given a correct traversal this indicates an internal
    /// invariant violation.
    #[error("module `{}` is not present in the index", path.display())]
    UnknownModule { path: PathBuf },

    /// An I/O failure while crawling, reading, or writing. Aborts the
    /// enclosing phase.
    #[error("I/O error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
