//! Errors surfaced by word list storage.

use std::io::Error;

/// Error binding a personal word list to its backing file.
///
/// Only construction fails loudly; once a list is bound, later I/O problems
/// are logged and the operation degrades to in-memory behaviour.
#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    /// The backing file could not be opened or created.
    #[error("File error")]
    File(#[source] Error),
}
