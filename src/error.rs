//! Error types for the index and the taxonomy built on top of it.

use thiserror::Error;

/// Errors raised at the public boundary of [`VebTree`](crate::VebTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A universe must hold at least one key.
    #[error("universe size must be at least 1")]
    EmptyUniverse,

    /// The key does not fit in `[0, universe_size)`.
    #[error("key {key} out of universe (size {universe_size})")]
    KeyOutOfUniverse { key: usize, universe_size: usize },
}

/// Errors from [`Taxonomy`](crate::Taxonomy) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArborError {
    /// Every id in the universe has been handed out.
    #[error("universe too small: all {universe_size} ids are allocated, increase the universe size")]
    CapacityExhausted { universe_size: usize },

    /// The label was never registered.
    #[error("no such term: '{0}'")]
    UnknownTerm(String),

    /// Both terms exist but no chain of edges joins them.
    #[error("no path found between '{from}' and '{to}'")]
    NoPath { from: String, to: String },

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl ArborError {
    /// Lookup failures are reported to the user rather than aborting a run.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArborError::UnknownTerm(_) | ArborError::NoPath { .. })
    }
}
