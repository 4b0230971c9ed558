//! Fatal conditions and the parse result type
//!
//! Ordinary errors are reported to an `ErrorSink` and parsing continues.
//! Only the conditions below stop the pass for the current routine body;
//! every statement handler propagates them with `?`.

use thiserror::Error;

/// A condition that ends the parse of the current routine body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fatal {
    #[error("Too many syntax errors (limit {limit})")]
    TooManyErrors { limit: usize },
    #[error("Code segment overflow (capacity {capacity} units)")]
    CodeSegmentOverflow { capacity: usize },
}

/// Result of a statement-level parse step
pub type PResult<T = ()> = std::result::Result<T, Fatal>;
