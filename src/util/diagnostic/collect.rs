//! Error sink and collector

use super::codes::ErrorCode;
use super::error::Diagnostic;
use super::result::{Fatal, PResult};
use crate::util::span::Span;

/// Default number of errors tolerated before the pass is abandoned
pub const DEFAULT_MAX_ERRORS: usize = 25;

/// Receiver of categorised errors
///
/// Reporting never stops the parser by itself; the sink may only signal
/// that its error budget is exhausted.
pub trait ErrorSink {
    /// Record `code` at `span`
    fn report(
        &mut self,
        code: ErrorCode,
        span: Span,
    ) -> PResult;

    /// Number of errors recorded so far
    fn error_count(&self) -> usize;
}

/// Collects diagnostics in report order
#[derive(Debug, Clone)]
pub struct ErrorCollector {
    diagnostics: Vec<Diagnostic>,
    max_errors: usize,
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_ERRORS)
    }

    /// Collector that gives up after `max_errors` errors
    pub fn with_limit(max_errors: usize) -> Self {
        Self {
            diagnostics: Vec::new(),
            max_errors,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Count of diagnostics carrying `code`
    pub fn count_of(
        &self,
        code: ErrorCode,
    ) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }
}

impl ErrorSink for ErrorCollector {
    fn report(
        &mut self,
        code: ErrorCode,
        span: Span,
    ) -> PResult {
        tracing::debug!("{} [{}] at {}", code, code.code(), span);
        self.diagnostics.push(Diagnostic::error(code, span));

        if self.error_count() > self.max_errors {
            tracing::warn!("error limit of {} exceeded", self.max_errors);
            return Err(Fatal::TooManyErrors {
                limit: self.max_errors,
            });
        }
        Ok(())
    }

    fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}
