//! Diagnostic data structures

use super::codes::ErrorCode;
use crate::util::span::Span;

/// A reported error with its rendered message and location
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create an error diagnostic for `code` at `span`
    pub fn error(
        code: ErrorCode,
        span: Span,
    ) -> Self {
        Self {
            code,
            message: code.to_string(),
            span,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "error[{}]: {}",
            self.code.code(),
            self.message
        )
    }
}
