//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source position (line and column, both 1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position
    #[inline]
    pub fn new(
        line: usize,
        column: usize,
    ) -> Self {
        Self { line, column }
    }

    /// Create a dummy position
    #[inline]
    pub fn dummy() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source span (start position to end position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    #[inline]
    pub fn new(
        start: Position,
        end: Position,
    ) -> Self {
        Self { start, end }
    }

    /// Span covering a single line range
    #[inline]
    pub fn on_line(
        line: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start: Position::new(line, start_column),
            end: Position::new(line, end_column),
        }
    }

    /// Create a dummy span
    #[inline]
    pub fn dummy() -> Self {
        Self {
            start: Position::dummy(),
            end: Position::dummy(),
        }
    }

    /// Check if this is a dummy span
    #[inline]
    pub fn is_dummy(&self) -> bool {
        self.start.line == 0
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(
        self,
        other: Span,
    ) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let start = if (other.start.line, other.start.column) < (self.start.line, self.start.column) {
            other.start
        } else {
            self.start
        };
        let end = if (other.end.line, other.end.column) > (self.end.line, self.end.column) {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}
