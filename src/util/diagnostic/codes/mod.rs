//! Error code registry
//!
//! Every condition the front end can report has exactly one `ErrorCode`.
//! Codes are stable strings: `E0xxx` for syntax errors, `E1xxx` for
//! semantic errors.

use thiserror::Error;

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected-token-missing and resynchronisation errors
    Syntax,
    /// Type, constant and identifier errors
    Semantic,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Semantic => write!(f, "Semantic"),
        }
    }
}

/// A reportable, non-fatal front-end error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    // === Syntax ===
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Missing (")]
    MissingLeftParen,
    #[error("Missing )")]
    MissingRightParen,
    #[error("Missing {{")]
    MissingLeftBracket,
    #[error("Missing }}")]
    MissingRightBracket,
    #[error("Missing ;")]
    MissingSemicolon,
    #[error("Missing :")]
    MissingColon,
    #[error("Missing ,")]
    MissingComma,
    #[error("Missing while")]
    MissingWhile,
    #[error("Missing =")]
    MissingEqual,
    #[error("Missing identifier")]
    MissingIdentifier,
    #[error("Missing constant")]
    MissingConstant,
    #[error("Missing ]")]
    MissingRightSubscript,
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Invalid assignment statement")]
    InvalidAssignment,

    // === Semantic ===
    #[error("Undefined identifier")]
    UndefinedIdentifier,
    #[error("Redefined identifier")]
    RedefinedIdentifier,
    #[error("Incompatible types")]
    IncompatibleTypes,
    #[error("Incompatible assignment")]
    IncompatibleAssignment,
    #[error("Invalid assignment target")]
    InvalidTarget,
    #[error("Invalid constant")]
    InvalidConstant,
    #[error("Not a constant identifier")]
    NotAConstantIdentifier,
    #[error("Invalid type")]
    InvalidType,
    #[error("Unimplemented feature")]
    UnimplementedFeature,
}

impl ErrorCode {
    /// Every registered code, in code order
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::UnexpectedEof,
        ErrorCode::UnexpectedToken,
        ErrorCode::MissingLeftParen,
        ErrorCode::MissingRightParen,
        ErrorCode::MissingLeftBracket,
        ErrorCode::MissingRightBracket,
        ErrorCode::MissingSemicolon,
        ErrorCode::MissingColon,
        ErrorCode::MissingComma,
        ErrorCode::MissingWhile,
        ErrorCode::MissingEqual,
        ErrorCode::MissingIdentifier,
        ErrorCode::MissingConstant,
        ErrorCode::MissingRightSubscript,
        ErrorCode::InvalidExpression,
        ErrorCode::InvalidAssignment,
        ErrorCode::UndefinedIdentifier,
        ErrorCode::RedefinedIdentifier,
        ErrorCode::IncompatibleTypes,
        ErrorCode::IncompatibleAssignment,
        ErrorCode::InvalidTarget,
        ErrorCode::InvalidConstant,
        ErrorCode::NotAConstantIdentifier,
        ErrorCode::InvalidType,
        ErrorCode::UnimplementedFeature,
    ];

    /// Stable code string, e.g. `"E1003"`
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedEof => "E0001",
            ErrorCode::UnexpectedToken => "E0002",
            ErrorCode::MissingLeftParen => "E0010",
            ErrorCode::MissingRightParen => "E0011",
            ErrorCode::MissingLeftBracket => "E0012",
            ErrorCode::MissingRightBracket => "E0013",
            ErrorCode::MissingSemicolon => "E0014",
            ErrorCode::MissingColon => "E0015",
            ErrorCode::MissingComma => "E0016",
            ErrorCode::MissingWhile => "E0017",
            ErrorCode::MissingEqual => "E0018",
            ErrorCode::MissingIdentifier => "E0019",
            ErrorCode::MissingConstant => "E0020",
            ErrorCode::MissingRightSubscript => "E0021",
            ErrorCode::InvalidExpression => "E0030",
            ErrorCode::InvalidAssignment => "E0031",
            ErrorCode::UndefinedIdentifier => "E1001",
            ErrorCode::RedefinedIdentifier => "E1002",
            ErrorCode::IncompatibleTypes => "E1003",
            ErrorCode::IncompatibleAssignment => "E1004",
            ErrorCode::InvalidTarget => "E1005",
            ErrorCode::InvalidConstant => "E1010",
            ErrorCode::NotAConstantIdentifier => "E1011",
            ErrorCode::InvalidType => "E1012",
            ErrorCode::UnimplementedFeature => "E1090",
        }
    }

    /// Category derived from the code prefix
    pub fn category(&self) -> ErrorCategory {
        if self.code().starts_with("E0") {
            ErrorCategory::Syntax
        } else {
            ErrorCategory::Semantic
        }
    }

    /// Look a code up by its code string
    pub fn find(code: &str) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}
