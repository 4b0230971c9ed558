//! Token types
//!
//! Tokens are produced by an external scanner and handed to the front end,
//! either directly or as a JSON token stream.

use serde::{Deserialize, Serialize};

use crate::util::span::Span;

/// Token kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    KwConst,
    KwDo,
    KwWhile,
    KwIf,
    KwElse,
    KwFor,
    KwSwitch,
    KwCase,
    KwDefault,
    KwBreak,
    KwContinue,
    KwReturn,
    KwInclude,

    // Identifiers
    Identifier(String),

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    StringLiteral(String),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    AndEq,
    XorEq,
    OrEq,

    // Comparison
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical and bitwise
    AndAnd,
    OrOr,
    Not,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Colon,
    ColonColon,
    Hash,
    Dot,

    // Special
    Eof,
}

impl TokenKind {
    /// Keyword kind for a reserved word
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "const" => TokenKind::KwConst,
            "do" => TokenKind::KwDo,
            "while" => TokenKind::KwWhile,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "for" => TokenKind::KwFor,
            "switch" => TokenKind::KwSwitch,
            "case" => TokenKind::KwCase,
            "default" => TokenKind::KwDefault,
            "break" => TokenKind::KwBreak,
            "continue" => TokenKind::KwContinue,
            "return" => TokenKind::KwReturn,
            "include" => TokenKind::KwInclude,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind is one of the assignment operators
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::AndEq
                | TokenKind::XorEq
                | TokenKind::OrEq
        )
    }

    /// Whether this kind may prefix a signed constant
    pub fn is_unary_sign(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let text = match self {
            TokenKind::KwConst => "const",
            TokenKind::KwDo => "do",
            TokenKind::KwWhile => "while",
            TokenKind::KwIf => "if",
            TokenKind::KwElse => "else",
            TokenKind::KwFor => "for",
            TokenKind::KwSwitch => "switch",
            TokenKind::KwCase => "case",
            TokenKind::KwDefault => "default",
            TokenKind::KwBreak => "break",
            TokenKind::KwContinue => "continue",
            TokenKind::KwReturn => "return",
            TokenKind::KwInclude => "include",
            TokenKind::Identifier(name) => return write!(f, "{}", name),
            TokenKind::IntLiteral(n) => return write!(f, "{}", n),
            TokenKind::FloatLiteral(x) => return write!(f, "{:?}", x),
            TokenKind::CharLiteral(c) => return write!(f, "'{}'", c),
            TokenKind::StringLiteral(s) => return write!(f, "{:?}", s),
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::AndEq => "&=",
            TokenKind::XorEq => "^=",
            TokenKind::OrEq => "|=",
            TokenKind::EqEq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Not => "!",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Hash => "#",
            TokenKind::Dot => ".",
            TokenKind::Eof => "<eof>",
        };
        write!(f, "{}", text)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default)]
    pub span: Span,
}

/// Literal value carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    String(String),
}

impl Token {
    pub fn new(
        kind: TokenKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }

    /// The literal value, if this is a literal token
    pub fn literal(&self) -> Option<Literal> {
        match &self.kind {
            TokenKind::IntLiteral(n) => Some(Literal::Int(*n)),
            TokenKind::FloatLiteral(x) => Some(Literal::Float(*x)),
            TokenKind::CharLiteral(c) => Some(Literal::Char(*c)),
            TokenKind::StringLiteral(s) => Some(Literal::String(s.clone())),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::dummy(),
        }
    }
}
