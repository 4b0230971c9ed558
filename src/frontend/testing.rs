//! Test support: a word-splitting token helper and a parser-state harness.
//!
//! Not a lexer. Every token must be separated by whitespace; lines are
//! counted on `\n` so spans carry line numbers.

use super::cursor::{SliceCursor, TokenCursor};
use super::icode::Icode;
use super::parser::{OperandExpressionParser, ParserState, StatementParser};
use super::symtab::{RoutineDescriptor, SymbolNode, SymbolTable};
use super::tokens::{Token, TokenKind};
use super::types::{StandardTypeChecker, TypeDescriptor};
use crate::util::diagnostic::ErrorCollector;
use crate::util::span::Span;

const PUNCTUATION: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::PlusPlus,
    TokenKind::MinusMinus,
    TokenKind::Eq,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
    TokenKind::PercentEq,
    TokenKind::ShlEq,
    TokenKind::ShrEq,
    TokenKind::AndEq,
    TokenKind::XorEq,
    TokenKind::OrEq,
    TokenKind::EqEq,
    TokenKind::Neq,
    TokenKind::Lt,
    TokenKind::Le,
    TokenKind::Gt,
    TokenKind::Ge,
    TokenKind::AndAnd,
    TokenKind::OrOr,
    TokenKind::Not,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Caret,
    TokenKind::Tilde,
    TokenKind::Shl,
    TokenKind::Shr,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::ColonColon,
    TokenKind::Hash,
    TokenKind::Dot,
];

fn word_kind(word: &str) -> TokenKind {
    if let Some(kind) = TokenKind::keyword(word) {
        return kind;
    }
    if let Some(kind) = PUNCTUATION.iter().find(|k| k.to_string() == word) {
        return kind.clone();
    }
    if let Ok(n) = word.parse::<i64>() {
        return TokenKind::IntLiteral(n);
    }
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        if let Ok(x) = word.parse::<f64>() {
            return TokenKind::FloatLiteral(x);
        }
    }
    if let Some(inner) = word.strip_prefix('\'').and_then(|w| w.strip_suffix('\'')) {
        if let Some(c) = inner.chars().next() {
            return TokenKind::CharLiteral(c);
        }
    }
    if let Some(inner) = word.strip_prefix('"').and_then(|w| w.strip_suffix('"')) {
        return TokenKind::StringLiteral(inner.to_string());
    }
    TokenKind::Identifier(word.to_string())
}

/// Split `src` on whitespace into tokens
pub fn words(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (line_index, line) in src.lines().enumerate() {
        let mut offset = 0;
        for word in line.split_whitespace() {
            let start = line[offset..].find(word).map_or(offset, |i| offset + i);
            offset = start + word.len();
            let span = Span::on_line(line_index + 1, start + 1, offset + 1);
            tokens.push(Token::new(word_kind(word), span));
        }
    }
    tokens
}

/// Owns everything a `ParserState` borrows
pub struct Harness {
    pub tokens: Vec<Token>,
    pub icode: Icode,
    pub symtab: SymbolTable,
    pub errors: ErrorCollector,
    /// Tokens consumed by the last `run`
    pub consumed: usize,
}

impl Harness {
    pub fn new(src: &str) -> Self {
        Self {
            tokens: words(src),
            icode: Icode::new(),
            symtab: SymbolTable::with_predefined(),
            errors: ErrorCollector::new(),
            consumed: 0,
        }
    }

    pub fn declare(
        &mut self,
        name: &str,
        ty: TypeDescriptor,
    ) {
        self.symtab
            .enter_local(SymbolNode::variable(name, ty))
            .expect("test symbol");
    }

    pub fn run<R>(
        &mut self,
        f: impl FnOnce(&mut ParserState<'_>) -> R,
    ) -> R {
        let mut cursor = SliceCursor::new(&self.tokens);
        let checker = StandardTypeChecker;
        let result = {
            let mut state = ParserState::new(
                &mut cursor,
                &mut self.icode,
                &mut self.symtab,
                &checker,
                &mut self.errors,
            );
            f(&mut state)
        };
        self.consumed = cursor.position();
        result
    }

    /// Like `run`, with a statement parser for `routine`
    pub fn run_statements<R>(
        &mut self,
        routine: &RoutineDescriptor,
        f: impl FnOnce(&mut StatementParser<'_>) -> R,
    ) -> R {
        let mut cursor = SliceCursor::new(&self.tokens);
        let checker = StandardTypeChecker;
        let mut exprs = OperandExpressionParser::new();
        let result = {
            let state = ParserState::new(
                &mut cursor,
                &mut self.icode,
                &mut self.symtab,
                &checker,
                &mut self.errors,
            );
            let mut parser = StatementParser::new(state, &mut exprs, routine);
            f(&mut parser)
        };
        self.consumed = cursor.position();
        result
    }
}

#[test]
fn test_words_helper() {
    let tokens = words("while ( i <= 10 )\n  x = 'c' ;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::KwWhile,
            TokenKind::LParen,
            TokenKind::Identifier("i".into()),
            TokenKind::Le,
            TokenKind::IntLiteral(10),
            TokenKind::RParen,
            TokenKind::Identifier("x".into()),
            TokenKind::Eq,
            TokenKind::CharLiteral('c'),
            TokenKind::Semicolon,
        ]
    );
    assert_eq!(tokens[6].span.start.line, 2);
    assert_eq!(tokens[6].span.start.column, 3);
}
