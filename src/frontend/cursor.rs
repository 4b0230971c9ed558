//! Token cursor
//!
//! The statement parser only ever looks at one token of lookahead.

use super::tokens::{Token, TokenKind};

/// One-token lookahead over a token stream
pub trait TokenCursor {
    /// Current lookahead token; `Eof` once the input is exhausted
    fn current(&self) -> &Token;

    /// Consume the current token and return it. Advancing at end of input
    /// returns the `Eof` token and does not move.
    fn advance(&mut self) -> Token;

    /// Number of tokens consumed so far
    fn position(&self) -> usize;

    fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        &self.current().kind == kind
    }
}

/// Cursor over a borrowed token slice
#[derive(Debug)]
pub struct SliceCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
}

impl<'a> SliceCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof_span = tokens.last().map(|t| t.span).unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, eof_span),
        }
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}

impl TokenCursor for SliceCursor<'_> {
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.pos
    }
}
