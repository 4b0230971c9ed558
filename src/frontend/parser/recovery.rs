//! Error recovery
//!
//! After a statement the parser expects a token that may follow or start a
//! statement; a missing separator is tolerated. Anything else is reported,
//! then skipped until such a token.

use super::parser_state::ParserState;
use crate::frontend::tokens::TokenKind;
use crate::util::diagnostic::{ErrorCode, PResult};

/// Tokens that may follow a statement
pub fn is_statement_follow(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::KwElse
            | TokenKind::KwWhile
    )
}

/// Tokens that may start a statement
pub fn is_statement_start(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwSwitch
            | TokenKind::KwFor
            | TokenKind::KwDo
            | TokenKind::KwWhile
            | TokenKind::Identifier(_)
            | TokenKind::ColonColon
            | TokenKind::KwReturn
            | TokenKind::KwContinue
            | TokenKind::KwIf
            | TokenKind::KwBreak
            | TokenKind::KwConst
            | TokenKind::Hash
            | TokenKind::LBrace
    )
}

fn is_resync_point(kind: &TokenKind) -> bool {
    is_statement_follow(kind) || is_statement_start(kind) || *kind == TokenKind::Eof
}

impl ParserState<'_> {
    /// Resynchronise after a statement.
    ///
    /// Reports once per call. Skipped tokens are not recorded.
    pub fn resync(&mut self) -> PResult {
        if is_statement_follow(self.kind()) || is_statement_start(self.kind()) {
            return Ok(());
        }

        let code = if self.at_eof() {
            ErrorCode::UnexpectedEof
        } else {
            ErrorCode::UnexpectedToken
        };
        self.error(code)?;

        let mut skipped = 0usize;
        while !is_resync_point(self.kind()) {
            self.advance(false)?;
            skipped += 1;
        }
        if skipped > 0 {
            tracing::trace!("resync skipped {} token(s), resuming at `{}`", skipped, self.kind());
        }

        if self.at_eof() && code != ErrorCode::UnexpectedEof {
            self.error(ErrorCode::UnexpectedEof)?;
        }
        Ok(())
    }
}
