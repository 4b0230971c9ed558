//! Statement parsing modules
//!
//! - [`control_flow`] - `do`, `while`, `if`, `for`, `switch` and case labels
//! - [`blocks`] - compound blocks and `return`
//! - [`declarations`] - declarations, assignments, constants and directives

pub mod blocks;
pub mod control_flow;
pub mod declarations;

pub use control_flow::parse_case_label;

use super::recovery::is_statement_start;
use super::StatementParser;
use crate::frontend::icode::IcodeUnit;
use crate::frontend::tokens::TokenKind;
use crate::util::diagnostic::{ErrorCode, PResult};

impl StatementParser<'_> {
    /// Parse one statement selected by the current token.
    ///
    /// A token that starts no statement form is an empty statement. Unless
    /// the input is exhausted, the parser resynchronises afterwards.
    pub fn parse_statement(&mut self) -> PResult {
        if self.line_markers() && is_statement_start(self.state.kind()) {
            let line = self.state.span().start.line;
            self.state.icode.append(IcodeUnit::LineMarker(line))?;
        }

        let pending = self.state.icode.pending_markers();
        tracing::trace!("statement at `{}`", self.state.kind());

        match self.state.kind() {
            TokenKind::Identifier(_) => declarations::parse_assignment_or_declaration(self)?,
            TokenKind::KwConst => {
                self.state.bump()?;
                declarations::parse_constant_declaration(self)?;
            }
            TokenKind::KwDo => control_flow::parse_do_stmt(self)?,
            TokenKind::KwWhile => control_flow::parse_while_stmt(self)?,
            TokenKind::KwIf => control_flow::parse_if_stmt(self)?,
            TokenKind::KwFor => control_flow::parse_for_stmt(self)?,
            TokenKind::KwSwitch => control_flow::parse_switch_stmt(self)?,
            TokenKind::KwBreak => {
                self.state.bump()?;
            }
            TokenKind::LBrace => blocks::parse_compound_stmt(self)?,
            TokenKind::KwReturn => blocks::parse_return_stmt(self)?,
            TokenKind::Hash => {
                self.state.advance(false)?;
                declarations::parse_directive(self)?;
            }
            _ => {}
        }

        debug_assert_eq!(
            self.state.icode.pending_markers(),
            pending,
            "statement left a location marker unresolved"
        );

        if !self.state.at_eof() {
            self.state.resync()?;
        }
        Ok(())
    }

    /// Parse statements and their separators until `terminator` or end of
    /// input. The terminator itself is not consumed.
    pub fn parse_statement_list(
        &mut self,
        terminator: &TokenKind,
    ) -> PResult {
        loop {
            let position = self.state.cursor.position();
            let errors = self.state.errors.error_count();

            self.parse_statement()?;
            self.state.skip_separators()?;

            if self.state.at(terminator) || self.state.at_eof() {
                break;
            }

            // A token that neither starts nor may follow a statement in this
            // position would otherwise be retried forever
            if self.state.cursor.position() == position {
                if self.state.errors.error_count() == errors {
                    self.state.error(ErrorCode::UnexpectedToken)?;
                }
                self.state.advance(false)?;
                if self.state.at(terminator) || self.state.at_eof() {
                    break;
                }
            }
        }
        Ok(())
    }
}
