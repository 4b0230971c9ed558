//! Statement parser
//!
//! Recursive descent over routine bodies. Each statement form has one
//! handler; handlers record the tokens they consume in the intermediate
//! code stream and reserve location markers for forward jumps, which are
//! fixed up once the target position is reached.
//!
//! Handlers return [`PResult`]: ordinary syntax and type errors are only
//! reported, while fatal conditions propagate with `?` and end the pass.

mod expr;
mod parser_state;
mod recovery;
pub mod statements;

#[cfg(test)]
mod tests;

pub use expr::{can_start_expression, ExpressionParser, OperandExpressionParser};
pub use parser_state::ParserState;
pub use recovery::{is_statement_follow, is_statement_start};

use crate::frontend::symtab::RoutineDescriptor;
use crate::frontend::tokens::TokenKind;
use crate::frontend::types::TypeDescriptor;
use crate::util::diagnostic::PResult;

/// Parses the statements of one routine body
pub struct StatementParser<'a> {
    pub state: ParserState<'a>,
    exprs: &'a mut dyn ExpressionParser,
    routine: &'a RoutineDescriptor,
    line_markers: bool,
}

impl<'a> StatementParser<'a> {
    pub fn new(
        state: ParserState<'a>,
        exprs: &'a mut dyn ExpressionParser,
        routine: &'a RoutineDescriptor,
    ) -> Self {
        Self {
            state,
            exprs,
            routine,
            line_markers: false,
        }
    }

    /// Emit a line marker before every statement
    pub fn with_line_markers(
        mut self,
        enabled: bool,
    ) -> Self {
        self.line_markers = enabled;
        self
    }

    /// The routine whose body is being parsed
    pub fn routine(&self) -> &RoutineDescriptor {
        self.routine
    }

    pub fn line_markers(&self) -> bool {
        self.line_markers
    }

    /// Parse an expression and return its type
    pub fn parse_expression(&mut self) -> PResult<TypeDescriptor> {
        self.exprs.parse_expression(&mut self.state)
    }

    /// Parse statements until end of input
    ///
    /// Blocks of a standard iterator leave their closing `}` to the
    /// iterator convention, which discards it here.
    pub fn parse_body(&mut self) -> PResult {
        if !self.routine.is_std_iterator() {
            return self.parse_statement_list(&TokenKind::Eof);
        }
        loop {
            self.parse_statement_list(&TokenKind::RBrace)?;
            if self.state.at_eof() {
                return Ok(());
            }
            self.state.advance(false)?; // consume '}'
        }
    }

    pub fn into_state(self) -> ParserState<'a> {
        self.state
    }
}
