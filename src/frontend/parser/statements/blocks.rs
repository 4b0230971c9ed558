//! Compound blocks and return statements

use crate::frontend::parser::StatementParser;
use crate::frontend::tokens::TokenKind;
use crate::util::diagnostic::{ErrorCode, PResult};

/// Parse compound statement: `{ <statements> }`
///
/// The body of a standard iterator is closed by the iterator's calling
/// convention, so its closing `}` is neither required nor consumed.
pub fn parse_compound_stmt(p: &mut StatementParser<'_>) -> PResult {
    p.state.bump()?; // consume '{'

    p.parse_statement_list(&TokenKind::RBrace)?;

    if p.routine().is_std_iterator() {
        return Ok(());
    }

    p.state.expect(&TokenKind::RBrace, ErrorCode::MissingRightBracket)?;
    Ok(())
}

/// Parse return statement: `return [expr]`
///
/// A bare `return` has type `void`, which only a void routine accepts.
pub fn parse_return_stmt(p: &mut StatementParser<'_>) -> PResult {
    p.state.bump()?; // consume 'return'

    let span = p.state.span();
    let value = p.parse_expression()?;

    if !p
        .state
        .checker
        .is_assignment_compatible(&p.routine().return_type, &value)
    {
        p.state.error_at(ErrorCode::IncompatibleTypes, span)?;
    }
    Ok(())
}
