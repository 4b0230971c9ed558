//! Control flow statement parsing
//! Handles do/while, while, if/else, for, switch and case labels.
//!
//! Every loop and conditional reserves its location markers before it
//! consumes its keyword and fixes each one up exactly once.

use crate::frontend::parser::StatementParser;
use crate::frontend::tokens::TokenKind;
use crate::util::diagnostic::{ErrorCode, PResult};

/// Parse a condition and require a boolean type
fn parse_condition(p: &mut StatementParser<'_>) -> PResult {
    let span = p.state.span();
    let ty = p.parse_expression()?;
    if ty.is_void() {
        p.state.error_at(ErrorCode::InvalidExpression, span)?;
    } else if !p.state.checker.is_boolean(&ty) {
        p.state.error_at(ErrorCode::IncompatibleTypes, span)?;
    }
    Ok(())
}

/// Parse do statement: `do <statements> while ( <condition> )`
pub fn parse_do_stmt(p: &mut StatementParser<'_>) -> PResult {
    let exit = p.state.reserve_marker()?;
    p.state.bump()?; // consume 'do'

    p.parse_statement_list(&TokenKind::KwWhile)?;

    p.state.expect(&TokenKind::KwWhile, ErrorCode::MissingWhile)?;
    p.state.expect(&TokenKind::LParen, ErrorCode::MissingLeftParen)?;
    parse_condition(p)?;
    p.state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;

    p.state.fixup(exit);
    Ok(())
}

/// Parse while statement: `while ( <condition> ) <statement>`
pub fn parse_while_stmt(p: &mut StatementParser<'_>) -> PResult {
    let exit = p.state.reserve_marker()?;
    p.state.bump()?; // consume 'while'

    p.state.expect(&TokenKind::LParen, ErrorCode::MissingLeftParen)?;
    parse_condition(p)?;
    p.state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;

    p.parse_statement()?;

    p.state.fixup(exit);
    Ok(())
}

/// Parse if statement: `if ( <condition> ) <statement> [else <statement>]`
///
/// The false-branch marker resolves to the first unit of the else part
/// (its skip marker) or, without an else, to the end of the statement.
pub fn parse_if_stmt(p: &mut StatementParser<'_>) -> PResult {
    let on_false = p.state.reserve_marker()?;
    p.state.bump()?; // consume 'if'

    p.state.expect(&TokenKind::LParen, ErrorCode::MissingLeftParen)?;
    parse_condition(p)?;
    p.state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;

    p.parse_statement()?;
    p.state.skip_separators()?;
    p.state.fixup(on_false);

    if p.state.at(&TokenKind::KwElse) {
        let follow = p.state.reserve_marker()?;
        p.state.bump()?; // consume 'else'

        p.parse_statement()?;
        p.state.skip_separators()?;
        p.state.fixup(follow);
    }
    Ok(())
}

/// Parse for statement: `for ( [init] ; [condition] ; [increment] ) <statement>`
///
/// Markers, in reservation order: exit, body, condition, increment.
pub fn parse_for_stmt(p: &mut StatementParser<'_>) -> PResult {
    let exit = p.state.reserve_marker()?;
    let body = p.state.reserve_marker()?;
    let condition = p.state.reserve_marker()?;
    let increment = p.state.reserve_marker()?;
    p.state.bump()?; // consume 'for'

    p.state.expect(&TokenKind::LParen, ErrorCode::MissingLeftParen)?;

    if !p.state.at(&TokenKind::Semicolon) {
        super::declarations::parse_assignment_or_declaration(p)?;
        p.state.expect(&TokenKind::Semicolon, ErrorCode::MissingSemicolon)?;
    } else {
        p.state.bump()?;
    }

    p.state.fixup(condition);
    if !p.state.at(&TokenKind::Semicolon) {
        parse_condition(p)?;
        p.state.expect(&TokenKind::Semicolon, ErrorCode::MissingSemicolon)?;
    } else {
        p.state.bump()?;
    }

    p.state.fixup(increment);
    if !p.state.at(&TokenKind::RParen) {
        p.parse_expression()?;
    }

    p.state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;
    p.state.fixup(body);

    p.parse_statement()?;

    p.state.fixup(exit);
    Ok(())
}

/// Parse switch statement: `switch ( <selector> ) <statement>`
///
/// Only the selector type is validated; no dispatch table is built and case
/// labels inside the body are not recognised.
pub fn parse_switch_stmt(p: &mut StatementParser<'_>) -> PResult {
    p.state.bump()?; // consume 'switch'
    p.state.expect(&TokenKind::LParen, ErrorCode::MissingLeftParen)?;

    let span = p.state.span();
    let selector = p.parse_expression()?;

    p.state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;

    if !p.state.checker.is_selector(&selector) {
        p.state.error_at(ErrorCode::IncompatibleTypes, span)?;
    }

    p.parse_statement()
}

/// Parse a case label: `case [+|-] <constant> : <statements> break`
///
/// The constant must be a defined identifier, an integer or a single
/// unsigned character. Not reachable from `switch`.
pub fn parse_case_label(p: &mut StatementParser<'_>) -> PResult {
    p.state.bump()?; // consume 'case'

    let signed = p.state.kind().is_unary_sign();
    if signed {
        p.state.bump()?;
    }

    let span = p.state.span();
    match p.state.kind().clone() {
        TokenKind::Identifier(name) => {
            if p.state.symtab.lookup(&name).is_none() {
                p.state.error_at(ErrorCode::UndefinedIdentifier, span)?;
            }
            p.state.bump()?;
        }
        TokenKind::IntLiteral(_) => {
            p.state.bump()?;
        }
        TokenKind::FloatLiteral(_) => {
            p.state.error_at(ErrorCode::InvalidConstant, span)?;
            p.state.bump()?;
        }
        TokenKind::CharLiteral(_) => {
            if signed {
                p.state.error_at(ErrorCode::InvalidConstant, span)?;
            }
            p.state.bump()?;
        }
        TokenKind::StringLiteral(text) => {
            if signed || text.chars().count() != 1 {
                p.state.error_at(ErrorCode::InvalidConstant, span)?;
            }
            p.state.bump()?;
        }
        _ => {}
    }

    p.state.expect(&TokenKind::Colon, ErrorCode::MissingColon)?;
    p.parse_statement_list(&TokenKind::KwBreak)
}
