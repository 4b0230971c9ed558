//! Declaration, assignment, constant and directive statements

use crate::frontend::parser::StatementParser;
use crate::frontend::symtab::{ConstValue, Definition, SymbolError, SymbolNode};
use crate::frontend::tokens::TokenKind;
use crate::frontend::types::{ScalarKind, TypeDescriptor, TypeForm};
use crate::util::diagnostic::{ErrorCode, PResult};
use crate::util::span::Span;

/// Parse a statement that starts with an identifier.
///
/// A type name starts a variable declaration, a routine name a call, and
/// any other defined name an assignment. A statement that does not start
/// with an identifier (`for ( ++ i ; ...`) is parsed as an expression.
pub fn parse_assignment_or_declaration(p: &mut StatementParser<'_>) -> PResult {
    let span = p.state.span();
    let name = match p.state.kind() {
        TokenKind::Identifier(name) => name.clone(),
        _ => {
            p.parse_expression()?;
            return Ok(());
        }
    };

    match p.state.symtab.lookup(&name).cloned() {
        None => {
            p.state.error_at(ErrorCode::UndefinedIdentifier, span)?;
            p.state.bump()?;
            Ok(())
        }
        Some(node) if node.is_type() => parse_variable_declarations(p, node.ty),
        Some(node) if node.is_routine() => {
            p.parse_expression()?;
            Ok(())
        }
        Some(node) => parse_assignment(p, node, span),
    }
}

/// `T a [ [N] ] [= e] {, b [= e]}`
fn parse_variable_declarations(
    p: &mut StatementParser<'_>,
    base: TypeDescriptor,
) -> PResult {
    p.state.bump()?; // consume type name

    loop {
        let span = p.state.span();
        let name = match p.state.kind() {
            TokenKind::Identifier(name) => name.clone(),
            _ => return p.state.error(ErrorCode::MissingIdentifier),
        };
        p.state.bump()?;

        let ty = parse_array_dimension(p, base.clone())?;
        if let Err(SymbolError::Redefined(name)) =
            p.state.symtab.enter_local(SymbolNode::variable(&name, ty.clone()))
        {
            tracing::trace!("'{}' redefined", name);
            p.state.error_at(ErrorCode::RedefinedIdentifier, span)?;
        }

        if p.state.skip(&TokenKind::Eq)? {
            parse_assigned_value(p, &ty)?;
        }

        if !p.state.skip(&TokenKind::Comma)? {
            return Ok(());
        }
    }
}

/// Optional `[ N ]` after a declared name
fn parse_array_dimension(
    p: &mut StatementParser<'_>,
    element: TypeDescriptor,
) -> PResult<TypeDescriptor> {
    if !p.state.skip(&TokenKind::LBracket)? {
        return Ok(element);
    }

    let ty = match *p.state.kind() {
        TokenKind::IntLiteral(count) if count > 0 => {
            p.state.bump()?;
            TypeDescriptor::array(element, count as usize)
        }
        _ => {
            p.state.error(ErrorCode::InvalidConstant)?;
            TypeDescriptor::dummy()
        }
    };
    p.state
        .expect(&TokenKind::RBracket, ErrorCode::MissingRightSubscript)?;
    Ok(ty)
}

/// Parse the right-hand side of an assignment to a `target`
fn parse_assigned_value(
    p: &mut StatementParser<'_>,
    target: &TypeDescriptor,
) -> PResult {
    let span = p.state.span();
    let value = p.parse_expression()?;
    if value.is_void() {
        p.state.error_at(ErrorCode::InvalidExpression, span)?;
    } else if !p.state.checker.is_assignment_compatible(target, &value) {
        p.state
            .error_at(ErrorCode::IncompatibleAssignment, span)?;
    }
    Ok(())
}

/// `name [ [i] ]... (= | op=) e` or `name ++` / `name --`
fn parse_assignment(
    p: &mut StatementParser<'_>,
    target: SymbolNode,
    span: Span,
) -> PResult {
    if target.is_constant() {
        p.state.error_at(ErrorCode::InvalidTarget, span)?;
    }
    p.state.bump()?; // consume target name

    let mut ty = target.ty;
    while p.state.skip(&TokenKind::LBracket)? {
        p.parse_expression()?;
        p.state
            .expect(&TokenKind::RBracket, ErrorCode::MissingRightSubscript)?;
        ty = match ty.form {
            TypeForm::Array { element, .. } => *element,
            _ => TypeDescriptor::dummy(),
        };
    }

    if p.state.kind().is_assignment_op() {
        p.state.bump()?;
        parse_assigned_value(p, &ty)
    } else if matches!(p.state.kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
        p.state.bump()?;
        Ok(())
    } else {
        p.state.error(ErrorCode::InvalidAssignment)
    }
}

/// Parse constant declaration after `const`: `T name = <constant>`
pub fn parse_constant_declaration(p: &mut StatementParser<'_>) -> PResult {
    let span = p.state.span();
    let declared = match p.state.kind() {
        TokenKind::Identifier(name) => p
            .state
            .symtab
            .lookup(name)
            .filter(|node| node.is_type())
            .map(|node| node.ty.clone()),
        _ => return p.state.error(ErrorCode::InvalidType),
    };
    let ty = match declared {
        Some(ty) => ty,
        None => {
            p.state.error_at(ErrorCode::InvalidType, span)?;
            TypeDescriptor::dummy()
        }
    };
    p.state.bump()?; // consume type name

    let name_span = p.state.span();
    let name = match p.state.kind() {
        TokenKind::Identifier(name) => name.clone(),
        _ => return p.state.error(ErrorCode::MissingIdentifier),
    };
    p.state.bump()?;

    p.state.expect(&TokenKind::Eq, ErrorCode::MissingEqual)?;

    let Some(value) = parse_constant(p, &ty)? else {
        return Ok(());
    };

    if p
        .state
        .symtab
        .enter_local(SymbolNode::constant(&name, ty, value))
        .is_err()
    {
        p.state
            .error_at(ErrorCode::RedefinedIdentifier, name_span)?;
    }
    Ok(())
}

fn accepts(
    ty: &TypeDescriptor,
    kinds: &[ScalarKind],
) -> bool {
    ty.is_dummy() || ty.scalar_kind().is_some_and(|k| kinds.contains(&k))
}

/// `[+|-] number`, a char or string literal, or `[+|-] constant-name`
fn parse_constant(
    p: &mut StatementParser<'_>,
    ty: &TypeDescriptor,
) -> PResult<Option<ConstValue>> {
    let signed = p.state.kind().is_unary_sign();
    let negate = p.state.at(&TokenKind::Minus);
    if signed {
        p.state.bump()?;
    }

    let span = p.state.span();
    let (value, valid) = match p.state.kind().clone() {
        TokenKind::IntLiteral(n) => {
            let n = if negate { n.checked_neg() } else { Some(n) };
            match n {
                Some(n) => (ConstValue::Int(n), ty.is_numeric() || ty.is_dummy()),
                // -i64::MIN
                None => {
                    p.state.bump()?;
                    p.state.error_at(ErrorCode::InvalidConstant, span)?;
                    return Ok(None);
                }
            }
        }
        TokenKind::FloatLiteral(x) => (
            ConstValue::Float(if negate { -x } else { x }),
            accepts(ty, &[ScalarKind::Float, ScalarKind::Double]),
        ),
        TokenKind::CharLiteral(c) => (
            ConstValue::Char(c),
            !signed && accepts(ty, &[ScalarKind::Char]),
        ),
        TokenKind::StringLiteral(text) => {
            let valid = !signed
                && match text.chars().count() {
                    1 => accepts(ty, &[ScalarKind::Char]),
                    _ => p.state.checker.is_assignment_compatible(
                        ty,
                        &TypeDescriptor::array(TypeDescriptor::char(), text.chars().count()),
                    ),
                };
            (ConstValue::Str(text), valid)
        }
        TokenKind::Identifier(name) => {
            return parse_identifier_constant(p, ty, &name, negate, span);
        }
        _ => {
            p.state.error(ErrorCode::MissingConstant)?;
            return Ok(None);
        }
    };
    p.state.bump()?;

    if !valid {
        p.state.error_at(ErrorCode::InvalidConstant, span)?;
    }
    Ok(Some(value))
}

/// A constant defined by the name of another constant
fn parse_identifier_constant(
    p: &mut StatementParser<'_>,
    ty: &TypeDescriptor,
    name: &str,
    negate: bool,
    span: Span,
) -> PResult<Option<ConstValue>> {
    let node = p.state.symtab.lookup(name).cloned();
    p.state.bump()?;

    let Some(node) = node else {
        p.state.error_at(ErrorCode::UndefinedIdentifier, span)?;
        return Ok(None);
    };

    let value = match node.definition {
        Definition::Constant(value) => value,
        Definition::EnumConstant(n) => ConstValue::Int(n),
        _ => {
            p.state
                .error_at(ErrorCode::NotAConstantIdentifier, span)?;
            return Ok(None);
        }
    };

    let value = match (value, negate) {
        (ConstValue::Int(n), true) => match n.checked_neg() {
            Some(n) => ConstValue::Int(n),
            None => {
                p.state.error_at(ErrorCode::InvalidConstant, span)?;
                return Ok(None);
            }
        },
        (ConstValue::Float(x), true) => ConstValue::Float(-x),
        (value @ (ConstValue::Char(_) | ConstValue::Str(_) | ConstValue::Bool(_)), true) => {
            p.state.error_at(ErrorCode::InvalidConstant, span)?;
            value
        }
        (value, false) => value,
    };

    if !p.state.checker.is_assignment_compatible(ty, &node.ty) {
        p.state.error_at(ErrorCode::InvalidConstant, span)?;
    }
    Ok(Some(value))
}

/// Parse a directive after `#`: `include "path"`
pub fn parse_directive(p: &mut StatementParser<'_>) -> PResult {
    match p.state.kind() {
        TokenKind::KwInclude => {
            p.state.bump()?;
            let span = p.state.span();
            match p.state.kind().clone() {
                TokenKind::StringLiteral(path) => {
                    p.state.bump()?;
                    tracing::debug!("include request for \"{}\"", path);
                    p.state.request_include(path, span);
                    Ok(())
                }
                _ => p.state.error(ErrorCode::MissingConstant),
            }
        }
        _ => {
            p.state.error(ErrorCode::UnimplementedFeature)?;
            if !p.state.at_eof() {
                p.state.advance(false)?;
            }
            Ok(())
        }
    }
}
