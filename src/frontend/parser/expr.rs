//! Expression parsing
//!
//! The statement parser only needs the static type of each expression and
//! the tokens recorded in the stream, so expressions are typed on the fly
//! by binding power (precedence climbing) without building a tree.

use super::parser_state::ParserState;
use crate::frontend::symtab::Definition;
use crate::frontend::tokens::TokenKind;
use crate::frontend::types::{ScalarKind, TypeDescriptor, TypeForm};
use crate::util::diagnostic::{ErrorCode, PResult};
use crate::util::span::Span;

/// Binding power levels
pub const BP_LOWEST: u8 = 0;
pub const BP_ASSIGN: u8 = 1;
pub const BP_LOGICAL_OR: u8 = 2;
pub const BP_LOGICAL_AND: u8 = 3;
pub const BP_BIT_OR: u8 = 4;
pub const BP_BIT_XOR: u8 = 5;
pub const BP_BIT_AND: u8 = 6;
pub const BP_EQUALITY: u8 = 7;
pub const BP_COMPARISON: u8 = 8;
pub const BP_SHIFT: u8 = 9;
pub const BP_TERM: u8 = 10;
pub const BP_FACTOR: u8 = 11;
pub const BP_UNARY: u8 = 12;

/// Parses one expression, recording its tokens, and yields its static type
pub trait ExpressionParser {
    /// Parse an expression at the current token.
    ///
    /// Yields `Void` without consuming anything when the current token cannot
    /// start an expression.
    fn parse_expression(
        &mut self,
        state: &mut ParserState<'_>,
    ) -> PResult<TypeDescriptor>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryClass {
    Assign,
    Logical,
    Comparison,
    Arithmetic,
    Bitwise,
}

/// Left and right binding power of an infix operator
fn infix_info(kind: &TokenKind) -> Option<(u8, u8, BinaryClass)> {
    let info = match kind {
        // Assignment is right-associative
        k if k.is_assignment_op() => (BP_ASSIGN, BP_ASSIGN, BinaryClass::Assign),
        TokenKind::OrOr => (BP_LOGICAL_OR, BP_LOGICAL_OR + 1, BinaryClass::Logical),
        TokenKind::AndAnd => (BP_LOGICAL_AND, BP_LOGICAL_AND + 1, BinaryClass::Logical),
        TokenKind::Pipe => (BP_BIT_OR, BP_BIT_OR + 1, BinaryClass::Bitwise),
        TokenKind::Caret => (BP_BIT_XOR, BP_BIT_XOR + 1, BinaryClass::Bitwise),
        TokenKind::Amp => (BP_BIT_AND, BP_BIT_AND + 1, BinaryClass::Bitwise),
        TokenKind::EqEq | TokenKind::Neq => {
            (BP_EQUALITY, BP_EQUALITY + 1, BinaryClass::Comparison)
        }
        TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => {
            (BP_COMPARISON, BP_COMPARISON + 1, BinaryClass::Comparison)
        }
        TokenKind::Shl | TokenKind::Shr => (BP_SHIFT, BP_SHIFT + 1, BinaryClass::Bitwise),
        TokenKind::Plus | TokenKind::Minus => (BP_TERM, BP_TERM + 1, BinaryClass::Arithmetic),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
            (BP_FACTOR, BP_FACTOR + 1, BinaryClass::Arithmetic)
        }
        _ => return None,
    };
    Some(info)
}

/// Whether `kind` can start an expression
pub fn can_start_expression(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::CharLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::Identifier(_)
            | TokenKind::LParen
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Not
            | TokenKind::Tilde
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
    )
}

/// Operands may take part in arithmetic
fn is_arithmetic_operand(ty: &TypeDescriptor) -> bool {
    ty.is_numeric() || ty.is_dummy() || ty.scalar_kind() == Some(ScalarKind::Char)
}

/// Result type of `lhs op rhs` for an arithmetic operator
fn arithmetic_result(
    lhs: &TypeDescriptor,
    rhs: &TypeDescriptor,
) -> TypeDescriptor {
    if lhs.is_dummy() || rhs.is_dummy() {
        return TypeDescriptor::dummy();
    }
    let kinds = [lhs.scalar_kind(), rhs.scalar_kind()];
    if kinds.contains(&Some(ScalarKind::Double)) {
        TypeDescriptor::double()
    } else if kinds.contains(&Some(ScalarKind::Float)) {
        TypeDescriptor::float()
    } else {
        TypeDescriptor::integer()
    }
}

/// Expression parser that types operands and operators
#[derive(Debug, Clone, Copy, Default)]
pub struct OperandExpressionParser;

impl OperandExpressionParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_bp(
        &mut self,
        state: &mut ParserState<'_>,
        min_bp: u8,
    ) -> PResult<TypeDescriptor> {
        let mut lhs = self.parse_prefix(state)?;

        while let Some((left_bp, right_bp, class)) = infix_info(state.kind()) {
            if left_bp < min_bp {
                break;
            }
            let span = state.span();
            state.bump()?;
            let rhs = self.parse_bp(state, right_bp)?;
            lhs = self.combine(state, class, lhs, rhs, span)?;
        }

        Ok(lhs)
    }

    fn parse_prefix(
        &mut self,
        state: &mut ParserState<'_>,
    ) -> PResult<TypeDescriptor> {
        let span = state.span();
        match state.kind().clone() {
            TokenKind::IntLiteral(_) => {
                state.bump()?;
                Ok(TypeDescriptor::integer())
            }
            TokenKind::FloatLiteral(_) => {
                state.bump()?;
                Ok(TypeDescriptor::float())
            }
            TokenKind::CharLiteral(_) => {
                state.bump()?;
                Ok(TypeDescriptor::char())
            }
            TokenKind::StringLiteral(text) => {
                state.bump()?;
                let length = text.chars().count();
                if length == 1 {
                    Ok(TypeDescriptor::char())
                } else {
                    Ok(TypeDescriptor::array(TypeDescriptor::char(), length))
                }
            }
            TokenKind::Identifier(name) => self.parse_identifier(state, &name),
            TokenKind::LParen => {
                state.bump()?;
                let ty = self.parse_bp(state, BP_LOWEST)?;
                state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;
                Ok(ty)
            }
            TokenKind::Minus | TokenKind::Plus => {
                state.bump()?;
                let ty = self.parse_bp(state, BP_UNARY)?;
                if is_arithmetic_operand(&ty) {
                    Ok(ty)
                } else {
                    state.error_at(ErrorCode::IncompatibleTypes, span)?;
                    Ok(TypeDescriptor::dummy())
                }
            }
            TokenKind::Not => {
                state.bump()?;
                self.parse_bp(state, BP_UNARY)?;
                Ok(TypeDescriptor::boolean())
            }
            TokenKind::Tilde => {
                state.bump()?;
                self.parse_bp(state, BP_UNARY)?;
                Ok(TypeDescriptor::integer())
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                state.bump()?;
                self.parse_bp(state, BP_UNARY)
            }
            _ => {
                // Missing operand; leave the token for the caller
                state.error(ErrorCode::InvalidExpression)?;
                Ok(TypeDescriptor::dummy())
            }
        }
    }

    fn parse_identifier(
        &mut self,
        state: &mut ParserState<'_>,
        name: &str,
    ) -> PResult<TypeDescriptor> {
        let span = state.span();
        let node = state.symtab.lookup(name).cloned();
        state.bump()?;

        let ty = match node {
            None => {
                state.error_at(ErrorCode::UndefinedIdentifier, span)?;
                TypeDescriptor::dummy()
            }
            Some(node) => match node.definition {
                Definition::Routine(routine) => {
                    self.parse_call_arguments(state)?;
                    routine.return_type
                }
                Definition::Type => {
                    state.error_at(ErrorCode::InvalidExpression, span)?;
                    TypeDescriptor::dummy()
                }
                _ => node.ty,
            },
        };

        let ty = self.parse_subscripts(state, ty)?;
        if matches!(state.kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            state.bump()?;
        }
        Ok(ty)
    }

    /// `( [expr {, expr}] )` after a routine name
    fn parse_call_arguments(
        &mut self,
        state: &mut ParserState<'_>,
    ) -> PResult {
        if !state.skip(&TokenKind::LParen)? {
            return Ok(());
        }
        if !state.at(&TokenKind::RParen) {
            loop {
                self.parse_bp(state, BP_LOWEST)?;
                if !state.skip(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        state.expect(&TokenKind::RParen, ErrorCode::MissingRightParen)?;
        Ok(())
    }

    fn parse_subscripts(
        &mut self,
        state: &mut ParserState<'_>,
        mut ty: TypeDescriptor,
    ) -> PResult<TypeDescriptor> {
        while state.at(&TokenKind::LBracket) {
            let span = state.span();
            state.bump()?;
            let index = self.parse_bp(state, BP_LOWEST)?;
            if !state.checker.is_selector(&index) {
                state.error_at(ErrorCode::IncompatibleTypes, span)?;
            }
            state.expect(&TokenKind::RBracket, ErrorCode::MissingRightSubscript)?;

            ty = match ty.form {
                TypeForm::Array { element, .. } => *element,
                TypeForm::Dummy => TypeDescriptor::dummy(),
                _ => {
                    state.error_at(ErrorCode::IncompatibleTypes, span)?;
                    TypeDescriptor::dummy()
                }
            };
        }
        Ok(ty)
    }

    fn combine(
        &mut self,
        state: &mut ParserState<'_>,
        class: BinaryClass,
        lhs: TypeDescriptor,
        rhs: TypeDescriptor,
        span: Span,
    ) -> PResult<TypeDescriptor> {
        match class {
            BinaryClass::Assign => {
                if !state.checker.is_assignment_compatible(&lhs, &rhs) {
                    state.error_at(ErrorCode::IncompatibleAssignment, span)?;
                }
                Ok(lhs)
            }
            BinaryClass::Logical | BinaryClass::Comparison => Ok(TypeDescriptor::boolean()),
            BinaryClass::Bitwise => Ok(TypeDescriptor::integer()),
            BinaryClass::Arithmetic => {
                if is_arithmetic_operand(&lhs) && is_arithmetic_operand(&rhs) {
                    Ok(arithmetic_result(&lhs, &rhs))
                } else {
                    state.error_at(ErrorCode::IncompatibleTypes, span)?;
                    Ok(TypeDescriptor::dummy())
                }
            }
        }
    }
}

impl ExpressionParser for OperandExpressionParser {
    fn parse_expression(
        &mut self,
        state: &mut ParserState<'_>,
    ) -> PResult<TypeDescriptor> {
        if !can_start_expression(state.kind()) {
            return Ok(TypeDescriptor::void());
        }
        self.parse_bp(state, BP_LOWEST)
    }
}
