//! Parser state shared by the statement and expression parsers
//!
//! Bundles the collaborators every parse step touches: the token cursor,
//! the intermediate code stream, the symbol table, the type checker and
//! the error sink. Exactly one parse routine holds it at a time.

use crate::frontend::cursor::TokenCursor;
use crate::frontend::icode::{Icode, Marker};
use crate::frontend::symtab::SymbolTable;
use crate::frontend::tokens::{Token, TokenKind};
use crate::frontend::types::TypeChecker;
use crate::util::diagnostic::{ErrorCode, ErrorSink, PResult};
use crate::util::span::Span;
use crate::util::Spanned;

pub struct ParserState<'a> {
    pub cursor: &'a mut dyn TokenCursor,
    pub icode: &'a mut Icode,
    pub symtab: &'a mut SymbolTable,
    pub checker: &'a dyn TypeChecker,
    pub errors: &'a mut dyn ErrorSink,
    includes: Vec<Spanned<String>>,
}

impl<'a> ParserState<'a> {
    pub fn new(
        cursor: &'a mut dyn TokenCursor,
        icode: &'a mut Icode,
        symtab: &'a mut SymbolTable,
        checker: &'a dyn TypeChecker,
        errors: &'a mut dyn ErrorSink,
    ) -> Self {
        Self {
            cursor,
            icode,
            symtab,
            checker,
            errors,
            includes: Vec::new(),
        }
    }

    pub fn current(&self) -> &Token {
        self.cursor.current()
    }

    pub fn kind(&self) -> &TokenKind {
        &self.cursor.current().kind
    }

    pub fn span(&self) -> Span {
        self.cursor.current().span
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.cursor.at(kind)
    }

    pub fn at_eof(&self) -> bool {
        self.cursor.at_eof()
    }

    /// Consume the current token, recording it in the stream if `record`
    pub fn advance(
        &mut self,
        record: bool,
    ) -> PResult<Token> {
        let token = self.cursor.advance();
        if record && !token.is_eof() {
            self.icode.append_token(token.kind.clone())?;
        }
        Ok(token)
    }

    /// Consume and record the current token
    pub fn bump(&mut self) -> PResult<Token> {
        self.advance(true)
    }

    /// Consume and record `kind` if it is current; otherwise report `code`
    /// and leave the cursor where it is
    pub fn expect(
        &mut self,
        kind: &TokenKind,
        code: ErrorCode,
    ) -> PResult<bool> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            self.error(code)?;
            Ok(false)
        }
    }

    /// Consume and record `kind` if it is current
    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> PResult<bool> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume every consecutive statement separator
    pub fn skip_separators(&mut self) -> PResult {
        while self.at(&TokenKind::Semicolon) {
            self.bump()?;
        }
        Ok(())
    }

    /// Report `code` at the current token
    pub fn error(
        &mut self,
        code: ErrorCode,
    ) -> PResult {
        let span = self.span();
        self.errors.report(code, span)
    }

    pub fn error_at(
        &mut self,
        code: ErrorCode,
        span: Span,
    ) -> PResult {
        self.errors.report(code, span)
    }

    pub fn reserve_marker(&mut self) -> PResult<Marker> {
        self.icode.reserve_marker()
    }

    pub fn fixup(
        &mut self,
        marker: Marker,
    ) {
        self.icode.fixup(marker)
    }

    /// Record an `#include` request
    pub fn request_include(
        &mut self,
        path: String,
        span: Span,
    ) {
        self.includes.push(Spanned::new(path, span));
    }

    pub fn includes(&self) -> &[Spanned<String>] {
        &self.includes
    }

    pub fn take_includes(&mut self) -> Vec<Spanned<String>> {
        std::mem::take(&mut self.includes)
    }
}
