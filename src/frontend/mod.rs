//! Compiler front end
//!
//! Turns the token stream of a routine body into checked control-flow
//! structure and a linear intermediate code stream with resolved forward
//! references. Scanning happens elsewhere; tokens arrive ready-made.

use thiserror::Error;
use tracing::{debug, warn};

pub mod cursor;
pub mod icode;
pub mod parser;
pub mod symtab;
pub mod tokens;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use crate::util::config::ParserConfig;
use crate::util::diagnostic::{Diagnostic, ErrorCollector, ErrorSink, Fatal};
use crate::util::Spanned;
use cursor::SliceCursor;
use icode::Icode;
use parser::{OperandExpressionParser, ParserState, StatementParser};
use symtab::{RoutineDescriptor, SymbolNode, SymbolTable};
use tokens::Token;
use types::StandardTypeChecker;

/// Result of parsing one routine body
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Emitted intermediate code
    pub icode: Icode,
    /// Reported errors, in report order
    pub diagnostics: Vec<Diagnostic>,
    /// `#include` requests, in source order
    pub includes: Vec<Spanned<String>>,
    /// Symbols declared in the body
    pub locals: Vec<SymbolNode>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// A routine-body parse that was abandoned
#[derive(Debug, Error)]
#[error("{fatal} ({} error(s) reported)", .diagnostics.len())]
pub struct BodyError {
    pub fatal: Fatal,
    /// Errors reported before the abort
    pub diagnostics: Vec<Diagnostic>,
}

/// Front-end context
#[derive(Debug, Default)]
pub struct Frontend {
    config: ParserConfig,
    symbols: SymbolTable,
}

impl Frontend {
    /// Create a front end with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            symbols: SymbolTable::with_predefined(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Symbols visible to every routine body
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Parse the statements of `routine`'s body.
    ///
    /// Body declarations live in a scope of their own that is discarded
    /// afterwards and returned in [`ParseOutcome::locals`].
    pub fn parse_body(
        &mut self,
        tokens: &[Token],
        routine: &RoutineDescriptor,
    ) -> Result<ParseOutcome, BodyError> {
        debug!(
            "Parsing body of '{}' ({} tokens)",
            routine.name,
            tokens.len()
        );

        let mut cursor = SliceCursor::new(tokens);
        let mut icode = Icode::with_capacity(self.config.code_segment_size);
        let mut errors = ErrorCollector::with_limit(self.config.max_errors);
        let mut exprs = OperandExpressionParser::new();
        let checker = StandardTypeChecker;

        self.symbols.enter_scope();
        let (result, includes) = {
            let state = ParserState::new(
                &mut cursor,
                &mut icode,
                &mut self.symbols,
                &checker,
                &mut errors,
            );
            let mut parser = StatementParser::new(state, &mut exprs, routine)
                .with_line_markers(self.config.line_markers);
            let result = parser.parse_body();
            (result, parser.state.take_includes())
        };
        let locals = self
            .symbols
            .exit_scope()
            .map(|scope| scope.into_values().collect())
            .unwrap_or_default();

        match result {
            Ok(()) => {
                debug!(
                    "Parsed '{}': {} units, {} error(s)",
                    routine.name,
                    icode.len(),
                    errors.error_count()
                );
                Ok(ParseOutcome {
                    icode,
                    diagnostics: errors.into_diagnostics(),
                    includes,
                    locals,
                })
            }
            Err(fatal) => {
                warn!("Parsing of '{}' abandoned: {}", routine.name, fatal);
                Err(BodyError {
                    fatal,
                    diagnostics: errors.into_diagnostics(),
                })
            }
        }
    }
}
