//! Cx compiler front end
//!
//! Statement-level parsing of routine bodies into a linear intermediate code
//! stream with resolved forward references.
//!
//! # Example
//!
//! ```no_run
//! use cxfront::frontend::symtab::RoutineDescriptor;
//! use cxfront::frontend::types::TypeDescriptor;
//! use cxfront::frontend::Frontend;
//!
//! let tokens = Vec::new(); // produced by the scanner
//! let routine = RoutineDescriptor::new("main", TypeDescriptor::void());
//! let outcome = Frontend::new().parse_body(&tokens, &routine).unwrap();
//! assert!(!outcome.has_errors());
//! ```

#![doc(html_root_url = "https://docs.rs/cxfront")]
#![warn(rust_2018_idioms)]

pub mod frontend;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use frontend::{BodyError, Frontend, ParseOutcome};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use frontend::symtab::{RoutineDescriptor, SymbolNode};
use frontend::tokens::Token;
use frontend::types::TypeDescriptor;
use util::config::ParserConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "cxfront";

/// A variable visible to the routine body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// A routine body handed over by the scanner as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFile {
    pub routine: RoutineDescriptor,
    /// Variables declared outside the body
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    pub tokens: Vec<Token>,
}

impl BodyFile {
    /// Parse a body file from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid token stream")
    }

    /// Read a body file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to load: {}", path.display()))
    }
}

/// Parse the body described by `file` with `config`.
///
/// The outer `Result` carries load errors (redefined outer variables); the
/// inner one carries the parse result itself.
pub fn check_body(
    file: &BodyFile,
    config: ParserConfig,
) -> Result<std::result::Result<ParseOutcome, BodyError>> {
    let mut frontend = Frontend::with_config(config);
    for variable in &file.variables {
        frontend
            .symbols_mut()
            .enter_local(SymbolNode::variable(&variable.name, variable.ty.clone()))
            .with_context(|| format!("Invalid declaration of '{}'", variable.name))?;
    }

    debug!(
        "Checking '{}' with {} outer variable(s)",
        file.routine.name,
        file.variables.len()
    );
    Ok(frontend.parse_body(&file.tokens, &file.routine))
}

/// Read and parse a body file
pub fn check_file(
    path: &Path,
    config: ParserConfig,
) -> Result<std::result::Result<ParseOutcome, BodyError>> {
    let file = BodyFile::read(path)?;
    check_body(&file, config)
}
