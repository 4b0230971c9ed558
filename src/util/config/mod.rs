//! Front-end configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Project-level (cxfront.toml in the working directory)
//! 3. Default values
//! ```
//!
//! # Example
//!
//! ```toml
//! [parser]
//! max_errors = 10
//! code_segment_size = 8192
//! line_markers = false
//!
//! [diagnostics]
//! colors = false
//!
//! [log]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::util::diagnostic::DEFAULT_MAX_ERRORS;
use crate::util::logger::LogLevel;

/// Project config file name
pub const CONFIG_FILE_NAME: &str = "cxfront.toml";

/// Default capacity of the intermediate code stream, in units
pub const DEFAULT_CODE_SEGMENT_SIZE: usize = 4096;

/// Complete front-end configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Statement parser settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Errors tolerated before the routine-body pass is abandoned
    #[serde(default = "default_max_errors")]
    pub max_errors: usize,
    /// Maximum number of units in the intermediate code stream
    #[serde(default = "default_code_segment_size")]
    pub code_segment_size: usize,
    /// Emit a line marker at the start of each statement
    #[serde(default = "default_true")]
    pub line_markers: bool,
}

fn default_max_errors() -> usize {
    DEFAULT_MAX_ERRORS
}

fn default_code_segment_size() -> usize {
    DEFAULT_CODE_SEGMENT_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            code_segment_size: DEFAULT_CODE_SEGMENT_SIZE,
            line_markers: true,
        }
    }
}

/// Diagnostic rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Use ANSI colours
    #[serde(default = "default_true")]
    pub colors: bool,
    /// Show error codes in headers
    #[serde(default = "default_true")]
    pub show_codes: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            colors: true,
            show_codes: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Look for `cxfront.toml` in `dir`
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<FrontendConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<FrontendConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
