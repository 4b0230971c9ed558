//! Unified diagnostics
//!
//! - [`codes`] - error code registry
//! - [`error`] - diagnostic data structure
//! - [`collect`] - error sink and collector
//! - [`result`] - fatal conditions and `PResult`

pub mod codes;
pub mod collect;
pub mod error;
pub mod result;

pub use codes::{ErrorCategory, ErrorCode};
pub use collect::{ErrorCollector, ErrorSink, DEFAULT_MAX_ERRORS};
pub use error::Diagnostic;
pub use result::{Fatal, PResult};

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Enable ANSI colours
    pub use_colors: bool,
    /// Show the `[Exxxx]` code in the header
    pub show_codes: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_codes: true,
        }
    }
}

/// Plain-text diagnostic renderer
#[derive(Debug, Clone)]
pub struct DiagnosticRenderer {
    config: EmitterConfig,
}

impl DiagnosticRenderer {
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
        }
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render one diagnostic
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        file_name: &str,
    ) -> String {
        let mut output = self.render_header(diagnostic);
        if !diagnostic.span.is_dummy() {
            output.push_str(&format!(
                "  --> {}:{}:{}\n",
                file_name, diagnostic.span.start.line, diagnostic.span.start.column
            ));
        }
        output
    }

    /// Render several diagnostics followed by a summary line
    pub fn render_all<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        file_name: &str,
    ) -> String {
        let mut output = String::new();
        let mut errors = 0;
        for diagnostic in diagnostics {
            errors += 1;
            output.push_str(&self.render(diagnostic, file_name));
        }
        output.push_str(&format!("{} syntax error(s)\n", errors));
        output
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = "error";
        if self.config.show_codes {
            format!(
                "{}{}: {}\n",
                self.color(severity, severity),
                self.color("bold", &format!("[{}]", diagnostic.code.code())),
                diagnostic.message
            )
        } else {
            format!("{}: {}\n", self.color(severity, severity), diagnostic.message)
        }
    }

    fn color(
        &self,
        style: &str,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }

        match style {
            "error" => format!("\x1b[31m{}\x1b[0m", text),
            "bold" => format!("\x1b[1m{}\x1b[0m", text),
            _ => text.to_string(),
        }
    }
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}
