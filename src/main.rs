//! Cx front end - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cxfront::util::config::{find_config, load_config, FrontendConfig};
use cxfront::util::diagnostic::{DiagnosticRenderer, EmitterConfig};
use cxfront::util::logger::{self, LogLevel};
use cxfront::{check_file, NAME, VERSION};

/// Statement parser and intermediate code emitter of the Cx compiler
#[derive(Parser, Debug)]
#[command(name = "cxfront")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ./cxfront.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a routine body given as a JSON token stream
    Check {
        /// Token stream file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the intermediate code stream
        #[arg(short, long)]
        dump: bool,

        /// Do not emit line markers
        #[arg(long)]
        no_line_markers: bool,
    },

    /// Print version information
    Version,
}

fn read_config(explicit: Option<&Path>) -> Result<FrontendConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(&std::env::current_dir().context("No working directory")?),
    };
    match path {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(FrontendConfig::default()),
    }
}

fn check(
    file: &Path,
    dump: bool,
    mut config: FrontendConfig,
) -> Result<bool> {
    let renderer = DiagnosticRenderer::with_config(EmitterConfig {
        use_colors: config.diagnostics.colors,
        show_codes: config.diagnostics.show_codes,
    });
    let file_name = file.display().to_string();
    let parser_config = std::mem::take(&mut config.parser);

    match check_file(file, parser_config)? {
        Ok(outcome) => {
            if dump {
                print!("{}", outcome.icode);
            }
            for include in &outcome.includes {
                println!("include \"{}\" ({})", include.value, include.span.start);
            }
            if outcome.has_errors() {
                eprint!("{}", renderer.render_all(&outcome.diagnostics, &file_name));
            }
            Ok(!outcome.has_errors())
        }
        Err(err) => {
            eprint!("{}", renderer.render_all(&err.diagnostics, &file_name));
            eprintln!("{}: {}", file_name, err.fatal);
            Ok(false)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = read_config(args.config.as_deref())?;
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log.level
    };
    logger::init_with_level(level);

    match args.command {
        Commands::Check {
            file,
            dump,
            no_line_markers,
        } => {
            let mut config = config;
            if no_line_markers {
                config.parser.line_markers = false;
            }
            let clean = check(&file, dump, config)
                .with_context(|| format!("Failed to check: {}", file.display()))?;
            if !clean {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(ExitCode::SUCCESS)
}
