//! Configuration files driving the parser

use crate::common::{frontend, main_routine, words};
use cxfront::util::config::{find_config, load_config, CONFIG_FILE_NAME};
use cxfront::util::logger::LogLevel;
use std::fs;
use tempfile::TempDir;

fn write_config(
    dir: &TempDir,
    content: &str,
) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
}

#[test]
fn test_config_file_controls_line_markers() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "[parser]\nline_markers = false\n");

    let config = load_config(&find_config(dir.path()).unwrap()).unwrap();
    let outcome = frontend(config.parser)
        .parse_body(&words("total = 1 ;"), &main_routine())
        .unwrap();
    assert_eq!(outcome.icode.len(), 4);
}

#[test]
fn test_config_file_error_limit() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "[parser]\nmax_errors = 1\n\n[log]\nlevel = \"warn\"\n");

    let config = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config.log.level, LogLevel::Warn);
    assert!(config.diagnostics.show_codes);

    let err = frontend(config.parser)
        .parse_body(&words(") ; ) ;"), &main_routine())
        .unwrap_err();
    assert_eq!(err.diagnostics.len(), 2);
}

#[test]
fn test_unknown_value_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "[parser]\nmax_errors = \"many\"\n");
    assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).is_err());
}
