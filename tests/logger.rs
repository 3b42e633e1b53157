//! Integration tests for logger behavior.

use nutrinet::logger::{set_level, set_level_from_str, Level};
use nutrinet::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("DEBUG"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_directories() {
    use nutrinet::logger::init_file_logging;
    use std::fs;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("nutrinet.log");
    assert!(init_file_logging(&path));
    assert!(nutrinet::logger::is_file_logging_enabled());
    error!("written to file");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[ERROR] written to file"));
}

#[cfg(not(feature = "file-logging"))]
#[test]
fn file_logging_is_off_without_feature() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!nutrinet::logger::init_file_logging(&dir.path().join("nutrinet.log")));
    assert!(!nutrinet::logger::is_file_logging_enabled());
}
