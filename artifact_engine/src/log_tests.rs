//! Unit tests for log.rs
//!
//! Severity ordering, parsing and the console logger. Global sink behaviour is
//! covered by tests/logging_integration_tests.rs.

use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::error::Error;
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "artifact::test".to_string(),
        message: "message".to_string(),
        file,
        line,
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

#[test]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

#[test]
fn test_severity_display_is_trimmed() {
    assert_eq!(LogSeverity::Info.to_string(), "INFO");
    assert_eq!(LogSeverity::Error.to_string(), "ERROR");
}

#[test]
fn test_severity_parse() {
    assert_eq!("trace".parse::<LogSeverity>().unwrap(), LogSeverity::Trace);
    assert_eq!("DEBUG".parse::<LogSeverity>().unwrap(), LogSeverity::Debug);
    assert_eq!(" Info ".parse::<LogSeverity>().unwrap(), LogSeverity::Info);
    assert_eq!("warning".parse::<LogSeverity>().unwrap(), LogSeverity::Warn);
    assert_eq!("warn".parse::<LogSeverity>().unwrap(), LogSeverity::Warn);
    assert_eq!("error".parse::<LogSeverity>().unwrap(), LogSeverity::Error);
}

#[test]
fn test_severity_parse_unknown() {
    let result = "verbose".parse::<LogSeverity>();
    match result {
        Err(Error::InitializationFailed(msg)) => assert!(msg.contains("verbose")),
        other => panic!("unexpected result: {:?}", other),
    }
}

// ============================================================================
// DEFAULT LOGGER
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Debug, None, None));
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));
    logger.log(&entry(LogSeverity::Error, Some("flow/frame_session.rs"), Some(42)));
}

#[test]
fn test_log_entry_clone() {
    let original = entry(LogSeverity::Error, Some("file.rs"), Some(7));
    let copy = original.clone();
    assert_eq!(copy.severity, LogSeverity::Error);
    assert_eq!(copy.source, original.source);
    assert_eq!(copy.file, Some("file.rs"));
    assert_eq!(copy.line, Some(7));
}
