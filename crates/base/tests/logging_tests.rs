use base::logging::{FileLogger, StdoutLogger, format_record, format_timestamp, format_today};
use log::Log;
use std::fs;

fn record_args<'a>(args: std::fmt::Arguments<'a>) -> log::Record<'a> {
    log::RecordBuilder::new()
        .level(log::Level::Warn)
        .target("test")
        .file(Some("session.rs"))
        .line(Some(42))
        .args(args)
        .build()
}

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger;
    let metadata = log::MetadataBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .build();
    assert!(logger.enabled(&metadata));

    logger.log(&record_args(format_args!("stdout message")));
    logger.flush();
}

#[test]
fn test_format_record_contains_location_and_level() {
    let line = format_record(&record_args(format_args!("retrying preview")));
    assert!(line.contains("WARN"));
    assert!(line.contains("session.rs:42"));
    assert!(line.ends_with("retrying preview"));
}

#[test]
fn test_format_timestamp_structure() {
    let ts = format_timestamp();
    assert_eq!(ts.len(), 19);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[7..8], "-");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[13..14], ":");
    assert_eq!(&ts[16..17], ":");
}

#[test]
fn test_file_logger_creates_directory() {
    let dir = std::env::temp_dir().join(format!("base-log-test-{}-dir", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let _logger = FileLogger::new(&dir).expect("Failed to create FileLogger");
    assert!(dir.is_dir());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_file_logger_writes_to_dated_file() {
    let dir = std::env::temp_dir().join(format!("base-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = FileLogger::new(&dir).expect("Failed to create FileLogger");
    logger.log(&record_args(format_args!("first line")));
    logger.log(&record_args(format_args!("second line")));
    logger.flush();

    let content = fs::read_to_string(dir.join(format!("{}.log", format_today()))).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("first line"));
    assert!(content.contains("second line"));

    fs::remove_dir_all(&dir).ok();
}
