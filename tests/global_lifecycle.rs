//! Lifecycle of the process-wide log core
//!
//! Everything here shares the global core, so it runs as one sequential
//! test in its own binary. Under `elide-debug` the spans vanish but the
//! lifecycle and INFO output are checked the same way.

#![cfg(not(feature = "disable-logging"))]

use scoped_logger::{
    auto_trace, declare_logger, info, LogCore, LogManager, LoggerError, SeverityLevel,
};
use std::fs;
use tempfile::TempDir;

declare_logger!("lifecycle");

mod worker {
    scoped_logger::declare_logger!(pub fn worker_logger, "lifecycle.worker");

    pub fn run(jobs: u32) -> Result<u32, String> {
        scoped_logger::trace_span!(worker_logger(), "run {} jobs", jobs);
        if jobs == 0 {
            return Err("nothing to do".to_string());
        }
        Ok(jobs * 2)
    }
}

fn traced_entry_point() {
    auto_trace!();
    info!("inside the entry point");
}

#[test]
fn test_global_lifecycle() {
    let core = LogCore::global();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("global.log");

    // Nothing installed: emissions vanish and are counted
    assert!(!core.is_configured());
    assert!(!logger().enabled(SeverityLevel::Fatal));
    logger().fatal("before configuration");
    assert_eq!(core.metrics().dropped_unconfigured(), 1);

    // A malformed configuration leaves the core unconfigured
    let bad_path = temp_dir.path().join("bad.toml");
    fs::write(&bad_path, "[core]\nfilter = \"LOUD\"\n[[sinks]]\nkind = \"console\"\n")
        .expect("Failed to write config");
    let err = LogManager::from_path(&bad_path).expect_err("Config should be rejected");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("bad.toml"));
    assert!(!core.is_configured());
    logger().error("still unconfigured");
    assert_eq!(core.metrics().dropped_unconfigured(), 2);

    // A missing file is a configuration error too
    assert!(LogManager::from_path(temp_dir.path().join("absent.toml"))
        .expect_err("Missing file should fail")
        .is_configuration());

    // Valid configuration
    let good_path = temp_dir.path().join("good.toml");
    fs::write(
        &good_path,
        format!(
            "[core]\nfilter = \"TRACE\"\n\n[[sinks]]\nkind = \"file\"\npath = \"{}\"\n",
            log_path.display()
        ),
    )
    .expect("Failed to write config");
    let manager = LogManager::from_path(&good_path).expect("Config should load");
    assert!(manager.is_active());
    assert!(core.is_configured());

    // Only one manager at a time
    assert!(matches!(
        LogManager::from_toml_str("[[sinks]]\nkind = \"console\"\n"),
        Err(LoggerError::AlreadyConfigured)
    ));
    assert!(core.is_configured());

    info!("hello {}", "world");
    assert_eq!(worker::run(3), Ok(6));
    assert!(worker::run(0).is_err());
    traced_entry_point();

    drop(manager);
    assert!(!core.is_configured());
    logger().info("after shutdown");
    assert_eq!(core.metrics().dropped_unconfigured(), 3);

    let content = fs::read_to_string(&log_path).expect("Failed to read log");
    let lines: Vec<&str> = content.lines().collect();
    if SeverityLevel::Trace.is_elided() {
        assert_eq!(lines.len(), 2, "{}", content);
        assert!(lines[0].contains("lifecycle - hello world (global_lifecycle::test_global_lifecycle @ tests/global_lifecycle.rs:"));
        assert!(lines[1].contains("inside the entry point"));
        assert!(!content.contains("ENTER"));
        assert!(!content.contains("EXIT"));
    } else {
        assert_eq!(lines.len(), 8, "{}", content);
        assert!(lines[0].contains("lifecycle - hello world (global_lifecycle::test_global_lifecycle @ tests/global_lifecycle.rs:"));
        assert!(lines[1].contains("lifecycle.worker - ENTER: run 3 jobs (global_lifecycle::worker::run"));
        assert!(lines[2].contains("EXIT: run 3 jobs"));
        assert!(lines[3].contains("ENTER: run 0 jobs"));
        assert!(lines[4].contains("EXIT: run 0 jobs"));
        assert!(lines[5].contains("ENTER: global_lifecycle::traced_entry_point"));
        assert!(lines[6].contains("inside the entry point"));
        assert!(lines[7].contains("EXIT: global_lifecycle::traced_entry_point"));
    }
    assert!(!content.contains("before configuration"));
    assert!(!content.contains("after shutdown"));

    // The core can be configured again once the previous manager is gone
    let again = LogManager::from_reader("[[sinks]]\nkind = \"console\"\ncolors = false\n".as_bytes())
        .expect("Reconfiguration should succeed");
    assert!(again.is_active());
    assert_eq!(core.metrics().installs(), 2);
}
