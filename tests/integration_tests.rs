//! Integration tests for the scoped logger
//!
//! These tests verify:
//! - Configuration from TOML into real file sinks
//! - Per-logger and per-sink filtering
//! - Emission order in synchronous and asynchronous modes
//! - Trace spans through the public macros
//! - Log injection prevention
//! - INFO and above still delivered when `elide-debug` is enabled
//!
//! Each test installs into its own `LogCore`; the global core is covered
//! by `global_lifecycle.rs`, which runs in a separate process.

#![cfg(not(feature = "disable-logging"))]

use scoped_logger::appenders::MemoryAppender;
use scoped_logger::{
    info, trace_span, warn, LogConfig, LogCore, LogManager, Logger, OutputFormat, SeverityLevel,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn memory_manager(config: LogConfig) -> (Arc<LogCore>, LogManager, MemoryAppender) {
    let core = LogCore::new();
    let memory = MemoryAppender::new();
    let manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(config)
        .appender(Box::new(memory.clone()))
        .build()
        .expect("Failed to build manager");
    (core, manager, memory)
}

#[test]
#[cfg(not(feature = "elide-debug"))]
fn test_toml_configured_file_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let text_log = temp_dir.path().join("app.log");
    let json_log = temp_dir.path().join("app.jsonl");

    let toml = format!(
        r#"
        [core]
        filter = "DEBUG"

        [[sinks]]
        kind = "file"
        path = "{}"
        format = "logfmt"
        timestamp = "unix"

        [[sinks]]
        kind = "json"
        path = "{}"
        filter = "WARN"
        "#,
        text_log.display(),
        json_log.display()
    );
    let config = LogConfig::from_toml_str(&toml, "inline").expect("Failed to parse config");

    let core = LogCore::new();
    let manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(config)
        .build()
        .expect("Failed to build manager");

    let logger = Logger::with_core("payments", Arc::clone(&core));
    logger.trace("hidden");
    logger.debug("charging card");
    warn!(logger, "card {} declined", 42);
    manager.flush().expect("Failed to flush");
    drop(manager);

    let text = fs::read_to_string(&text_log).expect("Failed to read text log");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("level=DEBUG"));
    assert!(lines[0].contains("logger=payments"));
    assert!(lines[1].contains("message=\"card 42 declined\""));
    assert!(!text.contains("hidden"));

    let json = fs::read_to_string(&json_log).expect("Failed to read json log");
    let entries: Vec<serde_json::Value> = json
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "WARN");
    assert_eq!(entries[0]["message"], "card 42 declined");
    assert_eq!(entries[0]["file"], file!());
}

#[test]
fn test_rotating_sink_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("logs").join("rotating.log");

    let toml = format!(
        r#"
        [[sinks]]
        kind = "rotating_file"
        path = "{}"
        max_size = 200
        max_backups = 2
        "#,
        log_path.display()
    );

    let core = LogCore::new();
    let manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(LogConfig::from_toml_str(&toml, "rotating").expect("Failed to parse"))
        .build()
        .expect("Failed to build manager");

    let logger = Logger::with_core("rotate", Arc::clone(&core));
    for i in 0..30 {
        logger.info(format!("rotating entry number {}", i));
    }
    drop(manager);

    assert!(log_path.exists());
    assert!(temp_dir.path().join("logs").join("rotating.log.1").exists());
    assert!(temp_dir.path().join("logs").join("rotating.log.2").exists());
    assert!(!temp_dir.path().join("logs").join("rotating.log.3").exists());
}

#[test]
#[cfg(not(feature = "elide-debug"))]
fn test_per_logger_overrides() {
    let config = LogConfig::new()
        .with_filter(SeverityLevel::Warn)
        .with_logger_level("net", SeverityLevel::Debug)
        .with_logger_level("net.noisy", SeverityLevel::Error);
    let (core, _manager, memory) = memory_manager(config);

    Logger::with_core("app", Arc::clone(&core)).info("app info");
    Logger::with_core("net.http", Arc::clone(&core)).debug("http debug");
    Logger::with_core("network", Arc::clone(&core)).debug("not a child of net");
    Logger::with_core("net.noisy.socket", Arc::clone(&core)).warn("noisy warn");
    Logger::with_core("net.noisy", Arc::clone(&core)).error("noisy error");

    assert_eq!(memory.messages(), vec!["http debug", "noisy error"]);
    assert_eq!(core.metrics().filtered(), 3);
}

#[test]
fn test_sync_emission_order() {
    let (core, _manager, memory) = memory_manager(LogConfig::new());
    let logger = Logger::with_core("order", core);

    info!(logger, "A");
    info!(logger, "B");
    info!(logger, "C");

    assert_eq!(memory.messages(), vec!["A", "B", "C"]);
}

#[test]
fn test_async_emission_order() {
    let (core, manager, memory) = memory_manager(LogConfig::new().with_async(4));
    let logger = Logger::with_core("order.async", core);

    for i in 0..500 {
        info!(logger, "{}", i);
    }
    manager.flush().expect("Failed to flush");

    let expected: Vec<String> = (0..500).map(|i| i.to_string()).collect();
    assert_eq!(memory.messages(), expected);
}

#[test]
fn test_async_drop_drains_queue() {
    let (core, manager, memory) = memory_manager(LogConfig::new().with_async(16));
    let logger = Logger::with_core("drain", Arc::clone(&core));

    for i in 0..200 {
        logger.info(format!("queued {}", i));
    }
    drop(manager);

    assert_eq!(memory.len(), 200);
    assert!(!core.is_configured());
    logger.info("after shutdown");
    assert_eq!(memory.len(), 200);
    assert_eq!(core.metrics().dropped_unconfigured(), 1);
}

#[test]
#[cfg(not(feature = "elide-debug"))]
fn test_trace_span_pairs_across_threads() {
    let (core, _manager, memory) =
        memory_manager(LogConfig::new().with_filter(SeverityLevel::Trace));
    let logger = Logger::with_core("spans", core);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    trace_span!(logger, "job {}-{}", t, i);
                    logger.debug(format!("working {}-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let records = memory.records();
    assert_eq!(records.len(), 300);
    for t in 0..4 {
        let thread_messages: Vec<String> = records
            .iter()
            .filter(|r| r.message.contains(&format!(" {}-", t)))
            .map(|r| r.message.clone())
            .collect();
        for (i, chunk) in thread_messages.chunks(3).enumerate() {
            assert_eq!(chunk[0], format!("ENTER: job {}-{}", t, i));
            assert_eq!(chunk[1], format!("working {}-{}", t, i));
            assert_eq!(chunk[2], format!("EXIT: job {}-{}", t, i));
        }
    }
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let toml = format!(
        "[[sinks]]\nkind = \"file\"\npath = \"{}\"\nformat = \"{}\"\n",
        log_file.display(),
        "text"
    );
    let core = LogCore::new();
    let manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(LogConfig::from_toml_str(&toml, "injection").expect("Failed to parse"))
        .build()
        .expect("Failed to build manager");

    Logger::with_core("auth", core)
        .info("User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation");
    drop(manager);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_sink_failure_is_isolated() {
    struct BrokenAppender;

    impl scoped_logger::Appender for BrokenAppender {
        fn append(&mut self, _record: &scoped_logger::LogRecord) -> scoped_logger::Result<()> {
            Err(scoped_logger::LoggerError::sink("broken", "disk on fire"))
        }
        fn flush(&mut self) -> scoped_logger::Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    let core = LogCore::new();
    let memory = MemoryAppender::new();
    let _manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(LogConfig::new())
        .appender(Box::new(BrokenAppender))
        .appender(Box::new(memory.clone()))
        .build()
        .expect("Failed to build manager");

    let logger = Logger::with_core("resilient", Arc::clone(&core));
    logger.info("still delivered");

    assert_eq!(memory.messages(), vec!["still delivered"]);
    assert_eq!(core.metrics().sink_failures(), 1);
}

#[test]
fn test_output_format_tokens() {
    let config = LogConfig::from_toml_str(
        "[[sinks]]\nkind = \"console\"\nformat = \"json\"\ntimestamp = \"custom:%H:%M\"\n",
        "formats",
    )
    .expect("Failed to parse");
    match &config.sinks[0] {
        scoped_logger::SinkConfig::Console(console) => {
            assert_eq!(console.format, OutputFormat::Json);
        }
        other => panic!("unexpected sink {:?}", other),
    }
}

#[test]
#[cfg(feature = "elide-debug")]
fn test_elided_build_delivers_info_and_above() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("elided.log");
    let toml = format!(
        "[core]\nfilter = \"TRACE\"\n\n[[sinks]]\nkind = \"file\"\npath = \"{}\"\n",
        log_path.display()
    );

    let core = LogCore::new();
    let memory = MemoryAppender::new();
    let manager = LogManager::builder()
        .core(Arc::clone(&core))
        .config(LogConfig::from_toml_str(&toml, "elided").expect("Failed to parse"))
        .appender(Box::new(memory.clone()))
        .build()
        .expect("Failed to build manager");

    let logger = Logger::with_core("release", Arc::clone(&core));
    scoped_logger::trace!(logger, "trace {}", 1);
    scoped_logger::debug!(logger, "debug {}", 2);
    logger.debug("debug method");
    {
        trace_span!(logger, "span");
        info!(logger, "info {}", 3);
    }
    warn!(logger, "warn {}", 4);
    logger.error("error method");
    drop(manager);

    assert_eq!(memory.messages(), vec!["info 3", "warn 4", "error method"]);
    assert_eq!(core.metrics().filtered(), 0);

    let text = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("debug"));
    assert!(!text.contains("ENTER"));
}
