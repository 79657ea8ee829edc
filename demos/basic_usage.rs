//! Basic logger usage example
//!
//! Demonstrates a module logger, the leveled macros and per-logger filters.
//!
//! Run with: cargo run --example basic_usage

use scoped_logger::prelude::*;

declare_logger!("demo");

mod network {
    scoped_logger::declare_logger!("demo.network");

    pub fn connect(host: &str) {
        scoped_logger::debug!("resolving {}", host);
        scoped_logger::info!("connected to {}", host);
    }
}

fn main() -> Result<()> {
    println!("=== Scoped Logger - Basic Usage Example ===\n");

    println!("1. Before any configuration, records are dropped:");
    info!("nobody will see this");

    let config = LogConfig::new()
        .with_filter(SeverityLevel::Info)
        .with_logger_level("demo.network", SeverityLevel::Trace);
    let manager = LogManager::builder()
        .config(config)
        .appender(Box::new(ConsoleAppender::new()))
        .build()?;

    println!("\n2. Logging at different levels:");
    trace!("This is a trace message (hidden)");
    debug!("This is a debug message (hidden)");
    info!("This is an info message");
    warn!("This is a warning message");
    error!("This is an error message");
    fatal!("This is a fatal message");

    println!("\n3. A more verbose logger for one subsystem:");
    network::connect("example.org");

    println!("\n4. Explicit loggers work too:");
    let audit = Logger::new("demo.audit");
    warn!(audit, "user {} changed role to {}", "ada", "admin");

    manager.flush()?;
    drop(manager);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
