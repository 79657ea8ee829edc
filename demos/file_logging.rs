//! File logging example
//!
//! Demonstrates configuring console, rotating and JSON sinks from TOML.
//!
//! Run with: cargo run --example file_logging

use scoped_logger::prelude::*;

const CONFIG: &str = r#"
[core]
filter = "DEBUG"
asynchronous = true
queue_capacity = 256

[[sinks]]
kind = "console"
filter = "WARN"

[[sinks]]
kind = "rotating_file"
path = "logs/application.log"
max_size = 4096
max_backups = 3
compress = true

[[sinks]]
kind = "json"
path = "logs/application.jsonl"
filter = "INFO"
"#;

declare_logger!("service");

fn main() -> Result<()> {
    println!("=== Scoped Logger - File Logging Example ===\n");

    let manager = LogManager::from_toml_str(CONFIG)?;

    println!("1. Logging to console (WARN+), rotating file and JSON:");
    info!("Application started");
    debug!("Loading configuration...");
    info!("Configuration loaded successfully");
    warn!("Using default settings for some options");
    error!("Failed to load optional plugin");

    println!("\n2. Writing enough records to trigger rotation:");
    for i in 0..200 {
        debug!("Processing batch item {}", i);
    }

    manager.flush()?;
    drop(manager);

    println!("\n   Log files written to logs/");
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
