//! Trace span example
//!
//! Demonstrates ENTER/EXIT records around functions, including early
//! returns, `?` propagation and nested spans.
//!
//! Run with: cargo run --example trace_spans

use scoped_logger::prelude::*;

declare_logger!("spans");

fn parse_port(text: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    auto_trace!();
    let port = text.parse::<u16>()?;
    debug!("parsed port {}", port);
    Ok(port)
}

fn start_server(config: &[&str]) {
    trace_span!(logger(), "start_server with {} entries", config.len());

    for entry in config {
        match parse_port(entry) {
            Ok(port) => info!("listening on {}", port),
            Err(e) => warn!("skipping '{}': {}", entry, e),
        }
    }
}

fn main() -> Result<()> {
    println!("=== Scoped Logger - Trace Span Example ===\n");

    let _manager = LogManager::from_toml_str(
        r#"
        [core]
        filter = "TRACE"

        [[sinks]]
        kind = "console"
        "#,
    )?;

    start_server(&["8080", "not-a-port", "9090"]);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
