//! Output format configuration for log records
//!
//! Provides different output formats for log records:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use serde::Deserialize;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] [main] net - Request processed (app::serve @ src/net.rs:42)`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"INFO","logger":"net",...}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO logger=net message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Format a log record according to this output format
    pub fn format(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => format_text(record, &timestamp_format.format(&record.timestamp)),
            OutputFormat::Json => format_json(record, timestamp_format),
            OutputFormat::Logfmt => format_logfmt(record, timestamp_format),
        }
    }
}

/// Plain text line with an already formatted timestamp and level column
pub(crate) fn format_text_with(record: &LogRecord, timestamp: &str, level: &str) -> String {
    format!(
        "[{}] [{}] [{}] {} - {} ({} @ {}:{})",
        timestamp,
        level,
        record.thread_label(),
        record.logger,
        record.message,
        record.function,
        record.file,
        record.line
    )
}

fn format_text(record: &LogRecord, timestamp: &str) -> String {
    format_text_with(record, timestamp, &format!("{:5}", record.level))
}

fn format_json(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
    let mut json_obj = serde_json::Map::new();

    let timestamp = match timestamp_format {
        TimestampFormat::Unix => serde_json::Value::Number(record.timestamp.timestamp().into()),
        TimestampFormat::UnixMillis => {
            serde_json::Value::Number(record.timestamp.timestamp_millis().into())
        }
        _ => serde_json::Value::String(timestamp_format.format(&record.timestamp)),
    };
    json_obj.insert("timestamp".to_string(), timestamp);
    json_obj.insert("level".to_string(), record.level.as_str().into());
    json_obj.insert("logger".to_string(), record.logger.to_string().into());
    json_obj.insert("message".to_string(), record.message.clone().into());
    json_obj.insert("file".to_string(), record.file.into());
    json_obj.insert("line".to_string(), record.line.into());
    json_obj.insert("function".to_string(), record.function.into());
    json_obj.insert("thread_id".to_string(), record.thread_id.clone().into());
    if let Some(ref name) = record.thread_name {
        json_obj.insert("thread_name".to_string(), name.clone().into());
    }

    serde_json::Value::Object(json_obj).to_string()
}

fn format_logfmt(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
    let mut parts = vec![
        format!(
            "timestamp={}",
            escape_logfmt_value(&timestamp_format.format(&record.timestamp))
        ),
        format!("level={}", record.level.as_str()),
        format!("logger={}", escape_logfmt_value(&record.logger)),
        // Message is always quoted
        format!("message={}", quote_logfmt_value(&record.message)),
        format!("file={}", escape_logfmt_value(record.file)),
        format!("line={}", record.line),
        format!("function={}", escape_logfmt_value(record.function)),
        format!("thread_id={}", escape_logfmt_value(&record.thread_id)),
    ];
    if let Some(ref name) = record.thread_name {
        parts.push(format!("thread_name={}", escape_logfmt_value(name)));
    }

    parts.join(" ")
}

/// Quote a logfmt value when it contains spaces, quotes or `=`
fn escape_logfmt_value(value: &str) -> String {
    if value.contains([' ', '"', '=']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
