//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Severity text that is not one of the canonical tokens
    #[error("Invalid severity token: '{token}' (expected one of TRACE, DEBUG, INFO, WARN, ERROR, FATAL)")]
    InvalidSeverityToken { token: String },

    /// Malformed configuration with the offending source and details
    #[error("Configuration error in {source_name}: {message}")]
    Configuration {
        source_name: String,
        message: String,
    },

    /// Configuration source that could not be read
    #[error("Cannot read configuration '{path}': {source}")]
    ConfigurationIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A log manager is already installed on this log core
    #[error("Log core is already configured by another LogManager")]
    AlreadyConfigured,

    /// A sink could not deliver a record
    #[error("Sink '{sink}' failed: {message}")]
    SinkFailure { sink: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid severity token error
    pub fn invalid_severity(token: impl Into<String>) -> Self {
        LoggerError::InvalidSeverityToken {
            token: token.into(),
        }
    }

    /// Create a configuration error for the given source
    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an unreadable configuration error
    pub fn config_io(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::ConfigurationIo {
            path: path.into(),
            source,
        }
    }

    /// Create a sink failure error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkFailure {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// True for every error raised while loading or installing configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::Configuration { .. }
                | LoggerError::ConfigurationIo { .. }
                | LoggerError::InvalidSeverityToken { .. }
                | LoggerError::AlreadyConfigured
        )
    }
}
