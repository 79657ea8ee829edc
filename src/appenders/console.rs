//! Console appender implementation

use crate::core::output_format::format_text_with;
use crate::core::{Appender, LogRecord, OutputFormat, Result, SeverityLevel, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    /// Colors only take effect when the `console` feature is enabled
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use scoped_logger::appenders::ConsoleAppender;
    /// use scoped_logger::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let level = format!("{:5}", record.level);
        #[cfg(feature = "console")]
        let level = if self.use_colors {
            level.color(record.level.color_code()).to_string()
        } else {
            level
        };

        format_text_with(record, &self.timestamp_format.format(&record.timestamp), &level)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = match self.output_format {
            OutputFormat::Text => self.format_text(record),
            OutputFormat::Json | OutputFormat::Logfmt => {
                self.output_format.format(record, &self.timestamp_format)
            }
        };

        // Route Error and Fatal levels to stderr, others to stdout
        match record.level {
            SeverityLevel::Error | SeverityLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
