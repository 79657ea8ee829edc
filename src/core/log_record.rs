//! Log record structure

use super::severity::SeverityLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::sync::Arc;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Source location of a logging call, captured where the macro is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: SeverityLevel,
    pub logger: Arc<str>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: String) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message;
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        level: SeverityLevel,
        logger: Arc<str>,
        call_site: &CallSite,
        message: String,
    ) -> Self {
        Self {
            level,
            logger,
            message: Self::sanitize_message(message),
            timestamp: Utc::now(),
            file: call_site.file,
            line: call_site.line,
            function: call_site.function,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn call_site(&self) -> CallSite {
        CallSite::new(self.file, self.line, self.function)
    }

    /// Thread name when the thread has one, otherwise its id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}
