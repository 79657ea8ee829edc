//! Logging macros with call-site capture.
//!
//! Every macro records `file!()`, `line!()` and the enclosing function path,
//! and builds its message only when the target logger would accept it.
//! TRACE and DEBUG call sites, spans included, compile to nothing under the
//! `elide-debug` feature; every call site does under `disable-logging`.
//!
//! The leveled macros take an explicit logger first, or just a format
//! string, in which case they call the `logger()` function that
//! [`declare_logger!`] defines in the calling module.
//!
//! # Examples
//!
//! ```
//! use scoped_logger::{declare_logger, info, warn, Logger};
//!
//! declare_logger!("server");
//!
//! fn start(port: u16) {
//!     // Module logger
//!     info!("listening on port {}", port);
//!
//!     // Explicit logger
//!     let audit = Logger::new("server.audit");
//!     warn!(audit, "port {} is privileged", port);
//! }
//!
//! start(80);
//! ```

/// Path of the enclosing function, e.g. `my_crate::net::connect`.
///
/// Closure frames are stripped, so the value inside a closure is the path
/// of the function that contains it.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __function_marker() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::__private::enclosing_function(__type_name_of(__function_marker))
    }};
}

/// [`CallSite`](crate::CallSite) for the current source location
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), $crate::function_name!())
    };
}

/// Define a lazily created logger accessor in the calling module.
///
/// `declare_logger!("name")` defines `fn logger() -> &'static Logger`;
/// `declare_logger!(pub fn net_logger, "net")` picks the accessor's name and
/// visibility. With no arguments the module path is used as the logger name.
/// The logger is built on first call, exactly once, and bound to the global
/// log core.
///
/// ```
/// use scoped_logger::declare_logger;
///
/// mod storage {
///     scoped_logger::declare_logger!(pub fn storage_logger, "storage");
/// }
///
/// declare_logger!("app");
///
/// assert_eq!(logger().name(), "app");
/// assert_eq!(storage::storage_logger().name(), "storage");
/// assert!(std::ptr::eq(logger(), logger()));
/// ```
#[macro_export]
macro_rules! declare_logger {
    ($vis:vis fn $accessor:ident, $name:expr) => {
        $vis fn $accessor() -> &'static $crate::Logger {
            static LOGGER: $crate::LazyLogger = $crate::LazyLogger::new($name);
            LOGGER.get()
        }
    };
    () => {
        $crate::declare_logger!(fn logger, module_path!());
    };
    ($name:expr) => {
        $crate::declare_logger!(fn logger, $name);
    };
}

/// Log a formatted message at a runtime severity.
///
/// ```
/// use scoped_logger::{log, Logger, SeverityLevel};
///
/// let logger = Logger::new("jobs");
/// let level = SeverityLevel::Warn;
/// log!(logger, level, "queue depth {}", 512);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let __level: $crate::SeverityLevel = $level;
        if !__level.is_elided() {
            let __logger: &$crate::Logger = &$logger;
            if __logger.enabled(__level) {
                __logger.emit(
                    __level,
                    file!(),
                    line!(),
                    $crate::function_name!(),
                    format!($($arg)+),
                );
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $logger:expr, $($arg:tt)+) => {{
        if !$crate::SeverityLevel::$level.is_elided() {
            let __logger: &$crate::Logger = &$logger;
            if __logger.enabled($crate::SeverityLevel::$level) {
                __logger.emit(
                    $crate::SeverityLevel::$level,
                    file!(),
                    line!(),
                    $crate::function_name!(),
                    format!($($arg)+),
                );
            }
        }
    }};
}

/// Log at TRACE. Compiled out under `elide-debug`.
#[macro_export]
macro_rules! trace {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Trace, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Trace, $logger, $($arg)+)
    };
}

/// Log at DEBUG. Compiled out under `elide-debug`.
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Debug, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Debug, $logger, $($arg)+)
    };
}

/// Log at INFO.
///
/// ```
/// use scoped_logger::{info, Logger};
///
/// let logger = Logger::new("app");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Info, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Info, $logger, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Warn, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Warn, $logger, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Error, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Error, $logger, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($rest:tt)*) => {
        $crate::__log_at!(Fatal, logger(), $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(Fatal, $logger, $($arg)+)
    };
}

/// Open a [`TraceSpan`](crate::TraceSpan) that lasts until the end of the
/// enclosing block.
///
/// No span is created, and the message is not formatted, when the logger
/// does not accept TRACE at entry, so ENTER and EXIT always come in pairs.
///
/// ```
/// use scoped_logger::{trace_span, Logger};
///
/// fn checkout(logger: &Logger, cart: u32) -> Result<(), String> {
///     trace_span!(logger, "checkout cart {}", cart);
///     if cart == 0 {
///         return Err("empty cart".into());
///     }
///     Ok(())
/// }
///
/// assert!(checkout(&Logger::new("shop"), 0).is_err());
/// ```
#[macro_export]
macro_rules! trace_span {
    ($logger:expr, $($arg:tt)+) => {
        let __trace_span = if $crate::SeverityLevel::Trace.is_elided() {
            ::core::option::Option::None
        } else {
            let __logger: &$crate::Logger = &$logger;
            if __logger.enabled($crate::SeverityLevel::Trace) {
                ::core::option::Option::Some($crate::TraceSpan::enter(
                    __logger,
                    format!($($arg)+),
                    $crate::call_site!(),
                ))
            } else {
                ::core::option::Option::None
            }
        };
    };
}

/// Trace span named after the enclosing function.
///
/// `auto_trace!()` uses the module's `logger()`; `auto_trace!(logger)` an
/// explicit one.
#[macro_export]
macro_rules! auto_trace {
    () => {
        $crate::trace_span!(logger(), "{}", $crate::function_name!());
    };
    ($logger:expr) => {
        $crate::trace_span!($logger, "{}", $crate::function_name!());
    };
}
