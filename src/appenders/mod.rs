//! Appender implementations

pub mod console;
pub mod file;
pub mod json;
pub mod memory;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use json::JsonAppender;
pub use memory::MemoryAppender;
pub use rotating_file::{RotatingFileAppender, RotationPolicy};

pub use crate::core::Appender;
