//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered record severity, `Trace` lowest and `Fatal` highest.
///
/// The text tokens are part of the configuration format and never change.
/// Parsing is an exact, case-sensitive match on those tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum SeverityLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 6] = [
        SeverityLevel::Trace,
        SeverityLevel::Debug,
        SeverityLevel::Info,
        SeverityLevel::Warn,
        SeverityLevel::Error,
        SeverityLevel::Fatal,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Trace => "TRACE",
            SeverityLevel::Debug => "DEBUG",
            SeverityLevel::Info => "INFO",
            SeverityLevel::Warn => "WARN",
            SeverityLevel::Error => "ERROR",
            SeverityLevel::Fatal => "FATAL",
        }
    }

    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SeverityLevel::Trace),
            1 => Some(SeverityLevel::Debug),
            2 => Some(SeverityLevel::Info),
            3 => Some(SeverityLevel::Warn),
            4 => Some(SeverityLevel::Error),
            5 => Some(SeverityLevel::Fatal),
            _ => None,
        }
    }

    /// Whether call sites at this level are compiled out of the current build.
    ///
    /// `elide-debug` removes TRACE and DEBUG; `disable-logging` removes all.
    pub const fn is_elided(&self) -> bool {
        if crate::__private::LOGGING_DISABLED {
            return true;
        }
        crate::__private::DEBUG_ELIDED
            && matches!(self, SeverityLevel::Trace | SeverityLevel::Debug)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            SeverityLevel::Trace => BrightBlack,
            SeverityLevel::Debug => Blue,
            SeverityLevel::Info => Green,
            SeverityLevel::Warn => Yellow,
            SeverityLevel::Error => Red,
            SeverityLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRACE" => Ok(SeverityLevel::Trace),
            "DEBUG" => Ok(SeverityLevel::Debug),
            "INFO" => Ok(SeverityLevel::Info),
            "WARN" => Ok(SeverityLevel::Warn),
            "ERROR" => Ok(SeverityLevel::Error),
            "FATAL" => Ok(SeverityLevel::Fatal),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}

impl From<SeverityLevel> for &'static str {
    fn from(level: SeverityLevel) -> Self {
        level.as_str()
    }
}

impl TryFrom<String> for SeverityLevel {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tokens() {
        let tokens: Vec<&str> = SeverityLevel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(tokens, ["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "FATAL"]);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("WARN".parse::<SeverityLevel>().unwrap(), SeverityLevel::Warn);
        for bad in ["trace", "Warn", "WARNING", "VERBOSE", "", " INFO", "INFO "] {
            let err = bad.parse::<SeverityLevel>().unwrap_err();
            assert!(
                matches!(err, LoggerError::InvalidSeverityToken { ref token } if token == bad),
                "unexpected result for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_ordering() {
        assert!(SeverityLevel::Trace < SeverityLevel::Debug);
        assert!(SeverityLevel::Debug < SeverityLevel::Info);
        assert!(SeverityLevel::Info < SeverityLevel::Warn);
        assert!(SeverityLevel::Warn < SeverityLevel::Error);
        assert!(SeverityLevel::Error < SeverityLevel::Fatal);
    }

    #[test]
    fn test_u8_mapping() {
        for level in SeverityLevel::ALL {
            assert_eq!(SeverityLevel::from_u8(level.as_u8()), Some(level));
        }
        assert_eq!(SeverityLevel::from_u8(6), None);
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:5}|", SeverityLevel::Info), "INFO |");
        assert_eq!(SeverityLevel::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&SeverityLevel::Error).unwrap();
        assert_eq!(json, "\"ERROR\"");
        let parsed: SeverityLevel = serde_json::from_str("\"DEBUG\"").unwrap();
        assert_eq!(parsed, SeverityLevel::Debug);
        assert!(serde_json::from_str::<SeverityLevel>("\"debug\"").is_err());
    }

    #[test]
    fn test_elision_follows_features() {
        let disabled = cfg!(feature = "disable-logging");
        let debug_elided = disabled || cfg!(feature = "elide-debug");
        assert_eq!(SeverityLevel::Trace.is_elided(), debug_elided);
        assert_eq!(SeverityLevel::Debug.is_elided(), debug_elided);
        assert_eq!(SeverityLevel::Info.is_elided(), disabled);
        assert_eq!(SeverityLevel::Fatal.is_elided(), disabled);
    }
}
