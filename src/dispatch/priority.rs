//! Log priorities and their sink routing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::channels::{Color, Theme};

/// Severity of a log message, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Simple output about the running program.
    #[default]
    Info,
    /// Things might not be as expected.
    Warning,
    /// Something already failed.
    Error,
    /// Will not recover; the fatal handler is consulted.
    FatalError,
}

impl Priority {
    /// Markup color of the message body.
    pub fn color(self, theme: Theme) -> Color {
        match self {
            Priority::Info => theme.foreground(),
            Priority::Warning => Color::named("orange"),
            Priority::Error | Priority::FatalError => Color::named("red"),
        }
    }

    /// Which sink receives messages of this priority.
    pub fn sink_level(self) -> SinkLevel {
        match self {
            Priority::FatalError | Priority::Error => SinkLevel::Error,
            Priority::Warning => SinkLevel::Warning,
            Priority::Info => SinkLevel::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Info => "info",
            Priority::Warning => "warning",
            Priority::Error => "error",
            Priority::FatalError => "fatal_error",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Priority::Info),
            "warning" | "warn" => Ok(Priority::Warning),
            "error" => Ok(Priority::Error),
            "fatal" | "fatal_error" | "fatalerror" => Ok(Priority::FatalError),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// The three severity-keyed outputs a sink exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkLevel {
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Priority::Info < Priority::Warning);
        assert!(Priority::Warning < Priority::Error);
        assert!(Priority::Error < Priority::FatalError);
        assert_eq!(Priority::default(), Priority::Info);
    }

    #[test]
    fn test_sink_routing() {
        assert_eq!(Priority::Info.sink_level(), SinkLevel::Info);
        assert_eq!(Priority::Warning.sink_level(), SinkLevel::Warning);
        assert_eq!(Priority::Error.sink_level(), SinkLevel::Error);
        assert_eq!(Priority::FatalError.sink_level(), SinkLevel::Error);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Priority::Info.color(Theme::Dark).as_str(), "white");
        assert_eq!(Priority::Info.color(Theme::Light).as_str(), "black");
        assert_eq!(Priority::Warning.color(Theme::Dark).as_str(), "orange");
        assert_eq!(Priority::FatalError.color(Theme::Light).as_str(), "red");
    }

    #[test]
    fn test_parse() {
        assert_eq!("WARN".parse::<Priority>(), Ok(Priority::Warning));
        assert_eq!("fatal".parse::<Priority>(), Ok(Priority::FatalError));
        assert!("loud".parse::<Priority>().is_err());
    }
}
