//! Event System
//!
//! Activity log entries produced by dashboard actions and status checks

use crate::error::WarroomError;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::logging::should_log_with_env;
use chrono::Local;
use std::fmt::Display;

/// Where an event came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Gateway status checks and module panel calls.
    Gateway,
    /// Relay status checks, guild loads and actions.
    Relay,
    /// Local events: settings, validation, navigation.
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn success(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Success, LogLevel::Info)
    }

    pub fn info(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Info, LogLevel::Info)
    }

    pub fn refresh(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Refresh, LogLevel::Debug)
    }

    /// An error event whose level comes from the error classifier.
    pub fn error(source: Source, context: &str, error: &WarroomError) -> Self {
        let level = ErrorClassifier::new().classify(error);
        Self::new(
            source,
            format!("{}: {}", context, error),
            EventType::Error,
            level,
        )
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_events_take_classified_level() {
        let server = WarroomError::Remote {
            status: 503,
            body: "busy".to_string(),
        };
        let event = Event::error(Source::Relay, "Load guild", &server);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.msg.starts_with("Load guild: "));

        let denied = WarroomError::Remote {
            status: 403,
            body: "no".to_string(),
        };
        assert_eq!(
            Event::error(Source::Gateway, "Lock", &denied).log_level,
            LogLevel::Error
        );
    }

    #[test]
    fn refresh_events_are_debug() {
        let event = Event::refresh(Source::Relay, "Guild reloaded");
        assert_eq!(event.log_level, LogLevel::Debug);
        assert!(Event::success(Source::Relay, "ok").should_display());
    }

    #[test]
    fn display_includes_source() {
        let event = Event::info(Source::Dashboard, "Settings saved");
        let text = event.to_string();
        assert!(text.starts_with("Info ["));
        assert!(text.ends_with("Dashboard: Settings saved"));
    }
}
