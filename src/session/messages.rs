//! Unified messaging system for session operations

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    Info(String),
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn print(&self) {
        match self {
            Self::Info(msg) => {
                println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg);
            }
            Self::Success(msg) => {
                println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg);
            }
        }
    }
}

/// Names the configured guild, or says that none is configured.
pub fn starting_message(guild_id: Option<&str>) -> SessionMessage {
    match guild_id {
        Some(id) => SessionMessage::info(format!("Starting dashboard for guild {}", id)),
        None => SessionMessage::info("Starting dashboard (no guild configured, the Relay picks one)"),
    }
}

pub fn print_session_starting(guild_id: Option<&str>) {
    starting_message(guild_id).print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("Warroom exited").print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_message_names_guild() {
        assert_eq!(
            starting_message(Some("42")),
            SessionMessage::Info("Starting dashboard for guild 42".to_string())
        );
        assert!(matches!(starting_message(None), SessionMessage::Info(msg) if msg.contains("no guild")));
    }
}
