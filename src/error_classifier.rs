use crate::error::WarroomError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, error: &WarroomError) -> LogLevel {
        match error {
            // Rate limiting and temporary server issues
            WarroomError::Remote { status, .. } if *status == 429 => LogLevel::Warn,
            WarroomError::Remote { status, .. } if (500..=599).contains(status) => {
                LogLevel::Warn
            }

            // Critical: wrong key, or the operator asked for something impossible
            WarroomError::Remote { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            WarroomError::Remote { .. } => LogLevel::Error,
            WarroomError::Validation(_) | WarroomError::Config(_) => LogLevel::Error,
            WarroomError::Io(_) | WarroomError::Json(_) => LogLevel::Error,

            // Network issues - usually temporary
            WarroomError::Transport(_) | WarroomError::MalformedResponse(_) => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_errors() {
        let classifier = ErrorClassifier::new();
        let err = WarroomError::Remote {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(classifier.classify(&err), LogLevel::Error);
    }

    #[test]
    fn server_errors_are_warnings() {
        let classifier = ErrorClassifier::new();
        let err = WarroomError::Remote {
            status: 503,
            body: String::new(),
        };
        assert_eq!(classifier.classify(&err), LogLevel::Warn);
        assert_eq!(
            classifier.classify(&WarroomError::MalformedResponse("eof".into())),
            LogLevel::Warn
        );
    }

    #[test]
    fn local_rejections_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify(&WarroomError::validation("Missing name")),
            LogLevel::Error
        );
    }
}
