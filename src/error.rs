use thiserror::Error;

/// Everything that can go wrong inside one poll cycle.
///
/// The `Display` text doubles as the message sent to the user, so two errors
/// with the same text are considered the same condition for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// The API answered correctly but there is no new work to report.
    #[error("Homework list is empty")]
    Empty,

    #[error("API response has an unexpected shape: {0}")]
    Shape(&'static str),

    #[error("API response is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Request to the API failed: {0}")]
    Transport(String),

    #[error("API returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

impl CycleError {
    /// `Empty` means "nothing new", every other kind is a real defect.
    pub fn is_benign(&self) -> bool {
        matches!(self, CycleError::Empty)
    }
}

// The URL carries the `from_date` cursor, which would make every failure
// text unique; it is stripped so identical outages compare equal.
impl From<reqwest::Error> for CycleError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            CycleError::Decode(err.to_string())
        } else if err.is_timeout() {
            CycleError::Transport(format!("timed out: {err}"))
        } else {
            CycleError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram rejected the message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("TELEGRAM_CHAT_ID must be an integer, got {0:?}")]
    InvalidChatId(String),

    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Config file parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_is_benign() {
        assert!(CycleError::Empty.is_benign());
        assert!(!CycleError::Shape("not an object").is_benign());
        assert!(!CycleError::HttpStatus { status: 500 }.is_benign());
        assert!(!CycleError::Transport("refused".into()).is_benign());
    }

    #[test]
    fn cycle_error_display() {
        assert_eq!(
            CycleError::MissingField("homeworks").to_string(),
            "API response is missing the `homeworks` field"
        );
        assert_eq!(
            CycleError::HttpStatus { status: 503 }.to_string(),
            "API returned HTTP status 503"
        );
        assert_eq!(
            CycleError::UnknownStatus("pending".into()).to_string(),
            "Unknown homework status: pending"
        );
    }

    #[test]
    fn missing_config_lists_every_name() {
        let err = ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "Missing required configuration: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CycleError>();
        assert_send_sync::<NotifyError>();
        assert_send_sync::<ConfigError>();
    }
}
