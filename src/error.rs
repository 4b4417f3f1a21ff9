use thiserror::Error;

/// Every way a monitoring run can fail.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Missing required configuration value: {0}")]
    ConfigMissing(String),

    #[error("Invalid configuration value for {name}: {reason}")]
    ConfigInvalid { name: String, reason: String },

    #[error("AUTH token expired or rejected by the ranking API")]
    CredentialExpired { body: Option<String> },

    #[error("Failed to fetch rank: {message}")]
    FetchFailed {
        message: String,
        body: Option<String>,
    },

    #[error("Unexpected ranking API response: {message}")]
    ParseFailed { message: String, body: String },

    #[error("State file error: {0}")]
    StateIo(#[from] std::io::Error),

    #[error("Notification not acknowledged: {message}")]
    NotifyFailed {
        message: String,
        body: Option<String>,
    },
}

impl MonitorError {
    pub fn fetch(message: impl Into<String>, body: Option<String>) -> Self {
        MonitorError::FetchFailed {
            message: message.into(),
            body,
        }
    }

    pub fn parse(message: impl Into<String>, body: &str) -> Self {
        MonitorError::ParseFailed {
            message: message.into(),
            body: body.to_string(),
        }
    }

    /// Process exit status for a run that ended with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::ConfigMissing(_) | MonitorError::ConfigInvalid { .. } => 2,
            MonitorError::CredentialExpired { .. } => 3,
            MonitorError::FetchFailed { .. } => 4,
            MonitorError::ParseFailed { .. } => 5,
            MonitorError::StateIo(_) => 6,
            // Delivery problems never fail a run on their own.
            MonitorError::NotifyFailed { .. } => 0,
        }
    }

    /// Whether the operator should get a failure message for this error.
    pub fn should_notify(&self) -> bool {
        matches!(
            self,
            MonitorError::CredentialExpired { .. }
                | MonitorError::FetchFailed { .. }
                | MonitorError::ParseFailed { .. }
        )
    }

    /// Raw upstream body attached to the error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            MonitorError::CredentialExpired { body }
            | MonitorError::FetchFailed { body, .. }
            | MonitorError::NotifyFailed { body, .. } => body.as_deref(),
            MonitorError::ParseFailed { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
