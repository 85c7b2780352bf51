pub const RATE_LIMITED_MESSAGE: &str = "You have reached the query limit. Please try again later.";
pub const SERVER_FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Input rejected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("message is empty")]
    Empty,

    #[error("message is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },
}

impl SubmitRejection {
    /// Text shown in the transcript, `None` when the rejection is silent
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::TooLong { max, .. } => Some(format!(
                "Message is too long. Please keep it under {max} characters."
            )),
        }
    }
}

/// Failure of a single chat exchange. Every variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("rate limited")]
    RateLimited,

    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ChatError {
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            Self::Server { message, .. } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string()),
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored transcript is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A required page element is absent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required element #{0} not found")]
pub struct MissingElement(pub String);
