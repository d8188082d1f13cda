use thiserror::Error;

/// Failures talking to the assistant service.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No response was received: connection refused, DNS failure, timeout.
    #[error("Assistant service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("Assistant service error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Failed to decode assistant response: {0}")]
    Decode(String),

    /// The request was superseded or cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// Classify a transport-level failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Server {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        if err.is_timeout() {
            return Self::Unreachable(format!("request timed out: {}", err));
        }
        Self::Unreachable(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable cause shown as an error message in the transcript.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable(_) => "I can't reach the urban planning service right now. \
                 Make sure the assistant server is running and reachable, then try again."
                .to_string(),
            Self::Server { status: 503, .. } => {
                "The assistant is temporarily unavailable. Please try again in a moment.".to_string()
            }
            Self::Server { status: 500, .. } => {
                "The assistant ran into an internal error while processing your request.".to_string()
            }
            Self::Server { status, .. } => {
                format!("Server error {}. Please try again.", status)
            }
            Self::Decode(_) => {
                "I received a response I couldn't understand. Please try again.".to_string()
            }
            Self::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}
