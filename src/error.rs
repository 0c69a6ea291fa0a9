use std::fmt;
use std::io;

/// Failures from the collaborators around the wheels: persistence, export and the webhook.
///
/// The wheels themselves never fail for expected conditions, see `SpinOutcome`.
#[derive(Debug)]
pub enum WheelError {
    /// Reading or writing local storage failed
    Io(io::Error),
    /// A record could not be encoded as JSON
    Json(serde_json::Error),
    /// The webhook answered with a non-success status
    Webhook { status: u16, body: String },
    /// The webhook could not be reached
    Network(String),
    /// Posting was requested but no webhook URL is configured
    NoWebhookConfigured,
    /// An option name that is not part of the wheel's universe
    UnknownOption(String),
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelError::Io(error) => write!(f, "Storage failed: {error}"),
            WheelError::Json(error) => write!(f, "Encoding failed: {error}"),
            WheelError::Webhook { status, body } => {
                write!(f, "Slack post failed ({status}): {body}")
            }
            WheelError::Network(message) => write!(f, "Slack post failed: {message}"),
            WheelError::NoWebhookConfigured => write!(f, "No Slack webhook configured"),
            WheelError::UnknownOption(name) => write!(f, "Unknown option: {name}"),
        }
    }
}

impl std::error::Error for WheelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WheelError::Io(error) => Some(error),
            WheelError::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for WheelError {
    fn from(error: io::Error) -> Self {
        WheelError::Io(error)
    }
}

impl From<serde_json::Error> for WheelError {
    fn from(error: serde_json::Error) -> Self {
        WheelError::Json(error)
    }
}
