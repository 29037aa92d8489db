use thiserror::Error;

/// The single failure kind of an addition request.
///
/// Transport errors and non-success statuses are handled identically by the
/// controller; the variants only make the diagnostic line more useful.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailed {
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("addition service returned status {status}")]
    Status { status: u16 },
}

impl RequestFailed {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }
}
