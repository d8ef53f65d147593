//! Failure taxonomy shared by the platform driven ports.

/// Failures raised by platform adapters.
///
/// The moderation service maps `Connection` to `service_unavailable` and the
/// other variants to `internal_error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformApiError {
    /// The platform could not be reached or timed out.
    #[error("platform connection failed: {message}")]
    Connection { message: String },
    /// The platform answered with a failure status.
    #[error("platform rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The platform answered with a payload the panel cannot read.
    #[error("platform response could not be decoded: {message}")]
    Decode { message: String },
}

impl PlatformApiError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn rejected(status: impl Into<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether the failure happened before the platform produced an answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
