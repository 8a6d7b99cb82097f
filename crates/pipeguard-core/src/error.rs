//! Shared error type across pipeguard crates.

use thiserror::Error;

/// Stable error codes (reported by the decision service and in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A whitelist entry does not follow the signature grammar.
    InvalidSignature,
    /// Configuration is structurally valid YAML but semantically wrong.
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Host type model is inconsistent.
    TypeModel,
    /// Internal error (I/O, unexpected state).
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::TypeModel => "TYPE_MODEL",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Unified error type used by core and whitelist crates.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("invalid signature `{entry}`: {reason}")]
    InvalidSignature { entry: String, reason: String },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<GuardError>,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("type model: {0}")]
    TypeModel(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GuardError {
    pub(crate) fn signature(entry: &str, reason: impl Into<String>) -> Self {
        GuardError::InvalidSignature {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }

    /// Map to a stable code. Line-annotated errors report the code of their cause.
    pub fn code(&self) -> ErrorCode {
        match self {
            GuardError::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            GuardError::AtLine { source, .. } => source.code(),
            GuardError::BadConfig(_) => ErrorCode::BadConfig,
            GuardError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            GuardError::TypeModel(_) => ErrorCode::TypeModel,
            GuardError::Internal(_) => ErrorCode::Internal,
        }
    }
}
