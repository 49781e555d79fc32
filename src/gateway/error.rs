//! Failure taxonomy for the inference pipeline.

use thiserror::Error;

use crate::resolver::DecodeError;

/// Errors produced while talking to the inference backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// Backend unreachable: DNS, connect, TLS, or a dropped connection.
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend reachable but rejected or failed on the input.
    #[error("{0}")]
    Backend(String),

    /// The call was aborted locally before it finished.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            InferenceError::Backend(format!("Malformed response from backend: {}", err))
        } else {
            InferenceError::Transport(err.to_string())
        }
    }
}

/// Coarse failure class carried next to the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Decode,
    Transport,
    Backend,
    Cancelled,
}

/// A failed submission, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<DecodeError> for Failure {
    fn from(err: DecodeError) -> Self {
        Self {
            kind: FailureKind::Decode,
            message: err.to_string(),
        }
    }
}

impl From<InferenceError> for Failure {
    fn from(err: InferenceError) -> Self {
        let kind = match &err {
            InferenceError::Transport(_) => FailureKind::Transport,
            InferenceError::Backend(_) => FailureKind::Backend,
            InferenceError::Cancelled => FailureKind::Cancelled,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Exactly one of these is delivered per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    Ok(String),
    Fail(Failure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_keep_their_message() {
        let err = DecodeError::Corrupt {
            locator: "x.png".into(),
            reason: "bad header".into(),
        };
        let expected = err.to_string();
        let failure = Failure::from(err);
        assert_eq!(failure.kind, FailureKind::Decode);
        assert_eq!(failure.message, expected);
    }

    #[test]
    fn inference_errors_are_classified() {
        let transport = Failure::from(InferenceError::Transport("connection refused".into()));
        assert_eq!(transport.kind, FailureKind::Transport);
        assert_eq!(transport.message, "Network error: connection refused");

        let backend = Failure::from(InferenceError::Backend("Quota exceeded".into()));
        assert_eq!(backend.kind, FailureKind::Backend);
        assert_eq!(backend.message, "Quota exceeded");

        let cancelled = Failure::from(InferenceError::Cancelled);
        assert_eq!(cancelled.kind, FailureKind::Cancelled);
    }
}
