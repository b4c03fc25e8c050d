//! Classified operation results.
//!
//! Stream handles in this crate do not surface failures through `Result`
//! chains; they carry a health flag plus a [`Status`] describing the first
//! failure (see `stream::state`). `Status` itself is a plain value: either
//! ok, or a [`StatusCode`] classification with a human-readable message.

use core::fmt;

/// Canonical failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Cancelled => "cancelled",
            StatusCode::Unknown => "unknown",
            StatusCode::InvalidArgument => "invalid argument",
            StatusCode::DeadlineExceeded => "deadline exceeded",
            StatusCode::NotFound => "not found",
            StatusCode::AlreadyExists => "already exists",
            StatusCode::PermissionDenied => "permission denied",
            StatusCode::ResourceExhausted => "resource exhausted",
            StatusCode::FailedPrecondition => "failed precondition",
            StatusCode::Aborted => "aborted",
            StatusCode::OutOfRange => "out of range",
            StatusCode::Unimplemented => "unimplemented",
            StatusCode::Internal => "internal",
            StatusCode::Unavailable => "unavailable",
            StatusCode::DataLoss => "data loss",
            StatusCode::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ok, or a classified failure with a message. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Status {
    repr: Option<Box<(StatusCode, String)>>,
}

impl Status {
    /// The ok status.
    pub const fn ok() -> Self {
        Status { repr: None }
    }

    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Status {
            repr: Some(Box::new((code, message.into()))),
        }
    }

    pub fn data_loss(message: impl Into<String>) -> Self {
        Status::new(StatusCode::DataLoss, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Status::new(StatusCode::Internal, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Status::new(StatusCode::InvalidArgument, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Status::new(StatusCode::Unknown, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Status::new(StatusCode::Unavailable, message)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Status::new(StatusCode::FailedPrecondition, message)
    }

    pub fn is_ok(&self) -> bool {
        self.repr.is_none()
    }

    /// Classification, or `None` for the ok status.
    pub fn code(&self) -> Option<StatusCode> {
        self.repr.as_ref().map(|r| r.0)
    }

    /// Failure message; empty for the ok status.
    pub fn message(&self) -> &str {
        self.repr.as_ref().map_or("", |r| r.1.as_str())
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            None => f.write_str("ok"),
            Some(r) => write!(f, "{}: {}", r.0, r.1),
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_status_has_no_code_or_message() {
        let s = Status::ok();
        assert!(s.is_ok());
        assert_eq!(s.code(), None);
        assert_eq!(s.message(), "");
        assert_eq!(s.to_string(), "ok");
    }

    #[test]
    fn error_status_carries_code_and_message() {
        let s = Status::data_loss("truncated zstd stream");
        assert!(!s.is_ok());
        assert_eq!(s.code(), Some(StatusCode::DataLoss));
        assert_eq!(s.message(), "truncated zstd stream");
        assert_eq!(s.to_string(), "data loss: truncated zstd stream");
    }

    #[test]
    fn status_is_comparable() {
        assert_eq!(Status::ok(), Status::ok());
        assert_eq!(Status::internal("x"), Status::internal("x"));
        assert_ne!(Status::internal("x"), Status::unknown("x"));
    }
}
