//! Error types for queue operations.

use thiserror::Error;

/// Service error codes that indicate a transient condition worth retrying.
///
/// Anything outside this set is treated as permanent: retrying a malformed
/// request or an authorization failure only delays the inevitable.
const RETRYABLE_SERVICE_CODES: [&str; 10] = [
    "RequestTimeout",
    "RequestTimeoutException",
    "ServiceUnavailable",
    "Throttling",
    "ThrottlingException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "InternalError",
    "InternalServerError",
    "SlowDown",
];

/// Error type for all queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue not found: {queue_name}")]
    QueueNotFound { queue_name: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Service error ({code}): {message}")]
    Service { code: String, message: String },

    #[error("Batch size {size} exceeds maximum {max_size}")]
    BatchTooLarge { size: usize, max_size: usize },

    #[error("Shutdown requested before the operation could complete")]
    ShutdownRequested,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },
}

impl QueueError {
    /// Check if the error is transient and the operation should be retried.
    ///
    /// Connectivity failures are always retryable. Service-reported errors
    /// are retryable only when their code marks a throttling, timeout, or
    /// internal-service condition. Everything else fails closed as
    /// permanent, including errors this crate does not recognize.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            Self::Service { code, .. } => RETRYABLE_SERVICE_CODES.contains(&code.as_str()),
            Self::QueueNotFound { .. } => false,
            Self::BatchTooLarge { .. } => false,
            Self::ShutdownRequested => false,
            Self::Configuration { .. } => false,
            Self::Validation { .. } => false,
        }
    }

    /// Convenience constructor for service errors.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
