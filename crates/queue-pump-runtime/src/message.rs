//! Message types and batch outcome structures.

use crate::error::QueueError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Maximum number of entries in a single batch request.
///
/// AWS SQS rejects batches larger than 10; the in-memory provider enforces
/// the same limit so tests exercise the real constraint.
pub const MAX_BATCH_SIZE: usize = 10;

// ============================================================================
// Core Domain Identifiers
// ============================================================================

/// Validated queue name with length and character restrictions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueName(String);

impl QueueName {
    /// Create new queue name with validation
    ///
    /// Queue names are 1-80 characters of ASCII alphanumerics, hyphens, and
    /// underscores, optionally carrying a `.fifo` suffix.
    pub fn new(name: impl Into<String>) -> Result<Self, QueueError> {
        let name = name.into();

        if name.is_empty() || name.len() > 80 {
            return Err(QueueError::Validation {
                field: "queue_name".to_string(),
                message: "must be 1-80 characters".to_string(),
            });
        }

        let base = name.strip_suffix(".fifo").unwrap_or(&name);
        if base.is_empty()
            || !base
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(QueueError::Validation {
                field: "queue_name".to_string(),
                message: "only ASCII alphanumeric, hyphens, and underscores allowed".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get queue name as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueueName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueueName {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A queue reference resolved from a name.
///
/// Handles are resolved once per polling cycle rather than cached
/// indefinitely, so a recreated queue picks up a fresh URL on the next
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    name: QueueName,
    url: String,
}

impl QueueHandle {
    /// Create a handle from a resolved queue URL
    pub fn new(name: QueueName, url: String) -> Self {
        Self { name, url }
    }

    /// Get the queue name
    pub fn name(&self) -> &QueueName {
        &self.name
    }

    /// Get the provider-specific queue URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// A message to be sent to a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub body: String,
    pub attributes: HashMap<String, String>,
}

impl OutgoingMessage {
    /// Create new message with body
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add a message attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A message received from a queue with its acknowledgment token.
///
/// The receipt handle is only valid until the queue's visibility timeout
/// expires; an undeleted message becomes visible again after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub message_id: String,
    pub body: String,
    pub attributes: HashMap<String, String>,
    pub receipt_handle: String,
}

// ============================================================================
// Batch Outcomes
// ============================================================================

/// A single failed entry within a batch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntryFailure {
    /// Local sequence index of the entry in the submitted batch
    pub index: usize,
    /// Machine-readable error code reported by the service
    pub code: String,
    /// Human-readable reason, when the service supplies one
    pub message: String,
    /// Whether the failure was caused by the sender (vs. the service)
    pub sender_fault: bool,
}

/// Outcome of a batch call, partitioned by local entry index.
///
/// A batch call succeeding at the transport level does not mean every entry
/// succeeded: each submitted entry lands in exactly one of the two
/// partitions and callers must inspect both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Indices of entries the service accepted
    pub successful: Vec<usize>,
    /// Entries the service rejected, with the reported reason
    pub failed: Vec<BatchEntryFailure>,
}

impl BatchResult {
    /// Check whether every submitted entry succeeded
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of entries accounted for
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
