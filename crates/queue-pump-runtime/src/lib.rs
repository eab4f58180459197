//! # Queue-Pump Runtime
//!
//! Resilient batch transfer engine shared by the queue-pump consumer and
//! producer processes.
//!
//! This library provides:
//! - Retry with jittered exponential backoff and error classification
//! - Batch operations with per-entry partial-failure handling
//! - Cooperative shutdown coordination
//! - Queue providers for AWS SQS and in-memory testing
//!
//! ## Module Organization
//!
//! - [`error`] - Error types and transient/permanent classification
//! - [`message`] - Message structures and batch outcomes
//! - [`retry`] - Backoff policy and retry executor
//! - [`shutdown`] - Process-wide cancellation flag and signal listener
//! - [`client`] - Provider trait
//! - [`providers`] - AWS SQS and in-memory providers
//! - [`transfer`] - The batch transfer engine

// Module declarations
pub mod client;
pub mod error;
pub mod message;
pub mod providers;
pub mod retry;
pub mod shutdown;
pub mod transfer;

// Re-export commonly used types at crate root for convenience
pub use client::QueueProvider;
pub use error::QueueError;
pub use message::{
    BatchEntryFailure, BatchResult, OutgoingMessage, QueueHandle, QueueName, ReceivedMessage,
    MAX_BATCH_SIZE,
};
pub use providers::{InMemoryProvider, SqsProvider};
pub use retry::{execute_with_retry, BackoffPolicy, MAX_RETRIES};
pub use shutdown::{listen_for_signals, ShutdownFlag};
pub use transfer::BatchTransfer;
