//! Provider trait for queue operations.

use crate::error::QueueError;
use crate::message::{BatchResult, OutgoingMessage, QueueHandle, QueueName, ReceivedMessage};
use async_trait::async_trait;
use std::time::Duration;

/// Interface implemented by specific queue backends (AWS SQS, in-memory).
///
/// Providers are thin transport wrappers: no retries, no partial-failure
/// interpretation, no logging policy. All of that lives in
/// [`crate::transfer::BatchTransfer`], which wraps every provider call in
/// the retry executor.
#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Look up a queue handle by name
    async fn resolve_queue(&self, name: &QueueName) -> Result<QueueHandle, QueueError>;

    /// Receive up to `max_messages` (capped at the batch maximum), waiting
    /// up to `wait` for messages to arrive. Zero messages is a normal
    /// outcome meaning the queue is currently empty.
    async fn receive_messages(
        &self,
        queue: &QueueHandle,
        max_messages: u32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, QueueError>;

    /// Delete previously received messages in one batch request, keyed by
    /// local index
    async fn delete_messages(
        &self,
        queue: &QueueHandle,
        messages: &[ReceivedMessage],
    ) -> Result<BatchResult, QueueError>;

    /// Send a single message, returning the service-assigned message id
    async fn send_message(
        &self,
        queue: &QueueHandle,
        message: &OutgoingMessage,
    ) -> Result<String, QueueError>;

    /// Send messages in one batch request, keyed by local index
    async fn send_messages(
        &self,
        queue: &QueueHandle,
        messages: &[OutgoingMessage],
    ) -> Result<BatchResult, QueueError>;

    /// Approximate number of messages currently visible on the queue
    async fn approximate_message_count(&self, queue: &QueueHandle) -> Result<u64, QueueError>;
}
