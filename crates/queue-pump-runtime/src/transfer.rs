//! # Batch Transfer Engine
//!
//! Retry-wrapped queue operations with partial-failure handling. Every
//! provider call goes through the retry executor, and every batch outcome
//! is partitioned entry by entry: a transport-successful batch call does
//! not mean every entry succeeded.

use crate::client::QueueProvider;
use crate::error::QueueError;
use crate::message::{
    BatchResult, OutgoingMessage, QueueHandle, QueueName, ReceivedMessage, MAX_BATCH_SIZE,
};
use crate::retry::{execute_with_retry, BackoffPolicy};
use crate::shutdown::ShutdownFlag;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Retry-wrapped queue operations over a [`QueueProvider`]
#[derive(Clone)]
pub struct BatchTransfer {
    provider: Arc<dyn QueueProvider>,
    shutdown: ShutdownFlag,
    backoff: BackoffPolicy,
}

impl BatchTransfer {
    /// Create an engine over a provider, gated by a shutdown flag
    pub fn new(provider: Arc<dyn QueueProvider>, shutdown: ShutdownFlag) -> Self {
        Self {
            provider,
            shutdown,
            backoff: BackoffPolicy::default(),
        }
    }

    /// The shutdown flag gating this engine's retry sequences
    pub fn shutdown(&self) -> &ShutdownFlag {
        &self.shutdown
    }

    /// Resolve a queue handle by name.
    ///
    /// Transient lookup failures are retried; a missing queue is permanent
    /// and propagates on the first attempt.
    pub async fn resolve_queue(&self, name: &QueueName) -> Result<QueueHandle, QueueError> {
        let handle = execute_with_retry("resolve_queue", &self.shutdown, &self.backoff, || {
            self.provider.resolve_queue(name)
        })
        .await?;

        info!(queue = %handle.name(), url = %handle.url(), "Resolved queue");
        Ok(handle)
    }

    /// Receive up to `max_messages` (≤ batch maximum), long-polling up to
    /// `wait`.
    ///
    /// Zero messages is a normal outcome meaning the queue is currently
    /// empty; callers use it to end a drain cycle.
    pub async fn receive_batch(
        &self,
        queue: &QueueHandle,
        max_messages: u32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let capped = max_messages.min(MAX_BATCH_SIZE as u32);

        let messages = execute_with_retry("receive_messages", &self.shutdown, &self.backoff, || {
            self.provider.receive_messages(queue, capped, wait)
        })
        .await?;

        for message in &messages {
            info!(
                message_id = %message.message_id,
                body = %message.body,
                "Received message"
            );
        }

        Ok(messages)
    }

    /// Delete previously received messages in one batch request.
    ///
    /// Entries the service rejects are logged and left alone; they become
    /// visible again after the queue's visibility timeout, so no local
    /// re-delete is attempted. A whole-call failure after exhausting
    /// retries is swallowed here and reported as `None`: deletion failure
    /// is non-fatal by contract, and callers must tolerate eventual
    /// redelivery.
    pub async fn delete_batch(
        &self,
        queue: &QueueHandle,
        messages: &[ReceivedMessage],
    ) -> Option<BatchResult> {
        if messages.is_empty() {
            return Some(BatchResult::default());
        }

        let outcome = execute_with_retry("delete_messages", &self.shutdown, &self.backoff, || {
            self.provider.delete_messages(queue, messages)
        })
        .await;

        match outcome {
            Ok(result) => {
                for &index in &result.successful {
                    if let Some(message) = messages.get(index) {
                        info!(receipt_handle = %message.receipt_handle, "Deleted message");
                    }
                }
                for failure in &result.failed {
                    warn!(
                        index = failure.index,
                        code = %failure.code,
                        "Could not delete message; it will reappear after the visibility timeout"
                    );
                }
                Some(result)
            }
            Err(err) => {
                error!(
                    queue = %queue.name(),
                    error = %err,
                    "Failed to delete messages after retries; leaving them for redelivery"
                );
                None
            }
        }
    }

    /// Send messages in one batch request.
    ///
    /// Unlike deletes, send failures surface to the caller: a whole-call
    /// failure propagates as an error, and per-entry failures are reported
    /// in the returned [`BatchResult`]. This engine never re-sends failed
    /// entries; callers that need resend-on-partial-failure must inspect
    /// the result themselves.
    pub async fn send_batch(
        &self,
        queue: &QueueHandle,
        messages: &[OutgoingMessage],
    ) -> Result<BatchResult, QueueError> {
        let result = execute_with_retry("send_messages", &self.shutdown, &self.backoff, || {
            self.provider.send_messages(queue, messages)
        })
        .await?;

        for &index in &result.successful {
            if let Some(message) = messages.get(index) {
                info!(body = %message.body, "Message sent");
            }
        }
        for failure in &result.failed {
            warn!(
                index = failure.index,
                code = %failure.code,
                "Failed to send message"
            );
        }

        Ok(result)
    }

    /// Send a single message, returning the service-assigned id
    pub async fn send_single(
        &self,
        queue: &QueueHandle,
        message: &OutgoingMessage,
    ) -> Result<String, QueueError> {
        execute_with_retry("send_message", &self.shutdown, &self.backoff, || {
            self.provider.send_message(queue, message)
        })
        .await
    }

    /// Approximate number of messages currently visible on the queue
    pub async fn approximate_message_count(
        &self,
        queue: &QueueHandle,
    ) -> Result<u64, QueueError> {
        execute_with_retry(
            "approximate_message_count",
            &self.shutdown,
            &self.backoff,
            || self.provider.approximate_message_count(queue),
        )
        .await
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
