//! In-memory queue provider for testing and local development.
//!
//! Implements enough queue semantics to exercise the transfer engine and
//! the process loops without a network: visibility timeouts with
//! redelivery, per-entry batch outcomes, and queue resolution failures for
//! unknown queues. Receive does not simulate long polling; an empty queue
//! returns immediately.

use crate::client::QueueProvider;
use crate::error::QueueError;
use crate::message::{
    BatchEntryFailure, BatchResult, OutgoingMessage, QueueHandle, QueueName, ReceivedMessage,
    MAX_BATCH_SIZE,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Default lease period before an unacknowledged message is redelivered
const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(30);

/// A message stored in a queue
#[derive(Debug, Clone)]
struct StoredMessage {
    message_id: String,
    body: String,
    attributes: HashMap<String, String>,
}

/// A received message awaiting deletion
#[derive(Debug, Clone)]
struct InFlightMessage {
    message: StoredMessage,
    locked_until: Instant,
}

#[derive(Debug, Default)]
struct MemoryQueue {
    messages: VecDeque<StoredMessage>,
    in_flight: HashMap<String, InFlightMessage>,
}

impl MemoryQueue {
    /// Return expired in-flight messages to the visible queue
    fn reclaim_expired(&mut self, now: Instant) {
        let expired: Vec<String> = self
            .in_flight
            .iter()
            .filter(|(_, in_flight)| in_flight.locked_until <= now)
            .map(|(receipt, _)| receipt.clone())
            .collect();

        for receipt in expired {
            if let Some(in_flight) = self.in_flight.remove(&receipt) {
                self.messages.push_back(in_flight.message);
            }
        }
    }
}

#[derive(Debug, Default)]
struct ProviderState {
    queues: HashMap<String, MemoryQueue>,
    receipt_counter: u64,
}

/// In-memory queue provider
///
/// Clones share the underlying storage, so a provider can be handed to a
/// consumer loop while the test inspects queue contents through its own
/// clone.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    state: Arc<Mutex<ProviderState>>,
    visibility_timeout: Duration,
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProvider {
    /// Create a provider with the default visibility timeout
    pub fn new() -> Self {
        Self::with_visibility_timeout(DEFAULT_VISIBILITY_TIMEOUT)
    }

    /// Create a provider with a custom visibility timeout
    pub fn with_visibility_timeout(visibility_timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ProviderState::default())),
            visibility_timeout,
        }
    }

    /// Register a queue. Resolving an unregistered queue fails with
    /// [`QueueError::QueueNotFound`].
    pub fn create_queue(&self, name: &QueueName) {
        let mut state = self.state.lock().expect("provider state poisoned");
        state.queues.entry(name.to_string()).or_default();
    }

    /// Number of currently visible messages (excludes in-flight)
    pub fn visible_len(&self, name: &QueueName) -> usize {
        let mut state = self.state.lock().expect("provider state poisoned");
        match state.queues.get_mut(name.as_str()) {
            Some(queue) => {
                queue.reclaim_expired(Instant::now());
                queue.messages.len()
            }
            None => 0,
        }
    }

    /// Number of in-flight (received but undeleted) messages
    pub fn in_flight_len(&self, name: &QueueName) -> usize {
        let state = self.state.lock().expect("provider state poisoned");
        state
            .queues
            .get(name.as_str())
            .map(|queue| queue.in_flight.len())
            .unwrap_or(0)
    }
}

fn unknown_queue(queue: &QueueHandle) -> QueueError {
    QueueError::QueueNotFound {
        queue_name: queue.name().to_string(),
    }
}

#[async_trait]
impl QueueProvider for InMemoryProvider {
    async fn resolve_queue(&self, name: &QueueName) -> Result<QueueHandle, QueueError> {
        let state = self.state.lock().expect("provider state poisoned");
        if !state.queues.contains_key(name.as_str()) {
            return Err(QueueError::QueueNotFound {
                queue_name: name.to_string(),
            });
        }

        Ok(QueueHandle::new(name.clone(), format!("memory://{}", name)))
    }

    async fn receive_messages(
        &self,
        queue: &QueueHandle,
        max_messages: u32,
        _wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let mut guard = self.state.lock().expect("provider state poisoned");
        let state = &mut *guard;
        let queue_state = state
            .queues
            .get_mut(queue.name().as_str())
            .ok_or_else(|| unknown_queue(queue))?;

        let now = Instant::now();
        queue_state.reclaim_expired(now);

        let take = (max_messages as usize).min(MAX_BATCH_SIZE);
        let mut received = Vec::new();

        while received.len() < take {
            let Some(message) = queue_state.messages.pop_front() else {
                break;
            };

            state.receipt_counter += 1;
            let receipt_handle = format!("receipt-{}", state.receipt_counter);
            received.push(ReceivedMessage {
                message_id: message.message_id.clone(),
                body: message.body.clone(),
                attributes: message.attributes.clone(),
                receipt_handle: receipt_handle.clone(),
            });
            queue_state.in_flight.insert(
                receipt_handle,
                InFlightMessage {
                    message,
                    locked_until: now + self.visibility_timeout,
                },
            );
        }

        Ok(received)
    }

    async fn delete_messages(
        &self,
        queue: &QueueHandle,
        messages: &[ReceivedMessage],
    ) -> Result<BatchResult, QueueError> {
        if messages.len() > MAX_BATCH_SIZE {
            return Err(QueueError::BatchTooLarge {
                size: messages.len(),
                max_size: MAX_BATCH_SIZE,
            });
        }

        let mut state = self.state.lock().expect("provider state poisoned");
        let queue_state = state
            .queues
            .get_mut(queue.name().as_str())
            .ok_or_else(|| unknown_queue(queue))?;

        let mut result = BatchResult::default();
        for (index, message) in messages.iter().enumerate() {
            if queue_state.in_flight.remove(&message.receipt_handle).is_some() {
                result.successful.push(index);
            } else {
                result.failed.push(BatchEntryFailure {
                    index,
                    code: "ReceiptHandleIsInvalid".to_string(),
                    message: "receipt handle is not in flight".to_string(),
                    sender_fault: true,
                });
            }
        }

        Ok(result)
    }

    async fn send_message(
        &self,
        queue: &QueueHandle,
        message: &OutgoingMessage,
    ) -> Result<String, QueueError> {
        let mut state = self.state.lock().expect("provider state poisoned");
        let queue_state = state
            .queues
            .get_mut(queue.name().as_str())
            .ok_or_else(|| unknown_queue(queue))?;

        let message_id = uuid::Uuid::new_v4().to_string();
        queue_state.messages.push_back(StoredMessage {
            message_id: message_id.clone(),
            body: message.body.clone(),
            attributes: message.attributes.clone(),
        });

        Ok(message_id)
    }

    async fn send_messages(
        &self,
        queue: &QueueHandle,
        messages: &[OutgoingMessage],
    ) -> Result<BatchResult, QueueError> {
        if messages.len() > MAX_BATCH_SIZE {
            return Err(QueueError::BatchTooLarge {
                size: messages.len(),
                max_size: MAX_BATCH_SIZE,
            });
        }

        let mut state = self.state.lock().expect("provider state poisoned");
        let queue_state = state
            .queues
            .get_mut(queue.name().as_str())
            .ok_or_else(|| unknown_queue(queue))?;

        let mut result = BatchResult::default();
        for (index, message) in messages.iter().enumerate() {
            queue_state.messages.push_back(StoredMessage {
                message_id: uuid::Uuid::new_v4().to_string(),
                body: message.body.clone(),
                attributes: message.attributes.clone(),
            });
            result.successful.push(index);
        }

        Ok(result)
    }

    async fn approximate_message_count(&self, queue: &QueueHandle) -> Result<u64, QueueError> {
        let mut state = self.state.lock().expect("provider state poisoned");
        let queue_state = state
            .queues
            .get_mut(queue.name().as_str())
            .ok_or_else(|| unknown_queue(queue))?;

        queue_state.reclaim_expired(Instant::now());

        Ok(queue_state.messages.len() as u64)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
