//! Bulk message production over the batch transfer engine.
//!
//! Small requests are sent one call at a time for per-message result
//! visibility. Larger requests run the fan-out policy: one tokio task per
//! worker, each batching its own disjoint slice of the index range, joined
//! before any failure is surfaced so a failing worker never cuts short its
//! siblings.

use crate::fanout::{worker_counts, INDIVIDUAL_SEND_MAX};
use queue_pump_runtime::{
    BatchTransfer, OutgoingMessage, QueueError, QueueHandle, QueueName, MAX_BATCH_SIZE,
};
use std::io::Write;
use std::ops::Range;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Outcome of a produce request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProduceReport {
    /// Messages the caller asked for
    pub requested: usize,
    /// Entries the service accepted
    pub sent: usize,
    /// Entries the service rejected (reported, never auto-resent)
    pub failed: usize,
}

/// Per-worker tally
struct WorkerReport {
    sent: usize,
    failed: usize,
}

/// Bulk producer for a single queue
pub struct Producer {
    transfer: Arc<BatchTransfer>,
    queue_name: QueueName,
}

impl Producer {
    /// Create a producer for the named queue
    pub fn new(transfer: Arc<BatchTransfer>, queue_name: QueueName) -> Self {
        Self {
            transfer,
            queue_name,
        }
    }

    /// Produce `count` messages, choosing the send strategy by volume tier
    pub async fn produce(&self, count: usize) -> Result<ProduceReport, QueueError> {
        let queue = self.transfer.resolve_queue(&self.queue_name).await?;

        if count == 0 {
            return Ok(ProduceReport::default());
        }

        if count <= INDIVIDUAL_SEND_MAX {
            self.send_individually(&queue, count).await
        } else {
            self.fan_out(&queue, count).await
        }
    }

    /// Approximate number of messages currently on the queue
    pub async fn message_count(&self) -> Result<u64, QueueError> {
        let queue = self.transfer.resolve_queue(&self.queue_name).await?;
        self.transfer.approximate_message_count(&queue).await
    }

    async fn send_individually(
        &self,
        queue: &QueueHandle,
        count: usize,
    ) -> Result<ProduceReport, QueueError> {
        println!("Sending {} messages.", count);

        for n in 1..=count {
            let message = build_message(n);
            let message_id = self.transfer.send_single(queue, &message).await?;
            info!(message_id = %message_id, body = %message.body, "Message sent");
        }

        println!("Done. Sent {} messages.", count);

        Ok(ProduceReport {
            requested: count,
            sent: count,
            failed: 0,
        })
    }

    async fn fan_out(&self, queue: &QueueHandle, count: usize) -> Result<ProduceReport, QueueError> {
        let counts = worker_counts(count);
        info!(
            total = count,
            workers = counts.len(),
            "Fanning out message production"
        );

        let mut handles = Vec::with_capacity(counts.len());
        let mut start = 1usize;
        for (worker, worker_count) in counts.into_iter().enumerate() {
            let transfer = Arc::clone(&self.transfer);
            let queue = queue.clone();
            let range = start..start + worker_count;
            start += worker_count;

            handles.push(tokio::spawn(send_range(transfer, queue, worker, range)));
        }

        // Join every worker before surfacing any failure; siblings already
        // in flight run to completion.
        let mut report = ProduceReport {
            requested: count,
            ..Default::default()
        };
        let mut first_error: Option<QueueError> = None;

        for handle in handles {
            match handle.await {
                Ok(Ok(worker_report)) => {
                    report.sent += worker_report.sent;
                    report.failed += worker_report.failed;
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Producer worker failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    error!(error = %e, "Producer worker panicked");
                    first_error.get_or_insert(QueueError::service(
                        "WorkerPanicked",
                        format!("producer worker panicked: {}", e),
                    ));
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        println!("Done. Sent a total of {} messages.", report.sent);

        Ok(report)
    }
}

/// Send one worker's slice of the index range in batches of ten
async fn send_range(
    transfer: Arc<BatchTransfer>,
    queue: QueueHandle,
    worker: usize,
    range: Range<usize>,
) -> Result<WorkerReport, QueueError> {
    info!(
        worker,
        count = range.len(),
        batch_size = MAX_BATCH_SIZE,
        "Sending messages in batches"
    );

    let indices: Vec<usize> = range.collect();
    let mut report = WorkerReport { sent: 0, failed: 0 };

    for chunk in indices.chunks(MAX_BATCH_SIZE) {
        let messages: Vec<OutgoingMessage> = chunk.iter().map(|&n| build_message(n)).collect();
        let result = transfer.send_batch(&queue, &messages).await?;

        report.sent += result.successful.len();
        report.failed += result.failed.len();
        print!(".");
        std::io::stdout().flush().ok();
    }

    Ok(report)
}

fn build_message(n: usize) -> OutgoingMessage {
    OutgoingMessage::new(format!("Message {} uuid: {}", n, Uuid::new_v4()))
}

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;
