//! The polling consumer loop.
//!
//! Each cycle resolves the queue handle fresh (a recreated queue picks up
//! a new URL), drains it in batches of ten, then idles. The idle sleep is
//! taken in one-second slices with a shutdown check per slice, so shutdown
//! latency stays around a second regardless of the configured interval.

use queue_pump_runtime::{BatchTransfer, QueueError, QueueHandle, QueueName};
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Messages requested per receive call
const RECEIVE_BATCH_SIZE: u32 = 10;

/// Long-poll wait per receive call
const RECEIVE_WAIT: Duration = Duration::from_secs(5);

/// Granularity of the idle sleep's shutdown checks
const IDLE_SLICE: Duration = Duration::from_secs(1);

/// Polling consumer over the batch transfer engine
pub struct Consumer {
    transfer: BatchTransfer,
    queue_name: QueueName,
    sleep_wait: Duration,
}

impl Consumer {
    /// Create a consumer for the named queue
    pub fn new(transfer: BatchTransfer, queue_name: QueueName, sleep_wait: Duration) -> Self {
        Self {
            transfer,
            queue_name,
            sleep_wait,
        }
    }

    /// Run the polling loop until shutdown is requested.
    ///
    /// Queue resolution failures are fatal and propagate to the caller;
    /// deletion failures inside a drain cycle are not.
    pub async fn run(&self) -> Result<(), QueueError> {
        while !self.transfer.shutdown().is_requested() {
            let queue = self.transfer.resolve_queue(&self.queue_name).await?;

            println!(
                "Receiving, handling, and deleting messages in batches of {}.",
                RECEIVE_BATCH_SIZE
            );
            self.drain(&queue).await?;
            println!("Done.");

            self.idle().await;
        }

        info!("Consumer loop stopped at iteration boundary");
        Ok(())
    }

    /// Receive and delete batches until the queue reports empty or
    /// shutdown is requested. The batch in flight always completes before
    /// shutdown takes effect.
    async fn drain(&self, queue: &QueueHandle) -> Result<(), QueueError> {
        loop {
            if self.transfer.shutdown().is_requested() {
                return Ok(());
            }

            let messages = self
                .transfer
                .receive_batch(queue, RECEIVE_BATCH_SIZE, RECEIVE_WAIT)
                .await?;
            print!(".");
            std::io::stdout().flush().ok();

            if messages.is_empty() {
                return Ok(());
            }

            // Deletion failure is non-fatal; undeleted messages reappear
            // after the visibility timeout.
            self.transfer.delete_batch(queue, &messages).await;
        }
    }

    /// Sleep the configured idle interval in one-second slices, returning
    /// early once shutdown is requested
    async fn idle(&self) {
        if self.sleep_wait.is_zero() || self.transfer.shutdown().is_requested() {
            return;
        }

        println!("Sleeping for {} seconds...", self.sleep_wait.as_secs());

        let mut remaining = self.sleep_wait;
        while !remaining.is_zero() {
            if self.transfer.shutdown().is_requested() {
                return;
            }

            let slice = remaining.min(IDLE_SLICE);
            tokio::time::sleep(slice).await;
            remaining -= slice;
        }
    }
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod tests;
