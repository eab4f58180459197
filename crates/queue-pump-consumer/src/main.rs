//! # Queue-Pump Consumer
//!
//! Binary entry point for the polling consumer.
//!
//! This executable:
//! - Loads configuration from the environment (queue name, idle interval)
//! - Initializes tracing
//! - Installs SIGINT/SIGTERM handlers that flip the shutdown flag
//! - Runs the polling loop until the queue drains and shutdown is requested

mod config;
mod consumer;

use config::ConsumerConfig;
use consumer::Consumer;
use queue_pump_runtime::{listen_for_signals, BatchTransfer, QueueName, ShutdownFlag, SqsProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "queue_pump_consumer=info,queue_pump_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting queue-pump consumer");

    let config = match ConsumerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid consumer configuration; aborting");
            std::process::exit(3);
        }
    };

    let queue_name = match QueueName::new(config.sqs_queue_name.clone()) {
        Ok(name) => name,
        Err(e) => {
            error!(error = %e, "Invalid queue name; aborting");
            std::process::exit(3);
        }
    };

    println!("Starting SQS consumer for queue: {}", queue_name);
    println!("Sleep interval: {} seconds", config.sleep_wait);

    // Both termination signals route to the same flag; the loops only
    // ever observe the flag.
    let shutdown = ShutdownFlag::new();
    tokio::spawn(listen_for_signals(shutdown.clone()));

    let provider = Arc::new(SqsProvider::from_env().await);
    let transfer = BatchTransfer::new(provider, shutdown);
    let consumer = Consumer::new(
        transfer,
        queue_name,
        Duration::from_secs(config.sleep_wait),
    );

    if let Err(e) = consumer.run().await {
        error!(error = %e, "Consumer loop failed");
        std::process::exit(1);
    }

    println!("Shutdown complete. Exiting gracefully.");
}
