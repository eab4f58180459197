//! # Queue-Pump Producer
//!
//! Binary entry point for the bulk producer service.
//!
//! This executable:
//! - Loads configuration from the environment (queue name, listen port)
//! - Initializes tracing
//! - Starts an HTTP server whose `/produce` route triggers the fan-out
//!   controller
//! - Shuts down gracefully on SIGINT/SIGTERM, letting in-flight requests
//!   finish

mod config;
mod fanout;
mod http;
mod producer;

use config::ProducerConfig;
use http::AppState;
use producer::Producer;
use queue_pump_runtime::{listen_for_signals, BatchTransfer, QueueName, ShutdownFlag, SqsProvider};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "queue_pump_producer=info,queue_pump_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting queue-pump producer");

    let config = match ProducerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid producer configuration; aborting");
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

    let shutdown = ShutdownFlag::new();

    let provider = Arc::new(SqsProvider::from_env().await);
    let transfer = Arc::new(BatchTransfer::new(provider, shutdown.clone()));
    let producer = Arc::new(Producer::new(transfer, queue_name));

    let app = http::create_router(AppState { producer });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %addr, error = %e, "Failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    info!("Starting HTTP server on {}", addr);

    // The signal listener completes once a signal has flipped the flag,
    // which doubles as the graceful-shutdown trigger: the server stops
    // accepting new connections and in-flight requests run to completion.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(listen_for_signals(shutdown))
        .await
    {
        error!(error = %e, "HTTP server failed");
        std::process::exit(2);
    }

    info!("HTTP server shutdown complete");
}
