//! Environment-sourced consumer configuration.
//!
//! Variables are read from the process environment: `SQS_QUEUE_NAME` is
//! required and `SLEEP_WAIT` (seconds) defaults to 10. A missing queue
//! name or a non-integer sleep interval is a hard startup error.

use serde::Deserialize;

/// Consumer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumerConfig {
    /// Name of the queue to drain (`SQS_QUEUE_NAME`)
    pub sqs_queue_name: String,

    /// Idle sleep between drain cycles, in seconds (`SLEEP_WAIT`)
    #[serde(default = "default_sleep_wait")]
    pub sleep_wait: u64,
}

fn default_sleep_wait() -> u64 {
    10
}

impl ConsumerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?;

        let parsed: Self = settings.try_deserialize()?;
        parsed.validate()?;

        Ok(parsed)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.sqs_queue_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "SQS_QUEUE_NAME must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
