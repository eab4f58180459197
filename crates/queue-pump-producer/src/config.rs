//! Environment-sourced producer configuration.

use serde::Deserialize;

/// Producer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerConfig {
    /// Name of the queue to produce into (`SQS_QUEUE_NAME`)
    pub sqs_queue_name: String,

    /// HTTP listen port (`PORT`)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl ProducerConfig {
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
