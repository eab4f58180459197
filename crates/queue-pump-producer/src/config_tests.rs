//! Tests for producer configuration loading

use super::*;
use std::collections::HashMap;

fn env_source(vars: &[(&str, &str)]) -> config::Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    config::Environment::default().source(Some(map))
}

#[test]
fn test_queue_name_and_port_are_read() {
    let config = ProducerConfig::from_environment(env_source(&[
        ("SQS_QUEUE_NAME", "outbox"),
        ("PORT", "9090"),
    ]))
    .expect("configuration is valid");

    assert_eq!(config.sqs_queue_name, "outbox");
    assert_eq!(config.port, 9090);
}

#[test]
fn test_port_defaults_to_8080() {
    let config = ProducerConfig::from_environment(env_source(&[("SQS_QUEUE_NAME", "outbox")]))
        .expect("configuration is valid");

    assert_eq!(config.port, 8080);
}

#[test]
fn test_missing_queue_name_fails_fast() {
    let result = ProducerConfig::from_environment(env_source(&[("PORT", "8080")]));

    assert!(result.is_err());
}

#[test]
fn test_non_integer_port_fails_fast() {
    let result = ProducerConfig::from_environment(env_source(&[
        ("SQS_QUEUE_NAME", "outbox"),
        ("PORT", "eighty"),
    ]));

    assert!(result.is_err());
}
