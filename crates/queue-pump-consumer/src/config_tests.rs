//! Tests for consumer configuration loading

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
fn test_queue_name_and_sleep_wait_are_read() {
    let config = ConsumerConfig::from_environment(env_source(&[
        ("SQS_QUEUE_NAME", "work-queue"),
        ("SLEEP_WAIT", "25"),
    ]))
    .expect("configuration is valid");

    assert_eq!(config.sqs_queue_name, "work-queue");
    assert_eq!(config.sleep_wait, 25);
}

#[test]
fn test_sleep_wait_defaults_to_ten_seconds() {
    let config = ConsumerConfig::from_environment(env_source(&[("SQS_QUEUE_NAME", "work-queue")]))
        .expect("configuration is valid");

    assert_eq!(config.sleep_wait, 10);
}

#[test]
fn test_missing_queue_name_fails_fast() {
    let result = ConsumerConfig::from_environment(env_source(&[("SLEEP_WAIT", "10")]));

    assert!(result.is_err());
}

#[test]
fn test_empty_queue_name_fails_fast() {
    let result = ConsumerConfig::from_environment(env_source(&[("SQS_QUEUE_NAME", "  ")]));

    assert!(result.is_err());
}

#[test]
fn test_non_integer_sleep_wait_fails_fast() {
    let result = ConsumerConfig::from_environment(env_source(&[
        ("SQS_QUEUE_NAME", "work-queue"),
        ("SLEEP_WAIT", "soon"),
    ]));

    assert!(result.is_err());
}
