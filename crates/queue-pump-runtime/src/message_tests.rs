//! Tests for message and batch outcome types

use super::*;

// ============================================================================
// QueueName Tests
// ============================================================================

#[test]
fn test_queue_name_accepts_valid_names() {
    for name in ["orders", "work-queue", "work_queue_2", "a", "jobs.fifo"] {
        assert!(QueueName::new(name).is_ok(), "expected {} to be valid", name);
    }
}

#[test]
fn test_queue_name_rejects_invalid_names() {
    for name in ["", "has space", "slash/name", "dots.in.middle", ".fifo"] {
        assert!(
            QueueName::new(name).is_err(),
            "expected {} to be rejected",
            name
        );
    }
}

#[test]
fn test_queue_name_rejects_overlong_names() {
    let name = "q".repeat(81);
    assert!(QueueName::new(name).is_err());

    let name = "q".repeat(80);
    assert!(QueueName::new(name).is_ok());
}

#[test]
fn test_queue_name_from_str_round_trip() {
    let name: QueueName = "work-queue".parse().expect("valid name");
    assert_eq!(name.as_str(), "work-queue");
    assert_eq!(name.to_string(), "work-queue");
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_outgoing_message_builder() {
    let message = OutgoingMessage::new("hello")
        .with_attribute("trace", "abc")
        .with_attribute("tier", "bulk");

    assert_eq!(message.body, "hello");
    assert_eq!(message.attributes.len(), 2);
    assert_eq!(message.attributes.get("trace"), Some(&"abc".to_string()));
}

#[test]
fn test_queue_handle_accessors() {
    let name = QueueName::new("orders").expect("valid name");
    let handle = QueueHandle::new(name.clone(), "memory://orders".to_string());

    assert_eq!(handle.name(), &name);
    assert_eq!(handle.url(), "memory://orders");
}

// ============================================================================
// BatchResult Tests
// ============================================================================

#[test]
fn test_batch_result_partition_accounting() {
    let result = BatchResult {
        successful: vec![0, 2],
        failed: vec![BatchEntryFailure {
            index: 1,
            code: "InternalError".to_string(),
            message: "try again".to_string(),
            sender_fault: false,
        }],
    };

    assert_eq!(result.total(), 3);
    assert!(!result.is_complete_success());
}

#[test]
fn test_batch_result_complete_success() {
    let result = BatchResult {
        successful: vec![0, 1, 2],
        failed: Vec::new(),
    };

    assert!(result.is_complete_success());
    assert_eq!(result.total(), 3);
}

#[test]
fn test_empty_batch_result_is_complete_success() {
    let result = BatchResult::default();

    assert!(result.is_complete_success());
    assert_eq!(result.total(), 0);
}
