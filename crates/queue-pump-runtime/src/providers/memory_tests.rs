//! Tests for the in-memory queue provider

use super::*;
use crate::message::MAX_BATCH_SIZE;

fn queue_name(name: &str) -> QueueName {
    QueueName::new(name).expect("valid queue name")
}

async fn provider_with_queue(name: &QueueName) -> (InMemoryProvider, QueueHandle) {
    let provider = InMemoryProvider::new();
    provider.create_queue(name);
    let handle = provider.resolve_queue(name).await.expect("queue exists");
    (provider, handle)
}

fn outgoing(n: usize) -> OutgoingMessage {
    OutgoingMessage::new(format!("message {}", n))
}

#[tokio::test]
async fn test_resolve_unknown_queue_fails() {
    let provider = InMemoryProvider::new();

    let result = provider.resolve_queue(&queue_name("missing")).await;

    assert!(matches!(result, Err(QueueError::QueueNotFound { .. })));
}

#[tokio::test]
async fn test_resolve_known_queue_returns_handle() {
    let name = queue_name("orders");
    let (_provider, handle) = provider_with_queue(&name).await;

    assert_eq!(handle.name(), &name);
    assert_eq!(handle.url(), "memory://orders");
}

#[tokio::test]
async fn test_send_then_receive_round_trip() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    let messages: Vec<_> = (0..3).map(outgoing).collect();
    let result = provider
        .send_messages(&handle, &messages)
        .await
        .expect("send succeeds");
    assert_eq!(result.successful, vec![0, 1, 2]);

    let received = provider
        .receive_messages(&handle, 10, Duration::ZERO)
        .await
        .expect("receive succeeds");
    assert_eq!(received.len(), 3);
    assert_eq!(received[0].body, "message 0");
    assert_eq!(provider.in_flight_len(&name), 3);
    assert_eq!(provider.visible_len(&name), 0);
}

#[tokio::test]
async fn test_receive_caps_at_batch_maximum() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    for n in 0..15 {
        provider
            .send_message(&handle, &outgoing(n))
            .await
            .expect("send succeeds");
    }

    let received = provider
        .receive_messages(&handle, 25, Duration::ZERO)
        .await
        .expect("receive succeeds");

    assert_eq!(received.len(), MAX_BATCH_SIZE);
    assert_eq!(provider.visible_len(&name), 5);
}

#[tokio::test]
async fn test_delete_removes_in_flight_messages() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    let messages: Vec<_> = (0..2).map(outgoing).collect();
    provider
        .send_messages(&handle, &messages)
        .await
        .expect("send succeeds");

    let received = provider
        .receive_messages(&handle, 10, Duration::ZERO)
        .await
        .expect("receive succeeds");
    let result = provider
        .delete_messages(&handle, &received)
        .await
        .expect("delete succeeds");

    assert_eq!(result.successful, vec![0, 1]);
    assert!(result.failed.is_empty());
    assert_eq!(provider.in_flight_len(&name), 0);
    assert_eq!(provider.visible_len(&name), 0);
}

#[tokio::test]
async fn test_delete_with_stale_receipt_reports_per_entry_failure() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    provider
        .send_message(&handle, &outgoing(0))
        .await
        .expect("send succeeds");
    let mut received = provider
        .receive_messages(&handle, 10, Duration::ZERO)
        .await
        .expect("receive succeeds");
    received.push(ReceivedMessage {
        message_id: "ghost".to_string(),
        body: String::new(),
        attributes: HashMap::new(),
        receipt_handle: "receipt-never-issued".to_string(),
    });

    let result = provider
        .delete_messages(&handle, &received)
        .await
        .expect("delete call succeeds at transport level");

    assert_eq!(result.successful, vec![0]);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].index, 1);
    assert_eq!(result.failed[0].code, "ReceiptHandleIsInvalid");
    assert!(result.failed[0].sender_fault);
    assert_eq!(result.total(), 2);
}

#[tokio::test]
async fn test_undeleted_message_reappears_after_visibility_timeout() {
    let name = queue_name("orders");
    let provider = InMemoryProvider::with_visibility_timeout(Duration::from_millis(20));
    provider.create_queue(&name);
    let handle = provider.resolve_queue(&name).await.expect("queue exists");

    provider
        .send_message(&handle, &outgoing(0))
        .await
        .expect("send succeeds");
    let received = provider
        .receive_messages(&handle, 10, Duration::ZERO)
        .await
        .expect("receive succeeds");
    assert_eq!(received.len(), 1);
    assert_eq!(provider.visible_len(&name), 0);

    tokio::time::sleep(Duration::from_millis(40)).await;

    let redelivered = provider
        .receive_messages(&handle, 10, Duration::ZERO)
        .await
        .expect("receive succeeds");
    assert_eq!(redelivered.len(), 1);
    assert_eq!(redelivered[0].message_id, received[0].message_id);
    // Redelivery issues a fresh receipt handle
    assert_ne!(redelivered[0].receipt_handle, received[0].receipt_handle);
}

#[tokio::test]
async fn test_batch_too_large_is_rejected() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    let messages: Vec<_> = (0..MAX_BATCH_SIZE + 1).map(outgoing).collect();
    let result = provider.send_messages(&handle, &messages).await;

    assert!(matches!(result, Err(QueueError::BatchTooLarge { size: 11, .. })));
}

#[tokio::test]
async fn test_approximate_message_count_tracks_visible_messages() {
    let name = queue_name("orders");
    let (provider, handle) = provider_with_queue(&name).await;

    for n in 0..4 {
        provider
            .send_message(&handle, &outgoing(n))
            .await
            .expect("send succeeds");
    }

    let count = provider
        .approximate_message_count(&handle)
        .await
        .expect("count succeeds");
    assert_eq!(count, 4);

    provider
        .receive_messages(&handle, 2, Duration::ZERO)
        .await
        .expect("receive succeeds");

    let count = provider
        .approximate_message_count(&handle)
        .await
        .expect("count succeeds");
    assert_eq!(count, 2);
}
