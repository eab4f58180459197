//! AWS SQS provider implementation.
//!
//! Thin wrapper over `aws-sdk-sqs`: each trait method is a single SQS call
//! plus error mapping into [`QueueError`], so the retry executor upstream
//! can classify outcomes. Credentials and region come from the standard
//! AWS configuration chain.

use crate::client::QueueProvider;
use crate::error::QueueError;
use crate::message::{
    BatchEntryFailure, BatchResult, OutgoingMessage, QueueHandle, QueueName, ReceivedMessage,
    MAX_BATCH_SIZE,
};
use async_trait::async_trait;
use aws_sdk_sqs::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sqs::types::{
    DeleteMessageBatchRequestEntry, MessageAttributeValue, QueueAttributeName,
    SendMessageBatchRequestEntry,
};
use aws_sdk_sqs::Client;
use std::collections::HashMap;
use std::time::Duration;

/// SQS long-poll wait ceiling, in seconds
const MAX_WAIT_SECONDS: u64 = 20;

/// AWS SQS queue provider
#[derive(Debug, Clone)]
pub struct SqsProvider {
    client: Client,
}

impl SqsProvider {
    /// Create a provider from an existing SQS client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a provider from the ambient AWS configuration
    /// (environment variables, shared config files, instance metadata)
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config))
    }

    fn check_batch_size(len: usize) -> Result<(), QueueError> {
        if len > MAX_BATCH_SIZE {
            return Err(QueueError::BatchTooLarge {
                size: len,
                max_size: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }
}

/// Map an SDK error into a [`QueueError`].
///
/// Dispatch and timeout failures never reached the service, so they map to
/// `ConnectionFailed` (always retryable). Service errors carry the AWS
/// error code for the classifier; the non-existent-queue codes become
/// `QueueNotFound`.
fn map_sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> QueueError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => QueueError::ConnectionFailed {
            message: format!("{}: {}", operation, DisplayErrorContext(&err)),
        },
        _ => {
            let code = err.code().unwrap_or("Unknown").to_string();
            let message = err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}", DisplayErrorContext(&err)));

            match code.as_str() {
                "AWS.SimpleQueueService.NonExistentQueue" | "QueueDoesNotExist" => {
                    QueueError::QueueNotFound {
                        queue_name: message,
                    }
                }
                _ => QueueError::Service { code, message },
            }
        }
    }
}

fn map_build_error(err: BuildError) -> QueueError {
    QueueError::Configuration {
        message: format!("failed to build batch entry: {}", err),
    }
}

fn string_attributes(
    attributes: &HashMap<String, String>,
) -> Result<HashMap<String, MessageAttributeValue>, QueueError> {
    attributes
        .iter()
        .map(|(key, value)| {
            let attr = MessageAttributeValue::builder()
                .data_type("String")
                .string_value(value)
                .build()
                .map_err(map_build_error)?;
            Ok((key.clone(), attr))
        })
        .collect()
}

#[async_trait]
impl QueueProvider for SqsProvider {
    async fn resolve_queue(&self, name: &QueueName) -> Result<QueueHandle, QueueError> {
        let response = self
            .client
            .get_queue_url()
            .queue_name(name.as_str())
            .send()
            .await
            .map_err(|err| match map_sdk_error("get_queue_url", err) {
                QueueError::QueueNotFound { .. } => QueueError::QueueNotFound {
                    queue_name: name.to_string(),
                },
                other => other,
            })?;

        let url = response
            .queue_url()
            .ok_or_else(|| QueueError::service("Unknown", "GetQueueUrl returned no URL"))?
            .to_string();

        Ok(QueueHandle::new(name.clone(), url))
    }

    async fn receive_messages(
        &self,
        queue: &QueueHandle,
        max_messages: u32,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        let wait_seconds = wait.as_secs().min(MAX_WAIT_SECONDS) as i32;

        let response = self
            .client
            .receive_message()
            .queue_url(queue.url())
            .max_number_of_messages(max_messages.min(MAX_BATCH_SIZE as u32) as i32)
            .wait_time_seconds(wait_seconds)
            .message_attribute_names("All")
            .send()
            .await
            .map_err(|err| map_sdk_error("receive_message", err))?;

        let messages = response
            .messages()
            .iter()
            .filter_map(|msg| {
                // A message without a receipt handle cannot be acknowledged;
                // skip it and let the visibility timeout redeliver it.
                let receipt_handle = msg.receipt_handle()?.to_string();
                let attributes = msg
                    .message_attributes()
                    .map(|attrs| {
                        attrs
                            .iter()
                            .filter_map(|(key, value)| {
                                value.string_value().map(|v| (key.clone(), v.to_string()))
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                Some(ReceivedMessage {
                    message_id: msg.message_id().unwrap_or_default().to_string(),
                    body: msg.body().unwrap_or_default().to_string(),
                    attributes,
                    receipt_handle,
                })
            })
            .collect();

        Ok(messages)
    }

    async fn delete_messages(
        &self,
        queue: &QueueHandle,
        messages: &[ReceivedMessage],
    ) -> Result<BatchResult, QueueError> {
        Self::check_batch_size(messages.len())?;

        let entries = messages
            .iter()
            .enumerate()
            .map(|(index, msg)| {
                DeleteMessageBatchRequestEntry::builder()
                    .id(index.to_string())
                    .receipt_handle(&msg.receipt_handle)
                    .build()
                    .map_err(map_build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let response = self
            .client
            .delete_message_batch()
            .queue_url(queue.url())
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|err| map_sdk_error("delete_message_batch", err))?;

        let successful = response
            .successful()
            .iter()
            .filter_map(|entry| entry.id().parse().ok())
            .collect();
        let failed = response
            .failed()
            .iter()
            .map(|entry| BatchEntryFailure {
                index: entry.id().parse().unwrap_or_default(),
                code: entry.code().to_string(),
                message: entry.message().unwrap_or_default().to_string(),
                sender_fault: entry.sender_fault(),
            })
            .collect();

        Ok(BatchResult { successful, failed })
    }

    async fn send_message(
        &self,
        queue: &QueueHandle,
        message: &OutgoingMessage,
    ) -> Result<String, QueueError> {
        let attributes = string_attributes(&message.attributes)?;

        let response = self
            .client
            .send_message()
            .queue_url(queue.url())
            .message_body(&message.body)
            .set_message_attributes((!attributes.is_empty()).then_some(attributes))
            .send()
            .await
            .map_err(|err| map_sdk_error("send_message", err))?;

        Ok(response.message_id().unwrap_or_default().to_string())
    }

    async fn send_messages(
        &self,
        queue: &QueueHandle,
        messages: &[OutgoingMessage],
    ) -> Result<BatchResult, QueueError> {
        Self::check_batch_size(messages.len())?;

        let entries = messages
            .iter()
            .enumerate()
            .map(|(index, msg)| {
                let attributes = string_attributes(&msg.attributes)?;
                SendMessageBatchRequestEntry::builder()
                    .id(index.to_string())
                    .message_body(&msg.body)
                    .set_message_attributes((!attributes.is_empty()).then_some(attributes))
                    .build()
                    .map_err(map_build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let response = self
            .client
            .send_message_batch()
            .queue_url(queue.url())
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|err| map_sdk_error("send_message_batch", err))?;

        let successful = response
            .successful()
            .iter()
            .filter_map(|entry| entry.id().parse().ok())
            .collect();
        let failed = response
            .failed()
            .iter()
            .map(|entry| BatchEntryFailure {
                index: entry.id().parse().unwrap_or_default(),
                code: entry.code().to_string(),
                message: entry.message().unwrap_or_default().to_string(),
                sender_fault: entry.sender_fault(),
            })
            .collect();

        Ok(BatchResult { successful, failed })
    }

    async fn approximate_message_count(&self, queue: &QueueHandle) -> Result<u64, QueueError> {
        let response = self
            .client
            .get_queue_attributes()
            .queue_url(queue.url())
            .attribute_names(QueueAttributeName::ApproximateNumberOfMessages)
            .send()
            .await
            .map_err(|err| map_sdk_error("get_queue_attributes", err))?;

        let count = response
            .attributes()
            .and_then(|attrs| attrs.get(&QueueAttributeName::ApproximateNumberOfMessages))
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        Ok(count)
    }
}
