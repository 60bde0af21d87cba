//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test holds instead of a running
/// `ResourceActor`, so the test decides every reply (success, failure, or none).
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CategoryClient;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client(10);
        let client = CategoryClient::new(inner);

        let create_task = tokio::spawn(async move { client.upsert_category(None, "Dairy".to_string()).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Dairy");
        let category = crate::domain::Category { id: "c1".into(), name: "Dairy".into(), slug: "dairy".into() };
        responder.send(Ok(category.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(category));
    }
}
