//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver. The client
//! sends its requests to a channel the test controls, so the test can play
//! the actor's role deterministically: inspect each request with helpers
//! like [`expect_get`] or [`expect_action`], then answer over the bundled
//! oneshot channel.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::from_sender(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
#[allow(dead_code)]
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => {
            Some((id, action, respond_to))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CatalogClient;
    use crate::domain::{Product, ProductCreate, UnitOfMeasure};

    #[tokio::test]
    async fn mock_client_relays_requests_and_responses() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let catalog = CatalogClient::new(inner);

        let create_task = tokio::spawn(async move {
            catalog
                .create_product(ProductCreate {
                    article_code: "GRG-078".into(),
                    fabric_description: "Georgette Embroidered".into(),
                    color: "Maroon".into(),
                    unit_of_measure: UnitOfMeasure::Meter,
                    sale_rate: 1450.0,
                    gst_applicable: true,
                    current_stock: 890,
                    min_stock_level: 200,
                    godown: "Godown C".into(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(payload.article_code, "GRG-078");
        responder.send(Ok("P007".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("P007".to_string()));
    }
}
