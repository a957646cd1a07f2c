use thiserror::Error;

/// Errors that can occur during billing operations.
#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum BillingError {
    #[error("Cart not found: {0}")]
    CartNotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
