use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
#[allow(dead_code)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid sale rate: {0}")]
    InvalidSaleRate(f64),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
