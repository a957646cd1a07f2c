//! Catalog-specific actor wiring: the [`crate::domain::Product`] entity
//! implementation and its error type.

pub mod entity;
pub mod error;

pub use error::*;
