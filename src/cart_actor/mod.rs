//! Billing-specific actor wiring: cart actions, DTOs, the
//! [`crate::domain::Cart`] entity implementation, and the billing error type.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
