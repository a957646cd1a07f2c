//! Domain-facing clients wrapping the generic [`crate::actor_framework::ResourceClient`].
//!
//! Clients translate framework transport errors into typed domain errors and
//! host the cross-actor orchestration (the billing client resolves products
//! from the catalog before dispatching cart actions).

#[macro_use]
pub mod macros;

mod billing_client;
mod catalog_client;

pub use billing_client::BillingClient;
pub use catalog_client::CatalogClient;
