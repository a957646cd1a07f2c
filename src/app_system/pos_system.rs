use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{BillingClient, CatalogClient};
use crate::domain::{Cart, Product};

/// One-time tracing setup for the whole application.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The main application system that orchestrates the POS actors.
///
/// Responsible for starting the catalog and billing actors, wiring the
/// billing client to its catalog collaborator, and handling shutdown.
pub struct PosSystem {
    pub catalog_client: CatalogClient,
    pub billing_client: BillingClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    pub fn new() -> Self {
        // 1. Catalog actor: product reference data, "P001"-style ids.
        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("P{:03}", id)
        };

        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<Product>::new(32, next_product_id);
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Billing actor: one cart entity per open sale.
        let sale_id_counter = Arc::new(AtomicU64::new(1));
        let next_cart_id = move || {
            let id = sale_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("SALE-{}", id)
        };

        let (billing_actor, cart_resource_client) = ResourceActor::<Cart>::new(32, next_cart_id);
        let billing_client = BillingClient::new(cart_resource_client, catalog_client.clone());
        let billing_handle = tokio::spawn(billing_actor.run());

        Self {
            catalog_client,
            billing_client,
            handles: vec![catalog_handle, billing_handle],
        }
    }

    /// Drop the clients (closing the request channels) and wait for the
    /// actors to drain and stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.billing_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for PosSystem {
    fn default() -> Self {
        Self::new()
    }
}
