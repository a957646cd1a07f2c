use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::CatalogError;
use crate::domain::{Product, ProductCreate, ProductPatch};

/// Client for interacting with the catalog actor.
///
/// The billing side only ever reads through this client; writes exist so the
/// catalog can be seeded and edited mid-session.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(CatalogClient, Product, CatalogError, product);

impl CatalogClient {
    #[instrument(skip(self, payload), fields(article_code = %payload.article_code))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner
            .create(payload)
            .await
            .map_err(CatalogError::ActorCommunicationError)
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn update_product(
        &self,
        id: String,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(CatalogError::ActorCommunicationError)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        self.inner
            .list()
            .await
            .map_err(CatalogError::ActorCommunicationError)
    }
}
