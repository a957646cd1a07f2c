use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::cart_actor::{BillingError, CartAction, CartActionResult, CartCreate, CustomerPatch};
use crate::clients::CatalogClient;
use crate::domain::{Cart, CartLine, CartSnapshot, CartTotals};

/// Client for interacting with the billing actor.
///
/// This client hosts the cross-actor orchestration: products are resolved
/// against the live catalog before a cart action is dispatched. Adding an
/// item requires the article to exist; a quantity update only re-reads the
/// tax-applicability flag and degrades soft to exempt when the article has
/// since vanished from the catalog. The line's rate is never refreshed, it
/// stays frozen at its add-time value.
#[derive(Clone)]
pub struct BillingClient {
    inner: ResourceClient<Cart>,
    catalog_client: CatalogClient,
}

impl BillingClient {
    pub fn new(inner: ResourceClient<Cart>, catalog_client: CatalogClient) -> Self {
        Self { inner, catalog_client }
    }

    /// Open a fresh sale: empty cart, blank customer details.
    #[instrument(skip(self))]
    pub async fn open_cart(&self) -> Result<String, BillingError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate)
            .await
            .map_err(BillingError::ActorCommunicationError)
    }

    /// Add one unit of an article to the sale.
    ///
    /// Returns the id of the cart line the unit landed on. Repeat adds of
    /// the same article coalesce into the existing line inside the actor.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        cart_id: String,
        product_id: String,
    ) -> Result<String, BillingError> {
        info!("Processing add_item request");

        let product = match self.catalog_client.get_product(product_id.clone()).await {
            Ok(Some(product)) => {
                info!(article_code = %product.article_code, "Product lookup successful");
                product
            }
            Ok(None) => {
                error!("Product not found");
                return Err(BillingError::InvalidProduct(product_id));
            }
            Err(e) => {
                error!(error = %e, "Product lookup failed");
                return Err(BillingError::InvalidProduct(format!(
                    "Product lookup failed: {}",
                    e
                )));
            }
        };

        match self
            .inner
            .perform_action(cart_id, CartAction::AddItem { product })
            .await
        {
            Ok(CartActionResult::ItemAdded(line_id)) => Ok(line_id),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    /// Change a line's quantity. Zero or negative removes the line.
    ///
    /// The article's tax-applicability is re-read from the catalog so edits
    /// made after the item entered the cart affect the recomputation; an
    /// article missing from the catalog is billed as exempt rather than
    /// failing the update.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        cart_id: String,
        line_id: String,
        quantity: i64,
    ) -> Result<Option<CartLine>, BillingError> {
        info!("Processing set_quantity request");

        let cart = self
            .inner
            .get(cart_id.clone())
            .await
            .map_err(BillingError::ActorCommunicationError)?
            .ok_or_else(|| BillingError::CartNotFound(cart_id.clone()))?;

        let gst_applicable = match cart.lines().iter().find(|l| l.id == line_id) {
            Some(line) => match self.catalog_client.get_product(line.product_id.clone()).await {
                Ok(Some(product)) => product.gst_applicable,
                Ok(None) => {
                    debug!(product_id = %line.product_id, "Product gone from catalog, billing as exempt");
                    false
                }
                Err(e) => {
                    error!(error = %e, "Product lookup failed");
                    return Err(BillingError::ActorCommunicationError(e.to_string()));
                }
            },
            // Unknown line: the action no-ops inside the actor, the flag
            // value is irrelevant.
            None => false,
        };

        match self
            .inner
            .perform_action(
                cart_id,
                CartAction::SetQuantity { line_id, quantity, gst_applicable },
            )
            .await
        {
            Ok(CartActionResult::QuantitySet(line)) => Ok(line),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    /// Remove a line from the sale. Idempotent: an absent line id succeeds.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        cart_id: String,
        line_id: String,
    ) -> Result<(), BillingError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(cart_id, CartAction::RemoveItem { line_id })
            .await
        {
            Ok(CartActionResult::ItemRemoved) => Ok(()),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    /// Abandon the sale: drop all lines and the customer details in one
    /// atomic reset inside the actor.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, cart_id: String) -> Result<(), BillingError> {
        debug!("Sending request");
        match self.inner.perform_action(cart_id, CartAction::Clear).await {
            Ok(CartActionResult::Cleared) => Ok(()),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn totals(&self, cart_id: String) -> Result<CartTotals, BillingError> {
        debug!("Sending request");
        match self.inner.perform_action(cart_id, CartAction::Totals).await {
            Ok(CartActionResult::Totals(totals)) => Ok(totals),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    /// The full cart view handed to the invoice formatter: customer details,
    /// ordered lines, and freshly computed totals.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, cart_id: String) -> Result<CartSnapshot, BillingError> {
        debug!("Sending request");
        match self.inner.perform_action(cart_id, CartAction::Snapshot).await {
            Ok(CartActionResult::Snapshot(snapshot)) => Ok(snapshot),
            Ok(_) => Err(BillingError::ActorCommunicationError(
                "Unexpected result".to_string(),
            )),
            Err(e) => Err(BillingError::ActorCommunicationError(e)),
        }
    }

    #[instrument(skip(self, patch))]
    pub async fn set_customer(
        &self,
        cart_id: String,
        patch: CustomerPatch,
    ) -> Result<Cart, BillingError> {
        debug!("Sending request");
        self.inner
            .update(cart_id, patch)
            .await
            .map_err(BillingError::ActorCommunicationError)
    }
}

impl_client_methods!(BillingClient, Cart, BillingError, cart);
