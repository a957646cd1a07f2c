use crate::domain::{CartLine, CartSnapshot, CartTotals, Product};

/// Commands the billing actor accepts against one open sale.
///
/// Product data arrives pre-resolved: the [`crate::clients::BillingClient`]
/// performs the catalog lookups before dispatching, so every action runs to
/// completion inside the actor without blocking on another service.
#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem {
        product: Product,
    },
    SetQuantity {
        line_id: String,
        quantity: i64,
        /// The article's tax applicability as of this update, re-read from
        /// the catalog by the caller. A missing article degrades to `false`.
        gst_applicable: bool,
    },
    RemoveItem {
        line_id: String,
    },
    Clear,
    Totals,
    Snapshot,
}

#[derive(Debug, Clone)]
pub enum CartActionResult {
    /// Id of the line the item landed on (new or coalesced).
    ItemAdded(String),
    /// The updated line, or `None` when the quantity change removed it.
    QuantitySet(Option<CartLine>),
    ItemRemoved,
    Cleared,
    Totals(CartTotals),
    Snapshot(CartSnapshot),
}
