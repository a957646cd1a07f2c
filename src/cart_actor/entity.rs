use super::actions::{CartAction, CartActionResult};
use super::dtos::{CartCreate, CustomerPatch};
use crate::actor_framework::Entity;
use crate::domain::Cart;

impl Entity for Cart {
    type Id = String;
    type CreatePayload = CartCreate;
    type Patch = CustomerPatch;
    type Action = CartAction;
    type ActionResult = CartActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, _payload: CartCreate) -> Result<Self, String> {
        Ok(Cart::new(id))
    }

    /// Customer details are the only patchable cart state; lines move
    /// through actions so their derived fields can never be set directly.
    fn on_update(&mut self, patch: CustomerPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.customer.name = name;
        }
        if let Some(phone) = patch.phone {
            self.customer.phone = phone;
        }
        if let Some(address) = patch.address {
            self.customer.address = address;
        }
        Ok(())
    }

    /// Every arm delegates to the pure cart engine and returns with the
    /// totals-consistency invariant already restored, so a snapshot taken
    /// right after any action is coherent.
    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, String> {
        match action {
            CartAction::AddItem { product } => {
                let line_id = self.add_item(&product);
                Ok(CartActionResult::ItemAdded(line_id))
            }
            CartAction::SetQuantity { line_id, quantity, gst_applicable } => {
                let line = self.set_quantity(&line_id, quantity, gst_applicable);
                Ok(CartActionResult::QuantitySet(line))
            }
            CartAction::RemoveItem { line_id } => {
                self.remove_item(&line_id);
                Ok(CartActionResult::ItemRemoved)
            }
            CartAction::Clear => {
                self.clear();
                Ok(CartActionResult::Cleared)
            }
            CartAction::Totals => Ok(CartActionResult::Totals(self.totals())),
            CartAction::Snapshot => Ok(CartActionResult::Snapshot(self.snapshot())),
        }
    }
}
