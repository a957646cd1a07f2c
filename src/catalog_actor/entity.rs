use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    // Reference data: no commands beyond CRUD. Stock adjustment on sale
    // completion is simulated elsewhere and never reaches the catalog.
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        if payload.sale_rate < 0.0 {
            return Err(format!("Invalid sale rate: {}", payload.sale_rate));
        }
        Ok(Self {
            id,
            article_code: payload.article_code,
            fabric_description: payload.fabric_description,
            color: payload.color,
            unit_of_measure: payload.unit_of_measure,
            sale_rate: payload.sale_rate,
            gst_applicable: payload.gst_applicable,
            current_stock: payload.current_stock,
            min_stock_level: payload.min_stock_level,
            godown: payload.godown,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(sale_rate) = patch.sale_rate {
            if sale_rate < 0.0 {
                return Err(format!("Invalid sale rate: {}", sale_rate));
            }
            self.sale_rate = sale_rate;
        }
        if let Some(gst_applicable) = patch.gst_applicable {
            self.gst_applicable = gst_applicable;
        }
        if let Some(current_stock) = patch.current_stock {
            self.current_stock = current_stock;
        }
        if let Some(godown) = patch.godown {
            self.godown = godown;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
