mod actor_framework;
mod domain;

mod cart_actor;
mod catalog_actor;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;


use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, PosSystem};
use crate::cart_actor::CustomerPatch;
use crate::domain::{parse_quantity, ProductCreate, UnitOfMeasure};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting textile mill POS billing system");

    // Create the entire POS system (starts all actors)
    let system = PosSystem::new();

    // Seed the catalog with a couple of fabric articles
    let span = tracing::info_span!("catalog_seed");
    let (khaddar_id, lawn_id) = async {
        info!("Seeding product catalog");

        let khaddar_id = system
            .catalog_client
            .create_product(ProductCreate {
                article_code: "KHD-001".into(),
                fabric_description: "Khaddar Premium Quality 100% Cotton".into(),
                color: "White".into(),
                unit_of_measure: UnitOfMeasure::Meter,
                sale_rate: 450.0,
                gst_applicable: true,
                current_stock: 2500,
                min_stock_level: 500,
                godown: "Godown A".into(),
            })
            .await
            .map_err(|e| e.to_string())?;

        let lawn_id = system
            .catalog_client
            .create_product(ProductCreate {
                article_code: "LWN-012".into(),
                fabric_description: "Lawn Swiss Voile Printed".into(),
                color: "Red".into(),
                unit_of_measure: UnitOfMeasure::Meter,
                sale_rate: 850.0,
                gst_applicable: true,
                current_stock: 1800,
                min_stock_level: 300,
                godown: "Godown B".into(),
            })
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>((khaddar_id, lawn_id))
    }
    .instrument(span)
    .await?;

    info!(khaddar_id = %khaddar_id, lawn_id = %lawn_id, "Catalog seeded");

    let products = system
        .catalog_client
        .list_products()
        .await
        .map_err(|e| e.to_string())?;
    for product in &products {
        info!(
            article = %product.article_code,
            rate = product.sale_rate,
            uom = %product.unit_of_measure,
            stock = product.current_stock,
            godown = %product.godown,
            low_stock = product.is_below_min_stock(),
            "Catalog article"
        );
    }
    info!(count = products.len(), "Catalog ready");

    // Walk one sale end to end
    let span = tracing::info_span!("billing_session");
    async {
        let billing = &system.billing_client;

        let cart_id = billing.open_cart().await.map_err(|e| e.to_string())?;
        info!(cart_id = %cart_id, "Sale opened");

        billing
            .set_customer(
                cart_id.clone(),
                CustomerPatch {
                    name: Some("Ahmed Textiles (Pvt) Ltd".into()),
                    phone: Some("0300-1234567".into()),
                    address: Some("Plot 45, Industrial Area, Faisalabad".into()),
                },
            )
            .await
            .map_err(|e| e.to_string())?;

        // Two adds of the same article coalesce into one line
        let khaddar_line = billing
            .add_item(cart_id.clone(), khaddar_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        billing
            .add_item(cart_id.clone(), khaddar_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        let lawn_line = billing
            .add_item(cart_id.clone(), lawn_id.clone())
            .await
            .map_err(|e| e.to_string())?;

        // The cashier types a quantity; bad input coerces to 0 and removes,
        // a number recomputes the line's GST and total
        let typed = parse_quantity("10");
        billing
            .set_quantity(cart_id.clone(), khaddar_line.clone(), typed)
            .await
            .map_err(|e| e.to_string())?;

        // Customer changed their mind about the lawn
        billing
            .remove_item(cart_id.clone(), lawn_line.clone())
            .await
            .map_err(|e| e.to_string())?;

        let totals = billing.totals(cart_id.clone()).await.map_err(|e| e.to_string())?;
        info!(
            subtotal = totals.subtotal,
            gst = totals.total_gst,
            grand_total = totals.grand_total,
            "Running totals"
        );

        let snapshot = billing.snapshot(cart_id.clone()).await.map_err(|e| e.to_string())?;
        for line in &snapshot.lines {
            info!(
                line_id = %line.id,
                article = %line.article_code,
                quantity = line.quantity,
                rate = line.rate,
                gst = line.gst,
                line_total = line.line_total,
                "Invoice line"
            );
        }

        // Sale abandoned: one atomic reset of lines and customer details
        billing.clear_cart(cart_id.clone()).await.map_err(|e| e.to_string())?;
        info!(cart_id = %cart_id, "Sale cleared");

        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
