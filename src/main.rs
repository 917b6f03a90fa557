//! Demo: sets up a small catalog, places and reconciles an order, and writes the CSV
//! exports.

use order_reconcile::clients::ActorClient;
use order_reconcile::config::SystemConfig;
use order_reconcile::lifecycle::{setup_tracing, ReconcileSystem};
use order_reconcile::model::{
    CatalogEntryKind, Money, OrderLineRequest, OrderRequest, OrderStatus, ProductCreate,
};
use order_reconcile::wire;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SystemConfig::from_env()?;
    info!(?config, "Starting order reconciliation demo");

    let system = ReconcileSystem::new(&config);

    let span = tracing::info_span!("catalog_setup");
    async {
        for method in ["郵局", "7-11 店到店"] {
            system
                .catalog_client
                .register_entry(CatalogEntryKind::ShippingMethod, method)
                .await?;
        }
        for (name, price, stock) in [("T-Shirt", 300, 20), ("帆布袋", 250, 5)] {
            let id = system
                .product_client
                .create_product(ProductCreate {
                    name: name.to_string(),
                    unit_price: Money::whole(price),
                    stock_quantity: stock,
                })
                .await?;
            info!(product_id = %id, name, "Product created");
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let request = OrderRequest {
        customer_name: "王小明".to_string(),
        phone: "0912345678".to_string(),
        account_last5: "12345".to_string(),
        shipping_method: "郵局".to_string(),
        lines: vec![
            OrderLineRequest {
                product: "T-Shirt".into(),
                quantity: 2,
            },
            OrderLineRequest {
                product: "帆布袋".into(),
                quantity: 1,
            },
        ],
    };

    let span = tracing::info_span!("order_placement");
    let placed = async {
        info!("Placing order");
        system
            .order_client
            .place_order(&system.catalog_client, &request)
            .await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(order_id) => {
            let order = system
                .order_client
                .set_status(order_id, OrderStatus::new(OrderStatus::RECONCILED))
                .await?;
            info!(
                order_id = %order_id,
                total = %order.total_amount(),
                status = %order.status(),
                "Payment reconciled"
            );
            info!(json = %wire::encode_order(&order)?, "Order record");
        }
        Err(e) => error!(error = %e, "Order placement failed"),
    }

    // Too many bags: rejected, and no stock is taken
    let greedy = OrderRequest {
        lines: vec![OrderLineRequest {
            product: "帆布袋".into(),
            quantity: 10,
        }],
        ..request
    };
    if let Err(e) = system
        .order_client
        .place_order(&system.catalog_client, &greedy)
        .await
    {
        info!(error = %e, "Order rejected as expected");
    }

    info!(orders = system.order_client.list().await?.len(), "Orders on file");

    let (orders_csv, products_csv) = system.export_csv().await?;
    info!(orders = %orders_csv.display(), products = %products_csv.display(), "CSV exported");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
