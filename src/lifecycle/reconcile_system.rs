use crate::clients::{ActorClient, CatalogClient, OrderClient, ProductClient};
use crate::config::SystemConfig;
use crate::export::{self, ExportError};
use crate::{catalog_actor, order_actor, product_actor};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Could not read {store} for export: {message}")]
    ExportSource {
        store: &'static str,
        message: String,
    },
}

/// Runtime orchestrator for the reconciliation back office.
///
/// Starts the product, catalog-entry and order actors, wires the order store to the
/// catalog, and shuts everything down again.
///
/// # Example
///
/// ```rust
/// use order_reconcile::config::SystemConfig;
/// use order_reconcile::lifecycle::ReconcileSystem;
/// use order_reconcile::model::{CatalogEntryKind, Money, ProductCreate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = ReconcileSystem::new(&SystemConfig::default());
///
///     system
///         .catalog_client
///         .register_entry(CatalogEntryKind::ShippingMethod, "郵局")
///         .await?;
///     system
///         .product_client
///         .create_product(ProductCreate {
///             name: "T-Shirt".to_string(),
///             unit_price: Money::whole(300),
///             stock_quantity: 10,
///         })
///         .await?;
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct ReconcileSystem {
    pub product_client: ProductClient,

    /// Also the way to reach products when building catalog snapshots
    pub catalog_client: CatalogClient,

    pub order_client: OrderClient,

    export_dir: PathBuf,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ReconcileSystem {
    /// Spawns every actor and wires their dependencies. Needs a running Tokio runtime.
    pub fn new(config: &SystemConfig) -> Self {
        let capacity = config.channel_capacity;

        // 1. Create actors (no dependencies yet)
        let (product_actor, products) = product_actor::new(capacity);
        let (entry_actor, entries) = catalog_actor::new(capacity);
        let (order_actor, orders) = order_actor::new(capacity);

        let product_client = ProductClient::new(products);
        let catalog_client = CatalogClient::new(entries, product_client.clone());
        let order_client = OrderClient::new(orders);

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let entry_handle = tokio::spawn(entry_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(catalog_client.clone()));

        info!(capacity, export_dir = %config.export_dir.display(), "System started");

        Self {
            product_client,
            catalog_client,
            order_client,
            export_dir: config.export_dir.clone(),
            handles: vec![product_handle, entry_handle, order_handle],
        }
    }

    /// Writes `orders.csv` and `products.csv` to the configured export directory.
    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> Result<(PathBuf, PathBuf), SystemError> {
        let catalog = self
            .catalog_client
            .fetch_catalog()
            .await
            .map_err(|e| SystemError::ExportSource {
                store: "catalog",
                message: e.to_string(),
            })?;
        let orders = self
            .order_client
            .list()
            .await
            .map_err(|e| SystemError::ExportSource {
                store: "orders",
                message: e.to_string(),
            })?;
        let products: Vec<_> = catalog.products().cloned().collect();

        let orders_path = export::write_export(
            &self.export_dir,
            export::ORDERS_FILE,
            &export::orders_csv(&orders, &catalog),
        )
        .await?;
        let products_path = export::write_export(
            &self.export_dir,
            export::PRODUCTS_FILE,
            &export::products_csv(&products),
        )
        .await?;
        Ok((orders_path, products_path))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the request channels. The order actor holds a
    /// catalog client, so it is awaited before the product and catalog-entry actors
    /// can see their channels close.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.catalog_client);
        drop(self.product_client);

        // Handles are in start order; await in reverse so dependents finish first
        for handle in self.handles.into_iter().rev() {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
