//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order store depends on the catalog: statuses are checked against the current
//! status set, and stock is reserved through the product store when an order is
//! committed. Both go through the [`CatalogClient`] injected at `run()` time.

use super::error::OrderError;
use crate::clients::CatalogClient;
use crate::model::{Order, OrderDraft, OrderId, OrderUpdate};
use crate::pricing::validate_order;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = CatalogClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, draft: OrderDraft) -> Result<Self, Self::Error> {
        Ok(Self::new(id, draft))
    }

    /// Validates the draft and reserves stock for every line.
    ///
    /// Reservation is all-or-nothing; if it fails the order is not stored.
    async fn on_create(&mut self, catalog: &CatalogClient) -> Result<(), Self::Error> {
        let statuses = catalog.fetch_statuses().await?;
        validate_order(&self.draft, &statuses).into_result()?;

        catalog
            .products()
            .reserve_lines(self.draft.line_items())
            .await?;
        info!(order_id = %self.id, total = %self.total_amount(), "Stock reserved");
        Ok(())
    }

    /// Stock is left alone on replace; reservations made at creation stay as they are.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        catalog: &CatalogClient,
    ) -> Result<(), Self::Error> {
        let statuses = catalog.fetch_statuses().await?;
        match update {
            OrderUpdate::Replace(draft) => {
                validate_order(&draft, &statuses).into_result()?;
                self.draft = draft;
            }
            OrderUpdate::SetStatus(status) => {
                if !statuses.contains(&status) {
                    return Err(OrderError::UnknownStatus(status.to_string()));
                }
                debug!(order_id = %self.id, from = %self.draft.status, to = %status, "Status change");
                self.draft.status = status;
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &CatalogClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
