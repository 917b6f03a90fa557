use crate::clients::CatalogClient;
use crate::model::{Order, OrderDraft, OrderId, OrderRequest, OrderStatus, OrderUpdate, StatusSet};
use crate::order_actor::OrderError;
use crate::pricing::draft_from_request;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Validation and stock reservation happen in the Order actor's `on_create` hook;
/// this client only prices requests and forwards them.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores an already priced draft.
    #[instrument(skip(self, draft), fields(total = %draft.total_amount()))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, OrderError> {
        debug!(?draft, "create_order called");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    /// Prices `request` against a fresh catalog snapshot and stores the order.
    #[instrument(skip(self, catalog, request), fields(customer = %request.customer_name))]
    pub async fn place_order(
        &self,
        catalog: &CatalogClient,
        request: &OrderRequest,
    ) -> Result<OrderId, OrderError> {
        let snapshot = catalog.fetch_catalog().await?;
        let draft = draft_from_request(&snapshot, request)?;
        let id = self.create_order(draft).await?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Every order, in id order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    /// Every order grouped by status: canonical statuses in forward order, then
    /// registered ones, then anything unknown. Id order within a status.
    pub async fn list_orders_by_status(
        &self,
        statuses: &StatusSet,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.sort_by_cached_key(|order| (statuses.sort_key(order.status()), order.id));
        Ok(orders)
    }

    /// Replaces contact fields, line items and status in one step.
    #[instrument(skip(self, draft))]
    pub async fn replace_order(&self, id: OrderId, draft: OrderDraft) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate::Replace(draft))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_update};

    #[tokio::test]
    async fn test_set_status_sends_update() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task =
            tokio::spawn(async move { orders.set_status(OrderId(3), "已對帳".into()).await });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, OrderId(3));
        assert!(matches!(&update, OrderUpdate::SetStatus(s) if s.as_str() == "已對帳"));

        responder
            .send(Err(FrameworkError::NotFound(OrderId(3).to_string())))
            .unwrap();
        assert_eq!(
            task.await.unwrap().unwrap_err(),
            OrderError::NotFound("order_3".into())
        );
    }
}
