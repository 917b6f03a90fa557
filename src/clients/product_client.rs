//! # Product Client
//!
//! High-level API for the `Product` actor: creation with name checks, partial updates
//! and the stock actions.
use crate::model::{LineItem, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected action result: {:?}", result))
}

impl ProductClient {
    /// Creates a product. Names are unique within the catalog.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        if self.find_by_name(&params.name).await?.is_some() {
            return Err(ProductError::DuplicateName(params.name));
        }
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Applies a partial update. Renaming onto another product's name is rejected.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        if let Some(name) = &update.name {
            if let Some(other) = self.find_by_name(name).await? {
                if other.id != id {
                    return Err(ProductError::DuplicateName(name.clone()));
                }
            }
        }
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError> {
        Ok(self.list().await?.into_iter().find(|p| p.name == name))
    }

    /// Current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock, or fails with `InsufficientStock`.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Puts `quantity` units back and returns the new stock level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserves stock for every line of an order, or for none of them.
    ///
    /// Quantities are summed per product and reserved in product id order. If one
    /// reservation fails, everything reserved so far is released again and the first
    /// error is returned. Lines recorded without a product id have nothing to reserve.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn reserve_lines(&self, lines: &[LineItem]) -> Result<(), ProductError> {
        let mut wanted: BTreeMap<ProductId, u32> = BTreeMap::new();
        for line in lines {
            let Some(id) = line.product_id() else {
                debug!(product = line.product_name(), "No product id, skipping reservation");
                continue;
            };
            let total = wanted.entry(id).or_default();
            *total = total
                .checked_add(line.quantity())
                .ok_or(ProductError::InvalidQuantity(line.quantity()))?;
        }

        let mut reserved: Vec<(ProductId, u32)> = Vec::with_capacity(wanted.len());
        for (id, quantity) in wanted {
            if let Err(e) = self.reserve_stock(id, quantity).await {
                self.release_all(&reserved).await;
                return Err(e);
            }
            reserved.push((id, quantity));
        }
        Ok(())
    }

    async fn release_all(&self, reserved: &[(ProductId, u32)]) {
        for (id, quantity) in reserved {
            if let Err(e) = self.release_stock(*id, *quantity).await {
                warn!(product_id = %id, quantity, error = %e, "Failed to release stock");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Money;
    use resource_actor::mock::{create_mock_client, expect_action, expect_list, MockClient};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_keeps_typed_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::ReserveStock(100));

        let shortfall = ProductError::InsufficientStock {
            product: "T-Shirt".into(),
            requested: 100,
            available: 3,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(shortfall.clone()))))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap_err(), shortfall);
    }

    #[tokio::test]
    async fn test_create_product_rejects_duplicate_name() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let create_task = tokio::spawn(async move {
            product_client
                .create_product(ProductCreate {
                    name: "T-Shirt".into(),
                    unit_price: Money::whole(280),
                    stock_quantity: 1,
                })
                .await
        });

        let responder = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        responder
            .send(Ok(vec![Product::new(ProductId(1), "T-Shirt", Money::whole(300), 5)]))
            .unwrap();

        assert_eq!(
            create_task.await.unwrap().unwrap_err(),
            ProductError::DuplicateName("T-Shirt".into())
        );
    }

    #[tokio::test]
    async fn test_reserve_lines_releases_on_shortfall() {
        let mut mock = MockClient::<Product>::new();
        let products = ProductClient::new(mock.client());

        let tshirt = Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10);
        let mug = Product::new(ProductId(2), "Mug", Money::whole(100), 1);
        let lines = vec![
            LineItem::priced(&mug, 2).unwrap(),
            LineItem::priced(&tshirt, 3).unwrap(),
        ];

        // Reserved in id order: the T-Shirt first, then the Mug fails
        mock.expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReserveStock(()));
        mock.expect_action(ProductId(2))
            .return_err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    product: "Mug".into(),
                    requested: 2,
                    available: 1,
                },
            )));
        mock.expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReleaseStock(10));

        let err = products.reserve_lines(&lines).await.unwrap_err();
        assert!(matches!(err, ProductError::InsufficientStock { requested: 2, .. }));
        mock.verify();
    }

    #[tokio::test]
    async fn test_reserve_lines_sums_per_product() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let tshirt = Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10);
        let lines = vec![
            LineItem::priced(&tshirt, 2).unwrap(),
            LineItem::snapshot(None, "手工皂", 1, Money::whole(80)).unwrap(),
            LineItem::priced(&tshirt, 3).unwrap(),
        ];
        let reserve_task = tokio::spawn(async move { products.reserve_lines(&lines).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::ReserveStock(5));
        responder
            .send(Ok(ProductActionResult::ReserveStock(())))
            .unwrap();

        reserve_task.await.unwrap().unwrap();
    }
}
