use order_reconcile::clients::{ActorClient, CatalogClient, OrderClient, ProductClient};
use order_reconcile::model::{
    CatalogEntry, CatalogEntryId, CatalogEntryKind, Catalog, Money, OrderDraft, OrderStatus,
    Product, ProductId,
};
use order_reconcile::order_actor::OrderError;
use order_reconcile::pricing::{add_line_item, PricingError};
use order_reconcile::product_actor::{ProductActionResult, ProductError};
use resource_actor::mock::MockClient;
use resource_actor::FrameworkError;

fn tshirt() -> Product {
    Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10)
}

fn priced_draft() -> OrderDraft {
    let catalog = Catalog::new([tshirt()]);
    let mut draft = OrderDraft::new("王小明", "0912345678", "12345", "郵局");
    add_line_item(&mut draft, &ProductId(1).into(), 2, &catalog).unwrap();
    draft
}

/// Real Order actor with mocked catalog-entry and product stores.
/// Exercises the validation and reservation done in `on_create`.
#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut entry_mock = MockClient::<CatalogEntry>::new();
    let mut product_mock = MockClient::<Product>::new();

    // on_create reads the statuses, then reserves stock
    entry_mock.expect_list().return_ok(vec![]);
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(()));

    let catalog = CatalogClient::new(
        entry_mock.client(),
        ProductClient::new(product_mock.client()),
    );

    let (order_actor, order_generic_client) = order_reconcile::order_actor::new(10);
    let order_client = OrderClient::new(order_generic_client);
    let actor_handle = tokio::spawn(order_actor.run(catalog.clone()));

    let order_id = order_client.create_order(priced_draft()).await.unwrap();
    let order = order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.total_amount(), Money::whole(600));
    assert_eq!(order.status(), &OrderStatus::initial());

    entry_mock.verify();
    product_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_order_never_reaches_product_store() {
    let mut entry_mock = MockClient::<CatalogEntry>::new();
    let product_mock = MockClient::<Product>::new();
    entry_mock.expect_list().return_ok(vec![]);

    let catalog = CatalogClient::new(
        entry_mock.client(),
        ProductClient::new(product_mock.client()),
    );
    let (order_actor, generic) = order_reconcile::order_actor::new(10);
    let order_client = OrderClient::new(generic);
    tokio::spawn(order_actor.run(catalog));

    let mut draft = priced_draft();
    draft.account_last5.clear();
    let err = order_client.create_order(draft).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Invalid(PricingError::ValidationFailed(ref v)) if v.len() == 1
    ));

    assert!(order_client.list().await.unwrap().is_empty());
    entry_mock.verify();
}

#[tokio::test]
async fn test_registered_status_and_stock_failure() {
    let mut entry_mock = MockClient::<CatalogEntry>::new();
    let mut product_mock = MockClient::<Product>::new();

    let refunded = CatalogEntry {
        id: CatalogEntryId(1),
        kind: CatalogEntryKind::Status,
        name: "已退款".to_string(),
    };
    entry_mock.expect_list().return_ok(vec![refunded]);
    product_mock
        .expect_action(ProductId(1))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                product: "T-Shirt".to_string(),
                requested: 2,
                available: 1,
            },
        )));

    let catalog = CatalogClient::new(
        entry_mock.client(),
        ProductClient::new(product_mock.client()),
    );
    let (order_actor, generic) = order_reconcile::order_actor::new(10);
    let order_client = OrderClient::new(generic);
    tokio::spawn(order_actor.run(catalog));

    let mut draft = priced_draft();
    draft.status = OrderStatus::new("已退款");
    let err = order_client.create_order(draft).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Stock(ProductError::InsufficientStock { available: 1, .. })
    ));

    entry_mock.verify();
    product_mock.verify();
}
