//! Line-item resolution, totals and submit-time validation.
//!
//! Every function here is synchronous and works only on the values passed in. A
//! [`Catalog`] is a snapshot, so a price change in the store shows up on the next
//! resolution without anything here holding on to old prices.
//!
//! Mutating operations build the new line list first and swap it into the draft only
//! when everything succeeded, so a failed call leaves the draft exactly as it was.

use super::error::{PricingError, Violation, Violations};
use crate::model::{
    Catalog, LineItem, Money, OrderDraft, OrderRequest, ProductRef, StatusSet,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Shown in place of a product that has been removed from the catalog.
pub const UNAVAILABLE_PRODUCT: &str = "product no longer available";

/// Which field of an existing line to change.
#[derive(Debug, Clone)]
pub enum LineItemEdit {
    Product(ProductRef),
    Quantity(i64),
}

/// Not enough stock for one product across all lines that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub product: ProductRef,
    pub requested: u64,
    /// `None` when the product is no longer in the catalog.
    pub available: Option<u32>,
}

/// Prices `quantity` units of the referenced product at its current catalog price.
pub fn resolve_line_item(
    catalog: &Catalog,
    product_ref: &ProductRef,
    quantity: i64,
) -> Result<LineItem, PricingError> {
    let units = u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(PricingError::InvalidQuantity(quantity))?;

    let product = catalog
        .product(product_ref)
        .ok_or_else(|| PricingError::ProductNotFound(product_ref.clone()))?;

    LineItem::priced(product, units).ok_or(PricingError::AmountOverflow)
}

/// Sum of the subtotals; zero for no lines.
///
/// Fails with [`PricingError::AmountOverflow`] when the sum does not fit in a
/// `Decimal`.
pub fn compute_order_total(line_items: &[LineItem]) -> Result<Money, PricingError> {
    line_items
        .iter()
        .try_fold(Money::ZERO, |total, line| total.checked_add(line.subtotal()))
        .ok_or(PricingError::AmountOverflow)
}

fn commit(draft: &mut OrderDraft, line_items: Vec<LineItem>) -> Result<(), PricingError> {
    let total = compute_order_total(&line_items)?;
    draft.set_line_items(line_items, total);
    Ok(())
}

/// Resolves a line and appends it to the draft.
pub fn add_line_item(
    draft: &mut OrderDraft,
    product_ref: &ProductRef,
    quantity: i64,
    catalog: &Catalog,
) -> Result<(), PricingError> {
    let line = resolve_line_item(catalog, product_ref, quantity)?;
    let mut line_items = draft.line_items().to_vec();
    line_items.push(line);
    commit(draft, line_items)
}

/// Changes the product or the quantity of line `index`.
///
/// The line is priced again from the current catalog in both cases, so an edited line
/// picks up any price change since it was added. Other lines keep their snapshots.
pub fn update_line_item(
    draft: &mut OrderDraft,
    index: usize,
    edit: LineItemEdit,
    catalog: &Catalog,
) -> Result<(), PricingError> {
    let len = draft.line_items().len();
    let current = draft
        .line_items()
        .get(index)
        .ok_or(PricingError::IndexOutOfRange { index, len })?;

    let line = match edit {
        LineItemEdit::Product(product_ref) => {
            resolve_line_item(catalog, &product_ref, i64::from(current.quantity()))?
        }
        LineItemEdit::Quantity(quantity) => {
            resolve_line_item(catalog, &current.product_ref(), quantity)?
        }
    };

    let mut line_items = draft.line_items().to_vec();
    line_items[index] = line;
    commit(draft, line_items)
}

/// Removes line `index` and returns it.
pub fn remove_line_item(draft: &mut OrderDraft, index: usize) -> Result<LineItem, PricingError> {
    let len = draft.line_items().len();
    if index >= len {
        return Err(PricingError::IndexOutOfRange { index, len });
    }
    let mut line_items = draft.line_items().to_vec();
    let removed = line_items.remove(index);
    commit(draft, line_items)?;
    Ok(removed)
}

/// Collects every reason the draft cannot be submitted.
///
/// Fields that are empty or only whitespace count as missing.
pub fn validate_order(draft: &OrderDraft, statuses: &StatusSet) -> Violations {
    let mut violations = Violations::default();

    if draft.customer_name.trim().is_empty() {
        violations.insert(Violation::MissingCustomerName);
    }
    if draft.phone.trim().is_empty() {
        violations.insert(Violation::MissingPhone);
    }
    if draft.account_last5.trim().is_empty() {
        violations.insert(Violation::MissingAccountLast5);
    }
    if draft.line_items().is_empty() {
        violations.insert(Violation::NoLineItems);
    }
    if draft.shipping_method.trim().is_empty() {
        violations.insert(Violation::MissingShippingMethod);
    }
    if !statuses.contains(&draft.status) {
        violations.insert(Violation::UnknownStatus(draft.status.to_string()));
    }

    violations
}

/// Compares the quantities in `line_items` against current stock.
///
/// Quantities for the same product are added up before comparing. Shortfalls come
/// back ordered by product reference.
pub fn check_stock(catalog: &Catalog, line_items: &[LineItem]) -> Vec<StockShortfall> {
    let mut requested: BTreeMap<ProductRef, u64> = BTreeMap::new();
    for line in line_items {
        let key = match catalog.product(&line.product_ref()) {
            Some(product) => ProductRef::Id(product.id),
            None => line.product_ref(),
        };
        *requested.entry(key).or_default() += u64::from(line.quantity());
    }

    requested
        .into_iter()
        .filter_map(|(product_ref, requested)| {
            let available = catalog.product(&product_ref).map(|p| p.stock_quantity);
            match available {
                Some(stock) if u64::from(stock) >= requested => None,
                _ => Some(StockShortfall {
                    product: product_ref,
                    requested,
                    available,
                }),
            }
        })
        .collect()
}

/// Name to show for a line.
pub fn display_name(catalog: &Catalog, line: &LineItem) -> String {
    match catalog.product(&line.product_ref()) {
        Some(product) => product.name.clone(),
        None if line.product_id().is_some() => UNAVAILABLE_PRODUCT.to_string(),
        None => line.product_name().to_string(),
    }
}

/// Prices a submitted order into a fresh draft in the initial status.
#[instrument(skip(catalog, request), fields(lines = request.lines.len()))]
pub fn draft_from_request(
    catalog: &Catalog,
    request: &OrderRequest,
) -> Result<OrderDraft, PricingError> {
    let mut draft = OrderDraft::new(
        request.customer_name.clone(),
        request.phone.clone(),
        request.account_last5.clone(),
        request.shipping_method.clone(),
    );
    for line in &request.lines {
        add_line_item(&mut draft, &line.product, line.quantity, catalog)?;
    }
    debug!(total = %draft.total_amount(), "Priced order request");
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderLineRequest, OrderStatus, Product, ProductId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::new([
            Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10),
            Product::new(ProductId(2), "Mug", Money::whole(100), 5),
            Product::new(ProductId(3), "Sticker", Money::whole(50), 2),
        ])
    }

    fn draft() -> OrderDraft {
        OrderDraft::new("王小明", "0912345678", "12345", "郵局")
    }

    #[test]
    fn test_tshirt_scenario() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 2, &catalog()).unwrap();

        let line = &order.line_items()[0];
        assert_eq!(line.product_id(), Some(ProductId(1)));
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.unit_price(), Money::whole(300));
        assert_eq!(line.subtotal(), Money::whole(600));
        assert_eq!(order.total_amount(), Money::whole(600));
    }

    #[test]
    fn test_two_lines_total() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(2).into(), 2, &catalog()).unwrap();
        add_line_item(&mut order, &"Sticker".into(), 3, &catalog()).unwrap();

        let subtotals: Vec<Money> = order.line_items().iter().map(|l| l.subtotal()).collect();
        assert_eq!(subtotals, [Money::whole(200), Money::whole(150)]);
        assert_eq!(order.total_amount(), Money::whole(350));
        assert_eq!(compute_order_total(order.line_items()), Ok(Money::whole(350)));
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(compute_order_total(&[]), Ok(Money::ZERO));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let catalog = Catalog::new([Product::new(
            ProductId(1),
            "Gold bar",
            Money::new(Decimal::MAX),
            10,
        )]);
        let line = resolve_line_item(&catalog, &ProductId(1).into(), 1).unwrap();
        assert_eq!(
            compute_order_total(&[line.clone(), line]),
            Err(PricingError::AmountOverflow)
        );

        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog).unwrap();
        let before = order.clone();
        assert_eq!(
            add_line_item(&mut order, &ProductId(1).into(), 1, &catalog),
            Err(PricingError::AmountOverflow)
        );
        assert_eq!(order, before);
    }

    #[test]
    fn test_decimal_prices_do_not_drift() {
        let catalog = Catalog::new([Product::new(
            ProductId(1),
            "Pen",
            Money::new(dec!(0.1)),
            100,
        )]);
        let mut order = draft();
        for _ in 0..3 {
            add_line_item(&mut order, &ProductId(1).into(), 1, &catalog).unwrap();
        }
        assert_eq!(order.total_amount(), Money::new(dec!(0.3)));
    }

    #[test]
    fn test_resolve_errors() {
        let catalog = catalog();
        assert_eq!(
            resolve_line_item(&catalog, &ProductId(99).into(), 1),
            Err(PricingError::ProductNotFound(ProductRef::Id(ProductId(99))))
        );
        assert_eq!(
            resolve_line_item(&catalog, &"Hoodie".into(), 1),
            Err(PricingError::ProductNotFound("Hoodie".into()))
        );
        for quantity in [0, -1, i64::from(u32::MAX) + 1] {
            assert_eq!(
                resolve_line_item(&catalog, &ProductId(1).into(), quantity),
                Err(PricingError::InvalidQuantity(quantity))
            );
        }
    }

    #[test]
    fn test_resolve_does_not_touch_stock() {
        let catalog = catalog();
        resolve_line_item(&catalog, &ProductId(1).into(), 20).unwrap();
        assert_eq!(catalog.product(&ProductId(1).into()).unwrap().stock_quantity, 10);
    }

    #[test]
    fn test_failed_add_leaves_draft_unchanged() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog()).unwrap();
        let before = order.clone();

        assert!(add_line_item(&mut order, &ProductId(42).into(), 1, &catalog()).is_err());
        assert!(add_line_item(&mut order, &ProductId(2).into(), 0, &catalog()).is_err());
        assert_eq!(order, before);
    }

    #[test]
    fn test_update_quantity_only_touches_that_line() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog()).unwrap();
        add_line_item(&mut order, &ProductId(2).into(), 1, &catalog()).unwrap();
        let first = order.line_items()[0].clone();

        update_line_item(&mut order, 1, LineItemEdit::Quantity(4), &catalog()).unwrap();

        assert_eq!(order.line_items()[0], first);
        assert_eq!(order.line_items()[1].subtotal(), Money::whole(400));
        assert_eq!(order.total_amount(), Money::whole(700));
    }

    #[test]
    fn test_update_reprices_from_current_catalog() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 2, &catalog()).unwrap();

        let repriced = Catalog::new([Product::new(ProductId(1), "T-Shirt", Money::whole(350), 10)]);
        update_line_item(&mut order, 0, LineItemEdit::Quantity(2), &repriced).unwrap();
        assert_eq!(order.total_amount(), Money::whole(700));

        update_line_item(
            &mut order,
            0,
            LineItemEdit::Product(ProductId(3).into()),
            &catalog(),
        )
        .unwrap();
        let line = &order.line_items()[0];
        assert_eq!(line.product_name(), "Sticker");
        assert_eq!(line.quantity(), 2);
        assert_eq!(order.total_amount(), Money::whole(100));
    }

    #[test]
    fn test_update_and_remove_out_of_range() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog()).unwrap();
        let before = order.clone();

        assert_eq!(
            update_line_item(&mut order, 3, LineItemEdit::Quantity(1), &catalog()),
            Err(PricingError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            remove_line_item(&mut order, 1),
            Err(PricingError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(order, before);

        let removed = remove_line_item(&mut order, 0).unwrap();
        assert_eq!(removed.product_name(), "T-Shirt");
        assert_eq!(order.total_amount(), Money::ZERO);
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let mut order = OrderDraft::new("", " ", "", "");
        order.status = OrderStatus::new("遺失");

        let violations = validate_order(&order, &StatusSet::canonical());
        assert!(violations.contains(&Violation::MissingCustomerName));
        assert!(violations.contains(&Violation::MissingPhone));
        assert!(violations.contains(&Violation::MissingAccountLast5));
        assert!(violations.contains(&Violation::NoLineItems));
        assert!(violations.contains(&Violation::MissingShippingMethod));
        assert!(violations.contains(&Violation::UnknownStatus("遺失".into())));
        assert_eq!(violations.len(), 6);
    }

    #[test]
    fn test_validate_name_and_phone_together() {
        let mut order = OrderDraft::new("", "", "12345", "郵局");
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog()).unwrap();

        let violations = validate_order(&order, &StatusSet::canonical());
        let found: Vec<&Violation> = violations.iter().collect();
        assert_eq!(found, [&Violation::MissingCustomerName, &Violation::MissingPhone]);
        assert!(matches!(
            violations.into_result(),
            Err(PricingError::ValidationFailed(v)) if v.len() == 2
        ));
    }

    #[test]
    fn test_valid_order_and_registered_status() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(1).into(), 1, &catalog()).unwrap();
        assert!(validate_order(&order, &StatusSet::canonical()).is_empty());

        order.status = OrderStatus::new("已退款");
        assert!(!validate_order(&order, &StatusSet::canonical()).is_empty());
        assert!(validate_order(&order, &StatusSet::with_registered(["已退款"])).is_empty());
    }

    #[test]
    fn test_check_stock_sums_lines_per_product() {
        let catalog = catalog();
        let mut order = draft();
        add_line_item(&mut order, &ProductId(3).into(), 1, &catalog).unwrap();
        add_line_item(&mut order, &"Sticker".into(), 2, &catalog).unwrap();
        add_line_item(&mut order, &ProductId(1).into(), 10, &catalog).unwrap();

        assert_eq!(
            check_stock(&catalog, order.line_items()),
            [StockShortfall {
                product: ProductId(3).into(),
                requested: 3,
                available: Some(2),
            }]
        );

        let shrunk = Catalog::new([Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10)]);
        let shortfalls = check_stock(&shrunk, order.line_items());
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].available, None);
    }

    #[test]
    fn test_display_name_falls_back_to_placeholder() {
        let mut order = draft();
        add_line_item(&mut order, &ProductId(2).into(), 1, &catalog()).unwrap();
        let line = &order.line_items()[0];

        let renamed = Catalog::new([Product::new(ProductId(2), "Big Mug", Money::whole(100), 5)]);
        assert_eq!(display_name(&renamed, line), "Big Mug");
        assert_eq!(display_name(&Catalog::default(), line), UNAVAILABLE_PRODUCT);

        let legacy = LineItem::snapshot(None, "手工皂", 1, Money::whole(80)).unwrap();
        assert_eq!(display_name(&Catalog::default(), &legacy), "手工皂");
    }

    #[test]
    fn test_draft_from_request() {
        let request = OrderRequest {
            customer_name: "王小明".into(),
            phone: "0912345678".into(),
            account_last5: "12345".into(),
            shipping_method: "7-11".into(),
            lines: vec![
                OrderLineRequest {
                    product: "T-Shirt".into(),
                    quantity: 2,
                },
                OrderLineRequest {
                    product: ProductId(2).into(),
                    quantity: 1,
                },
            ],
        };
        let order = draft_from_request(&catalog(), &request).unwrap();
        assert_eq!(order.status, OrderStatus::initial());
        assert_eq!(order.total_amount(), Money::whole(700));

        let mut bad = request.clone();
        bad.lines[1].quantity = -2;
        assert_eq!(
            draft_from_request(&catalog(), &bad),
            Err(PricingError::InvalidQuantity(-2))
        );
    }
}
