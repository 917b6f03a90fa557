use order_reconcile::model::{Catalog, LineItem, Money, OrderDraft, Product, ProductId, ProductRef};
use order_reconcile::pricing::{
    add_line_item, compute_order_total, resolve_line_item, update_line_item, LineItemEdit,
    PricingError,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

/// Prices up to 10 000.00 with zero to two decimal places.
fn price_strategy() -> impl Strategy<Value = Money> {
    (0_i64..1_000_000, 0_u32..=2)
        .prop_map(|(mantissa, scale)| Money::new(Decimal::new(mantissa, scale)))
}

/// Products with ids `1..=n` and lowercase names `p1..pn`.
fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    proptest::collection::vec((price_strategy(), 0_u32..500), 1..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, stock))| {
                let id = i as u32 + 1;
                Product::new(ProductId(id), format!("p{id}"), price, stock)
            })
            .collect()
    })
}

/// A catalog plus a sequence of (product index, quantity) picks into it.
fn order_strategy() -> impl Strategy<Value = (Vec<Product>, Vec<(usize, u32)>)> {
    catalog_strategy().prop_flat_map(|products| {
        let len = products.len();
        let picks = proptest::collection::vec((0..len, 1_u32..1_000), 0..12);
        (Just(products), picks)
    })
}

fn draft() -> OrderDraft {
    OrderDraft::new("王小明", "0912345678", "12345", "郵局")
}

fn resolve_all(catalog: &Catalog, products: &[Product], picks: &[(usize, u32)]) -> Vec<LineItem> {
    picks
        .iter()
        .map(|(index, quantity)| {
            resolve_line_item(catalog, &products[*index].id.into(), i64::from(*quantity))
                .expect("pick resolves")
        })
        .collect()
}

fn sum_of_subtotals(lines: &[LineItem]) -> Money {
    lines
        .iter()
        .try_fold(Money::ZERO, |total, line| total.checked_add(line.subtotal()))
        .expect("sum fits")
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn total_is_sum_of_subtotals_in_any_order((products, picks) in order_strategy()) {
        let catalog = Catalog::new(products.clone());
        let lines = resolve_all(&catalog, &products, &picks);
        let expected = sum_of_subtotals(&lines);

        prop_assert_eq!(compute_order_total(&lines), Ok(expected));

        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(compute_order_total(&reversed), Ok(expected));

        let mut order = draft();
        for (index, quantity) in &picks {
            add_line_item(&mut order, &products[*index].id.into(), i64::from(*quantity), &catalog)
                .expect("pick adds");
        }
        prop_assert_eq!(order.total_amount(), expected);
        prop_assert_eq!(order.line_items(), lines.as_slice());
    }

    #[test]
    fn resolved_subtotal_is_unit_price_times_quantity(
        products in catalog_strategy(),
        pick in any::<prop::sample::Index>(),
        quantity in 1_u32..100_000,
        by_name in any::<bool>()
    ) {
        let catalog = Catalog::new(products.clone());
        let product = pick.get(&products);
        let product_ref = if by_name {
            ProductRef::Name(product.name.clone())
        } else {
            ProductRef::Id(product.id)
        };

        let line = resolve_line_item(&catalog, &product_ref, i64::from(quantity)).unwrap();
        prop_assert_eq!(line.product_id(), Some(product.id));
        prop_assert_eq!(line.quantity(), quantity);
        prop_assert_eq!(line.unit_price(), product.unit_price);
        prop_assert_eq!(Some(line.subtotal()), product.unit_price.times(quantity));
    }

    #[test]
    fn missing_reference_is_not_found(
        products in catalog_strategy(),
        missing_offset in 1_u32..1_000,
        missing_name in "[A-Z][A-Za-z ]{0,12}",
        quantity in 1_i64..1_000
    ) {
        let missing_id = ProductId(products.len() as u32 + missing_offset);
        let catalog = Catalog::new(products);

        for product_ref in [ProductRef::Id(missing_id), ProductRef::Name(missing_name)] {
            prop_assert_eq!(
                resolve_line_item(&catalog, &product_ref, quantity),
                Err(PricingError::ProductNotFound(product_ref.clone()))
            );
        }
    }

    #[test]
    fn non_positive_quantity_is_invalid(
        products in catalog_strategy(),
        pick in any::<prop::sample::Index>(),
        quantity in i64::MIN..=0
    ) {
        let catalog = Catalog::new(products.clone());
        let product = pick.get(&products);

        prop_assert_eq!(
            resolve_line_item(&catalog, &product.id.into(), quantity),
            Err(PricingError::InvalidQuantity(quantity))
        );

        let mut order = draft();
        prop_assert_eq!(
            add_line_item(&mut order, &product.id.into(), quantity, &catalog),
            Err(PricingError::InvalidQuantity(quantity))
        );
        prop_assert!(order.line_items().is_empty());
    }

    #[test]
    fn update_leaves_other_lines_untouched(
        (products, picks) in order_strategy(),
        target in any::<prop::sample::Index>(),
        new_quantity in 1_i64..1_000,
        new_product in any::<prop::sample::Index>()
    ) {
        prop_assume!(!picks.is_empty());
        let catalog = Catalog::new(products.clone());
        let mut order = draft();
        for (index, quantity) in &picks {
            add_line_item(&mut order, &products[*index].id.into(), i64::from(*quantity), &catalog)
                .expect("pick adds");
        }
        let before = order.line_items().to_vec();
        let index = target.index(before.len());

        update_line_item(&mut order, index, LineItemEdit::Quantity(new_quantity), &catalog).unwrap();
        let replacement = new_product.get(&products).id;
        update_line_item(&mut order, index, LineItemEdit::Product(replacement.into()), &catalog)
            .unwrap();

        let after = order.line_items();
        prop_assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(after).enumerate() {
            if i != index {
                prop_assert_eq!(old, new);
            }
        }
        prop_assert_eq!(after[index].product_id(), Some(replacement));
        prop_assert_eq!(i64::from(after[index].quantity()), new_quantity);
        prop_assert_eq!(order.total_amount(), sum_of_subtotals(after));
    }
}
