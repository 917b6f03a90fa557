//! Catalog snapshot handed to the pricing engine.
//!
//! Built fresh from the stores on every `fetch_catalog`; never cached.

use crate::model::{Product, ProductId, ProductRef, StatusSet};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
    by_name: HashMap<String, ProductId>,
    shipping_methods: Vec<String>,
    statuses: StatusSet,
}

impl Catalog {
    /// A catalog of `products` with no registered shipping methods or statuses.
    ///
    /// Names should be unique; if two products share one, lookup by that name finds
    /// the lower id.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let products: BTreeMap<ProductId, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();

        let mut by_name = HashMap::new();
        for product in products.values() {
            if let Some(existing) = by_name.get(&product.name) {
                warn!(
                    name = %product.name,
                    kept = %existing,
                    shadowed = %product.id,
                    "Duplicate product name in catalog"
                );
                continue;
            }
            by_name.insert(product.name.clone(), product.id);
        }

        Self {
            products,
            by_name,
            shipping_methods: Vec::new(),
            statuses: StatusSet::default(),
        }
    }

    pub fn with_entries(mut self, shipping_methods: Vec<String>, statuses: StatusSet) -> Self {
        self.shipping_methods = shipping_methods;
        self.statuses = statuses;
        self
    }

    pub fn product(&self, product_ref: &ProductRef) -> Option<&Product> {
        match product_ref {
            ProductRef::Id(id) => self.products.get(id),
            ProductRef::Name(name) => self
                .by_name
                .get(name)
                .and_then(|id| self.products.get(id)),
        }
    }

    /// Products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn shipping_methods(&self) -> &[String] {
        &self.shipping_methods
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }
}
