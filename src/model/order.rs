/// A customer order: contact details, payment reference and priced line items.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderDraft`])
/// - Update parameters ([`OrderUpdate`])
use crate::model::{Money, OrderStatus, Product, ProductId, ProductRef};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One priced line of an order.
///
/// The unit price is a snapshot taken when the line was resolved; later catalog price
/// changes do not reach it. `subtotal` is always `quantity * unit_price` because the
/// fields can only be set together through the constructors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    product_id: Option<ProductId>,
    product_name: String,
    quantity: u32,
    unit_price: Money,
    subtotal: Money,
}

impl LineItem {
    /// Prices `quantity` units of `product` at its current price.
    ///
    /// Returns `None` if the subtotal does not fit in a `Money`.
    pub fn priced(product: &Product, quantity: u32) -> Option<Self> {
        Self::snapshot(
            Some(product.id),
            product.name.clone(),
            quantity,
            product.unit_price,
        )
    }

    /// Rebuilds a line from recorded values, e.g. an order read back from the wire.
    pub fn snapshot(
        product_id: Option<ProductId>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Option<Self> {
        Some(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            subtotal: unit_price.times(quantity)?,
        })
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    /// Product name as it was when the line was priced.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// The reference used to look this line's product up again.
    pub fn product_ref(&self) -> ProductRef {
        match self.product_id {
            Some(id) => ProductRef::Id(id),
            None => ProductRef::Name(self.product_name.clone()),
        }
    }
}

/// An order being composed or edited. Everything an [`Order`] has except its id.
///
/// Contact fields are public; line items are only changed through the pricing
/// engine, which keeps `total_amount` equal to the sum of the subtotals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub phone: String,
    /// Last characters of the paying bank account, matched by hand against the
    /// bank statement. Free text.
    pub account_last5: String,
    pub shipping_method: String,
    pub status: OrderStatus,
    line_items: Vec<LineItem>,
    total_amount: Money,
}

impl OrderDraft {
    /// An empty draft in the initial status.
    pub fn new(
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        account_last5: impl Into<String>,
        shipping_method: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            phone: phone.into(),
            account_last5: account_last5.into(),
            shipping_method: shipping_method.into(),
            status: OrderStatus::initial(),
            line_items: Vec::new(),
            total_amount: Money::ZERO,
        }
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub(crate) fn set_line_items(&mut self, line_items: Vec<LineItem>, total_amount: Money) {
        self.line_items = line_items;
        self.total_amount = total_amount;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

impl Order {
    pub fn new(id: OrderId, draft: OrderDraft) -> Self {
        Self { id, draft }
    }

    pub fn status(&self) -> &OrderStatus {
        &self.draft.status
    }

    pub fn total_amount(&self) -> Money {
        self.draft.total_amount()
    }
}

/// Changes accepted by the order store.
#[derive(Debug, Clone)]
pub enum OrderUpdate {
    /// Full replace of contact fields and line items. The status is taken from the
    /// new draft as well.
    Replace(OrderDraft),
    /// Moves the order to another known status.
    SetStatus(OrderStatus),
}

/// An order as submitted by the presentation layer, before pricing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub phone: String,
    pub account_last5: String,
    pub shipping_method: String,
    pub lines: Vec<OrderLineRequest>,
}

/// Quantities arrive signed so that zero and negative input can be reported as
/// invalid rather than failing to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub product: ProductRef,
    pub quantity: i64,
}
