//! # Wire Records
//!
//! JSON shapes for orders crossing the API boundary.
//!
//! [`OrderRecord`] is the canonical shape: an order with a list of priced line items.
//! [`LegacyOrderRecord`] is the older flat shape (one product name, one quantity, one
//! amount) still sent by some front ends, under several field spellings:
//!
//! | Canonical field   | Also accepted as     |
//! |-------------------|----------------------|
//! | `name`            | `customer_name`      |
//! | `item`            | `product`            |
//! | `account_last5`   | `account`            |
//! | `shipping`        | `shipping_method`    |
//! | `amount`          | `total_amount`       |
//!
//! A flat order becomes a draft with exactly one line item. Amounts are never trusted:
//! subtotals and totals are recomputed, and a record whose recorded amounts disagree
//! with the recomputation is rejected.

use crate::model::{
    Catalog, LineItem, Money, Order, OrderDraft, OrderId, OrderStatus, ProductId, ProductRef,
};
use crate::pricing::{compute_order_total, resolve_line_item, PricingError};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Malformed order JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Line {index}: recorded subtotal {recorded} but quantity x price is {computed}")]
    SubtotalMismatch {
        index: usize,
        recorded: Money,
        computed: Money,
    },

    #[error("Recorded total {recorded} but line items add up to {computed}")]
    TotalMismatch { recorded: Money, computed: Money },

    /// A flat order's amount must split into a whole-cent unit price.
    #[error("Amount {amount} cannot be split evenly over {quantity} units")]
    AmountNotDivisible { amount: Money, quantity: u32 },

    #[error("Negative amount: {0}")]
    NegativeAmount(Money),

    /// Only single-line orders have a flat representation.
    #[error("Flat order records hold exactly one line item, this order has {0}")]
    NotSingleLine(usize),
}

/// One priced line in an [`OrderRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// Canonical order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub phone: String,
    pub account_last5: String,
    pub shipping_method: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub line_items: Vec<LineItemRecord>,
    pub total_amount: Money,
}

impl From<&LineItem> for LineItemRecord {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id(),
            product_name: line.product_name().to_string(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            subtotal: line.subtotal(),
        }
    }
}

impl OrderRecord {
    pub fn from_draft(id: Option<OrderId>, draft: &OrderDraft) -> Self {
        Self {
            id,
            customer_name: draft.customer_name.clone(),
            phone: draft.phone.clone(),
            account_last5: draft.account_last5.clone(),
            shipping_method: draft.shipping_method.clone(),
            status: draft.status.clone(),
            line_items: draft.line_items().iter().map(LineItemRecord::from).collect(),
            total_amount: draft.total_amount(),
        }
    }

    /// Rebuilds the draft, recomputing every amount.
    pub fn into_draft(self) -> Result<(Option<OrderId>, OrderDraft), WireError> {
        let mut lines = Vec::with_capacity(self.line_items.len());
        for (index, record) in self.line_items.into_iter().enumerate() {
            if record.quantity == 0 {
                return Err(PricingError::InvalidQuantity(0).into());
            }
            if record.unit_price.is_negative() {
                return Err(WireError::NegativeAmount(record.unit_price));
            }
            let line = LineItem::snapshot(
                record.product_id,
                record.product_name,
                record.quantity,
                record.unit_price,
            )
            .ok_or(PricingError::AmountOverflow)?;
            if line.subtotal() != record.subtotal {
                return Err(WireError::SubtotalMismatch {
                    index,
                    recorded: record.subtotal,
                    computed: line.subtotal(),
                });
            }
            lines.push(line);
        }

        let computed = compute_order_total(&lines)?;
        if computed != self.total_amount {
            return Err(WireError::TotalMismatch {
                recorded: self.total_amount,
                computed,
            });
        }

        let mut draft = OrderDraft::new(
            self.customer_name,
            self.phone,
            self.account_last5,
            self.shipping_method,
        );
        draft.status = self.status;
        draft.set_line_items(lines, computed);
        Ok((self.id, draft))
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self::from_draft(Some(order.id), &order.draft)
    }
}

/// The flat order shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyOrderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(alias = "customer_name")]
    pub name: String,
    pub phone: String,
    #[serde(alias = "product")]
    pub item: String,
    #[serde(deserialize_with = "number_or_text")]
    pub quantity: i64,
    #[serde(alias = "account")]
    pub account_last5: String,
    #[serde(alias = "shipping_method")]
    pub shipping: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Missing on orders where the front end left pricing to the back end.
    #[serde(
        default,
        alias = "total_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Money>,
}

/// Form inputs send quantities as strings, older clients as numbers.
fn number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(i64),
        Text(String),
    }

    match Quantity::deserialize(deserializer)? {
        Quantity::Number(n) => Ok(n),
        Quantity::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid quantity \"{}\"", text))),
    }
}

impl LegacyOrderRecord {
    /// Translates the flat record into a draft with one synthetic line.
    ///
    /// With a recorded amount, the unit price is `amount / quantity` and must divide
    /// exactly; the line keeps the product id if the catalog still knows the name.
    /// Without one, the line is priced from the catalog like any new line.
    pub fn into_draft(
        self,
        catalog: &Catalog,
    ) -> Result<(Option<OrderId>, OrderDraft), WireError> {
        let product_ref = ProductRef::Name(self.item.clone());
        let line = match self.amount {
            Some(amount) => {
                if amount.is_negative() {
                    return Err(WireError::NegativeAmount(amount));
                }
                let quantity = u32::try_from(self.quantity)
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or(PricingError::InvalidQuantity(self.quantity))?;
                let unit_price = amount
                    .split_exact(quantity)
                    .ok_or(WireError::AmountNotDivisible { amount, quantity })?;
                let product_id = catalog.product(&product_ref).map(|p| p.id);
                LineItem::snapshot(product_id, self.item, quantity, unit_price)
                    .ok_or(PricingError::AmountOverflow)?
            }
            None => resolve_line_item(catalog, &product_ref, self.quantity)?,
        };
        debug!(product = line.product_name(), subtotal = %line.subtotal(), "Translated flat order");

        let total = line.subtotal();
        let mut draft = OrderDraft::new(self.name, self.phone, self.account_last5, self.shipping);
        draft.status = self.status;
        draft.set_line_items(vec![line], total);
        Ok((self.id, draft))
    }
}

impl TryFrom<&Order> for LegacyOrderRecord {
    type Error = WireError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        let draft = &order.draft;
        let [line] = draft.line_items() else {
            return Err(WireError::NotSingleLine(draft.line_items().len()));
        };
        Ok(Self {
            id: Some(order.id),
            name: draft.customer_name.clone(),
            phone: draft.phone.clone(),
            item: line.product_name().to_string(),
            quantity: i64::from(line.quantity()),
            account_last5: draft.account_last5.clone(),
            shipping: draft.shipping_method.clone(),
            status: draft.status.clone(),
            amount: Some(line.subtotal()),
        })
    }
}

/// Either shape.
#[derive(Debug, Clone)]
pub enum OrderPayload {
    Canonical(OrderRecord),
    Legacy(LegacyOrderRecord),
}

impl OrderPayload {
    /// Picks the shape by the presence of `line_items`, then deserializes it, so a bad
    /// field is reported against the shape it belongs to.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("line_items").is_some() {
            serde_json::from_value(value).map(OrderPayload::Canonical)
        } else {
            serde_json::from_value(value).map(OrderPayload::Legacy)
        }
    }
}

/// Parses an order in either shape into a draft.
///
/// `catalog` is only consulted for flat records.
pub fn decode_order(
    json: &str,
    catalog: &Catalog,
) -> Result<(Option<OrderId>, OrderDraft), WireError> {
    match OrderPayload::parse(json)? {
        OrderPayload::Canonical(record) => record.into_draft(),
        OrderPayload::Legacy(record) => record.into_draft(catalog),
    }
}

/// Serializes an order in the canonical shape.
pub fn encode_order(order: &Order) -> Result<String, WireError> {
    Ok(serde_json::to_string(&OrderRecord::from(order))?)
}
