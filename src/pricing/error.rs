//! Error types for the pricing engine.

use crate::model::ProductRef;
use std::collections::BTreeSet;
use std::fmt::Display;
use thiserror::Error;

/// Errors returned by the pricing engine. None of them leave a draft modified.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// The catalog has no product with this id or name.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductRef),

    /// Quantities must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Line item index {index} out of range (order has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A subtotal or total does not fit in a `Money`.
    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Order validation failed: {0}")]
    ValidationFailed(Violations),
}

/// A single reason an order cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    MissingCustomerName,
    MissingPhone,
    MissingAccountLast5,
    NoLineItems,
    MissingShippingMethod,
    UnknownStatus(String),
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingCustomerName => f.write_str("customer name is required"),
            Violation::MissingPhone => f.write_str("phone is required"),
            Violation::MissingAccountLast5 => f.write_str("account suffix is required"),
            Violation::NoLineItems => f.write_str("at least one line item is required"),
            Violation::MissingShippingMethod => f.write_str("shipping method is required"),
            Violation::UnknownStatus(status) => write!(f, "unknown status \"{}\"", status),
        }
    }
}

/// Every violation found on an order. Empty means the order is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(BTreeSet<Violation>);

impl Violations {
    pub fn insert(&mut self, violation: Violation) {
        self.0.insert(violation);
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise `ValidationFailed` carrying the whole set.
    pub fn into_result(self) -> Result<(), PricingError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PricingError::ValidationFailed(self))
        }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
