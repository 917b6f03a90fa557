//! Error types for the Order actor.

use crate::catalog_actor::CatalogError;
use crate::pricing::PricingError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Pricing or validation failed. Carries every violation when validation fails.
    #[error("Invalid order: {0}")]
    Invalid(#[from] PricingError),

    /// The status is neither canonical nor registered.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// Stock could not be reserved.
    #[error("Stock error: {0}")]
    Stock(#[from] ProductError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
