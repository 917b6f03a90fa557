//! Error types for the catalog-entry actor.

use thiserror::Error;

/// Errors that can occur while registering or reading shipping methods and statuses.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog entry not found: {0}")]
    NotFound(String),

    /// Entry names must not be blank.
    #[error("Catalog entry name must not be empty")]
    EmptyName,

    /// An entry of the same kind already has this name.
    #[error("Duplicate {kind}: {name}")]
    Duplicate { kind: String, name: String },

    /// Orders refer to statuses by name, so a registered status keeps its name.
    #[error("Status \"{0}\" cannot be renamed")]
    StatusRename(String),

    /// Products are read through the product store while building a catalog snapshot.
    #[error("Product store error: {0}")]
    Products(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
