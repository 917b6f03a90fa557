//! # Catalog-Entry Actor
//!
//! Stores the shipping methods and order statuses staff register at runtime. Products
//! live in their own store; [`CatalogClient`](crate::clients::CatalogClient) reads both
//! to build a [`Catalog`](crate::model::Catalog) snapshot.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::CatalogEntry;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new catalog-entry actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CatalogEntry>, ResourceClient<CatalogEntry>) {
    ResourceActor::new(buffer_size)
}
