//! # Order Actor
//!
//! Stores priced orders. Creating an order validates it and reserves stock; updates
//! either replace the order or move it to another status.
//!
//! ## Dependencies
//!
//! `Context = CatalogClient`, injected when the actor is started:
//!
//! ```rust,ignore
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(order_actor.run(catalog_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
