//! Custom actions for the Product actor.
//!
//! Stock operations beyond CRUD. They are handled by
//! [`ActorEntity::handle_action`](resource_actor::ActorEntity::handle_action) on
//! [`Product`](crate::model::Product).

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Puts previously reserved units back.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    ReserveStock(()),
    /// Stock level after the release
    ReleaseStock(u32),
}
