//! # Order Pricing Engine
//!
//! Pure functions that turn a catalog snapshot and an order draft into priced line
//! items and a total, and report everything that keeps an order from being submitted.
//!
//! ```rust
//! use order_reconcile::model::{Catalog, Money, OrderDraft, Product, ProductId};
//! use order_reconcile::pricing::add_line_item;
//!
//! let catalog = Catalog::new([Product::new(ProductId(1), "T-Shirt", Money::whole(300), 10)]);
//! let mut order = OrderDraft::new("王小明", "0912345678", "12345", "郵局");
//!
//! add_line_item(&mut order, &ProductId(1).into(), 2, &catalog).unwrap();
//! assert_eq!(order.total_amount(), Money::whole(600));
//! ```
//!
//! Stock is never changed here. The order store reserves it when an order is
//! committed.

pub mod engine;
pub mod error;

pub use engine::*;
pub use error::*;
