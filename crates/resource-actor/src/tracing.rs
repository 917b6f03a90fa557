//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by the binary.
//!
//! - Filtering comes from `RUST_LOG` (`info`, `debug`, `order_reconcile=debug`, ...)
//! - Compact format, so nested spans print inline (`order_placement:place_order: ...`)
//! - Module paths are hidden (`with_target(false)`); actors log an `entity_type` field instead
//!
//! ## What Gets Traced
//!
//! - Actor startup and shutdown, with the final store size
//! - Every Create / Get / List / Update / Delete / Action, keyed by entity id
//! - Hook failures (`on_create failed`, `Update failed`, `Action failed`) with the error
//!
//! With `RUST_LOG=debug`, request payloads are logged once at the actor boundary:
//!
//! ```text
//! DEBUG Create entity_type="Order" params=OrderDraft { customer_name: "王小明", .. }
//! DEBUG Action entity_type="Product" id=product_1 action=ReserveStock(2)
//! INFO  Action ok entity_type="Product" id=product_1
//! INFO  Created entity_type="Order" id=order_1 size=1
//! ```

/// Installs the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
