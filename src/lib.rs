//! # Order Reconcile
//!
//! Back office for a small shop that takes orders by bank transfer: customers order
//! from a catalog, pay, and staff reconcile each payment by the last five characters
//! of the paying account before shipping.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`pricing`])
//! Pure functions over a catalog snapshot and an order draft: line-item resolution,
//! totals, edits and submit-time validation. No I/O and no shared state.
//!
//! ### 2. The Stores ([`product_actor`], [`catalog_actor`], [`order_actor`])
//! Each store is a [`ResourceActor`](resource_actor::ResourceActor) owning its
//! entities in its own Tokio task. The order store validates orders and reserves
//! stock when they are committed.
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients over the stores. [`CatalogClient`](clients::CatalogClient) builds
//! fresh [`Catalog`](model::Catalog) snapshots for the engine.
//!
//! ### 4. The Boundary ([`wire`], [`export`])
//! JSON records (canonical and the older flat shape) and CSV export.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`ReconcileSystem`](lifecycle::ReconcileSystem) starts and wires the actors from a
//! [`SystemConfig`](config::SystemConfig).
//!
//! ## Money
//!
//! All amounts are [`Money`](model::Money), a fixed-point decimal. Totals are always
//! recomputed from line items and never drift.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod export;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod wire;
