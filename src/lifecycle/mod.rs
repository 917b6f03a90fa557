//! # System Lifecycle
//!
//! Creates the actors, wires them together and shuts them down.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them in `run(context)`:
//!
//! ```rust,ignore
//! impl ActorEntity for Product { type Context = (); }
//! impl ActorEntity for CatalogEntry { type Context = (); }
//!
//! // Reads statuses and reserves stock through the catalog
//! impl ActorEntity for Order { type Context = CatalogClient; }
//! ```
//!
//! The dependency graph is acyclic (orders → catalog → products), so dropping every
//! client is enough to stop all actors: the order actor stops first, which releases
//! the catalog and product clients it holds.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the `tracing` subscriber once per process:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod reconcile_system;

pub use reconcile_system::*;
pub use resource_actor::tracing::setup_tracing;
