//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each client maps [`FrameworkError`](resource_actor::FrameworkError) into its
//! actor's error type, recovering the typed entity error where there is one.

pub mod catalog_client;
pub mod order_client;
pub mod product_client;

pub use catalog_client::*;
pub use order_client::*;
pub use product_client::*;
pub use resource_actor::ActorClient;
