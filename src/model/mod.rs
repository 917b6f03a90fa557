//! Pure data structures. [`Product`], [`CatalogEntry`] and [`Order`] implement the
//! [`ActorEntity`](resource_actor::ActorEntity) trait in their actor modules.

pub mod catalog;
pub mod catalog_entry;
pub mod money;
pub mod order;
pub mod product;
pub mod status;

pub use catalog::*;
pub use catalog_entry::*;
pub use money::*;
pub use order::*;
pub use product::*;
pub use status::*;
