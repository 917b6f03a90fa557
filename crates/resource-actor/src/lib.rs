//! # Resource Actor
//!
//! In-process resource stores built on the actor model. Each resource type (products,
//! catalog entries, orders) gets its own Tokio task that owns an in-memory store and
//! answers a fixed set of requests: Create, Get, List, Update, Delete, plus
//! resource-specific Actions.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop and the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//!
//! Stores never share memory. When one resource needs another (an order reserving
//! product stock) it calls the other store's client from inside a hook.
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run()`, not `new()`. All actors can therefore be
//! created first and wired afterwards:
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Item { id: u32, stock: u32 }
//! #[derive(Debug)] struct ItemCreate { stock: u32 }
//! #[derive(Debug)] struct ItemUpdate;
//! #[derive(Debug)] enum ItemAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("not enough stock")] struct ItemError;
//!
//! #[async_trait]
//! impl ActorEntity for Item {
//!     type Id = u32; type Create = ItemCreate; type Update = ItemUpdate;
//!     type Action = ItemAction; type ActionResult = (); type Context = (); type Error = ItemError;
//!     fn from_create_params(id: u32, p: ItemCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: p.stock })
//!     }
//!     async fn on_update(&mut self, _: ItemUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, action: ItemAction, _: &()) -> Result<(), Self::Error> {
//!         let ItemAction::Take(n) = action;
//!         self.stock = self.stock.checked_sub(n).ok_or(ItemError)?;
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate { item: u32, qty: u32 }
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug)] enum TicketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TicketError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Action = TicketAction; type ActionResult = ();
//!     // The ticket store depends on the item store
//!     type Context = ResourceClient<Item>;
//!     type Error = TicketError;
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (item_actor, items) = ResourceActor::<Item>::new(10);
//!     let (ticket_actor, tickets) = ResourceActor::<Ticket>::new(10);
//!
//!     tokio::spawn(item_actor.run(()));
//!     tokio::spawn(ticket_actor.run(items.clone()));
//!
//!     let item = items.create(ItemCreate { stock: 3 }).await.unwrap();
//!     items.perform_action(item, ItemAction::Take(2)).await.unwrap();
//!     assert!(items.perform_action(item, ItemAction::Take(2)).await.is_err());
//!     assert_eq!(items.get(item).await.unwrap().unwrap().stock, 1);
//!
//!     let _ = tickets.create(TicketCreate { item, qty: 1 }).await;
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - One Tokio task per store; requests are handled one at a time
//! - Stores run in parallel with each other
//! - Updates and actions are staged on a copy and committed only on success
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockClient` and the channel-level helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
