//! # ActorClient Trait
//!
//! Shared `get` / `list` / `delete` for resource-specific clients built on a
//! `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete operations.
///
/// Implementors supply the inner `ResourceClient` and a mapping from
/// `FrameworkError` into their own error type.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Carrier { id: u32 }
/// #[derive(Debug)] struct CarrierCreate;
/// #[derive(Debug)] struct CarrierUpdate;
/// #[derive(Debug)] enum CarrierAction {}
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct CarrierError(String);
///
/// impl From<String> for CarrierError {
///     fn from(s: String) -> Self { CarrierError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Carrier {
///     type Id = u32;
///     type Create = CarrierCreate;
///     type Update = CarrierUpdate;
///     type Action = CarrierAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CarrierError;
///
///     fn from_create_params(id: u32, _: CarrierCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: CarrierUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CarrierAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct CarrierClient {
///     inner: ResourceClient<Carrier>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Carrier> for CarrierClient {
///     type Error = CarrierError;
///
///     fn inner(&self) -> &ResourceClient<Carrier> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CarrierError(e.to_string())
///     }
/// }
///
/// async fn usage(client: CarrierClient) {
///     // get(), list() and delete() come with the trait
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
