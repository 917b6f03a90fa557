//! # Catalog Client
//!
//! Front for everything the pricing engine reads: products from the product store,
//! shipping methods and statuses from the catalog-entry store. Every fetch asks the
//! stores again; nothing is cached here.
use crate::catalog_actor::CatalogError;
use crate::clients::ProductClient;
use crate::model::{
    Catalog, CatalogEntry, CatalogEntryCreate, CatalogEntryId, CatalogEntryKind,
    CatalogEntryUpdate, OrderStatus, StatusSet,
};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for the catalog-entry actor, bundled with the product client.
#[derive(Clone)]
pub struct CatalogClient {
    entries: ResourceClient<CatalogEntry>,
    products: ProductClient,
}

#[async_trait]
impl ActorClient<CatalogEntry> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<CatalogEntry> {
        &self.entries
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CatalogError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CatalogError::NotFound(id),
            Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CatalogClient {
    pub fn new(entries: ResourceClient<CatalogEntry>, products: ProductClient) -> Self {
        Self { entries, products }
    }

    pub fn products(&self) -> &ProductClient {
        &self.products
    }

    /// Adds a shipping method or a status.
    ///
    /// Names are compared after trimming. A name already used by an entry of the same
    /// kind, or a canonical status name, is rejected as a duplicate.
    #[instrument(skip(self))]
    pub async fn register_entry(
        &self,
        kind: CatalogEntryKind,
        name: &str,
    ) -> Result<CatalogEntryId, CatalogError> {
        let name = name.trim();
        let duplicate = || CatalogError::Duplicate {
            kind: kind.to_string(),
            name: name.to_string(),
        };

        if kind == CatalogEntryKind::Status && OrderStatus::new(name).is_canonical() {
            return Err(duplicate());
        }
        if self
            .entries_of(kind)
            .await?
            .iter()
            .any(|entry| entry.name == name)
        {
            return Err(duplicate());
        }

        let id = self
            .entries
            .create(CatalogEntryCreate {
                kind,
                name: name.to_string(),
            })
            .await
            .map_err(Self::map_error)?;
        info!(%id, %kind, name, "Catalog entry registered");
        Ok(id)
    }

    /// Renames a shipping method.
    ///
    /// The same duplicate rule as [`register_entry`](Self::register_entry) applies.
    /// Statuses cannot be renamed, since stored orders refer to them by name.
    #[instrument(skip(self))]
    pub async fn rename_entry(
        &self,
        id: CatalogEntryId,
        name: &str,
    ) -> Result<CatalogEntry, CatalogError> {
        let name = name.trim();
        let entries = self.list().await?;
        let current = entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        if current.kind == CatalogEntryKind::Status {
            return Err(CatalogError::StatusRename(current.name.clone()));
        }
        if entries
            .iter()
            .any(|entry| entry.id != id && entry.kind == current.kind && entry.name == name)
        {
            return Err(CatalogError::Duplicate {
                kind: current.kind.to_string(),
                name: name.to_string(),
            });
        }

        let renamed = self
            .entries
            .update(
                id,
                CatalogEntryUpdate {
                    name: name.to_string(),
                },
            )
            .await
            .map_err(Self::map_error)?;
        info!(%id, from = %current.name, to = %renamed.name, "Catalog entry renamed");
        Ok(renamed)
    }

    async fn entries_of(&self, kind: CatalogEntryKind) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|entry| entry.kind == kind)
            .collect())
    }

    /// Registered shipping methods, in registration order.
    #[instrument(skip(self))]
    pub async fn fetch_shipping_methods(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        debug!("Sending request");
        self.entries_of(CatalogEntryKind::ShippingMethod).await
    }

    /// Canonical statuses plus the registered ones.
    #[instrument(skip(self))]
    pub async fn fetch_statuses(&self) -> Result<StatusSet, CatalogError> {
        debug!("Sending request");
        let registered = self.entries_of(CatalogEntryKind::Status).await?;
        Ok(StatusSet::with_registered(
            registered.into_iter().map(|entry| entry.name),
        ))
    }

    /// A fresh snapshot of products, shipping methods and statuses.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let products = self
            .products
            .list()
            .await
            .map_err(|e| CatalogError::Products(e.to_string()))?;

        let mut shipping_methods = Vec::new();
        let mut statuses = Vec::new();
        for entry in self.list().await? {
            match entry.kind {
                CatalogEntryKind::ShippingMethod => shipping_methods.push(entry.name),
                CatalogEntryKind::Status => statuses.push(entry.name),
            }
        }

        debug!(
            products = products.len(),
            shipping_methods = shipping_methods.len(),
            "Catalog snapshot"
        );
        Ok(Catalog::new(products)
            .with_entries(shipping_methods, StatusSet::with_registered(statuses)))
    }
}
