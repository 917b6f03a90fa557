/// A named catalog entry other than a product: a shipping method or an order status.
///
/// The presentation layer lets staff add these on the fly; they are stored by the
/// catalog-entry actor and read back as part of every catalog snapshot.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogEntryId(pub u32);

impl From<u32> for CatalogEntryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CatalogEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEntryKind {
    ShippingMethod,
    Status,
}

impl Display for CatalogEntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogEntryKind::ShippingMethod => f.write_str("shipping method"),
            CatalogEntryKind::Status => f.write_str("status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogEntryId,
    pub kind: CatalogEntryKind,
    pub name: String,
}

/// Payload for registering a new entry.
#[derive(Debug, Clone)]
pub struct CatalogEntryCreate {
    pub kind: CatalogEntryKind,
    pub name: String,
}

/// Renames an entry. The kind never changes.
#[derive(Debug, Clone)]
pub struct CatalogEntryUpdate {
    pub name: String,
}
