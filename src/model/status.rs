//! Order statuses.
//!
//! The set is open: the four canonical statuses below always exist, and staff can
//! register more through the catalog-entry store. Any known status may be set from any
//! other; the canonical order is only used for sorting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Payment not yet received. Every order starts here.
    pub const NOT_REMITTED: &'static str = "尚未匯款";
    /// Payment matched against the bank statement.
    pub const RECONCILED: &'static str = "已對帳";
    pub const AWAITING_SHIPMENT: &'static str = "待出貨";
    pub const DELIVERED: &'static str = "已交貨";

    /// Canonical statuses in forward order.
    pub const CANONICAL: [&'static str; 4] = [
        Self::NOT_REMITTED,
        Self::RECONCILED,
        Self::AWAITING_SHIPMENT,
        Self::DELIVERED,
    ];

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn initial() -> Self {
        Self::new(Self::NOT_REMITTED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in the canonical forward order, `None` for registered statuses.
    pub fn canonical_rank(&self) -> Option<usize> {
        Self::CANONICAL.iter().position(|s| *s == self.0)
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical_rank().is_some()
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::initial()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderStatus {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The statuses an order may currently be in: the canonical ones plus whatever has
/// been registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    registered: BTreeSet<String>,
}

impl Default for StatusSet {
    fn default() -> Self {
        Self::canonical()
    }
}

impl StatusSet {
    pub fn canonical() -> Self {
        Self {
            registered: BTreeSet::new(),
        }
    }

    /// Canonical statuses plus `registered`. Names that are blank or already canonical
    /// are ignored.
    pub fn with_registered<I, S>(registered: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registered = registered
            .into_iter()
            .map(Into::<String>::into)
            .filter(|name| {
                !name.trim().is_empty() && !OrderStatus::CANONICAL.contains(&name.as_str())
            })
            .collect();
        Self { registered }
    }

    pub fn contains(&self, status: &OrderStatus) -> bool {
        status.is_canonical() || self.registered.contains(status.as_str())
    }

    /// Canonical statuses in forward order, then registered ones by name.
    pub fn iter(&self) -> impl Iterator<Item = OrderStatus> + '_ {
        OrderStatus::CANONICAL
            .iter()
            .map(|s| OrderStatus::new(*s))
            .chain(self.registered.iter().map(|s| OrderStatus::new(s.as_str())))
    }

    pub fn len(&self) -> usize {
        OrderStatus::CANONICAL.len() + self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sort key for displaying orders grouped by status. Unknown statuses sort last.
    pub fn sort_key(&self, status: &OrderStatus) -> (usize, String) {
        let rank = match status.canonical_rank() {
            Some(rank) => rank,
            None if self.registered.contains(status.as_str()) => OrderStatus::CANONICAL.len(),
            None => OrderStatus::CANONICAL.len() + 1,
        };
        (rank, status.as_str().to_string())
    }
}
