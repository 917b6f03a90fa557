//! [`ActorEntity`] implementation for [`CatalogEntry`].

use super::error::CatalogError;
use crate::model::{
    CatalogEntry, CatalogEntryCreate, CatalogEntryId, CatalogEntryKind, CatalogEntryUpdate,
};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for CatalogEntry {
    type Id = CatalogEntryId;
    type Create = CatalogEntryCreate;
    type Update = CatalogEntryUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    /// Names are stored trimmed.
    fn from_create_params(
        id: CatalogEntryId,
        params: CatalogEntryCreate,
    ) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        Ok(Self {
            id,
            kind: params.kind,
            name: name.to_string(),
        })
    }

    /// Renames a shipping method. Statuses are never renamed.
    async fn on_update(
        &mut self,
        update: CatalogEntryUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if self.kind == CatalogEntryKind::Status {
            return Err(CatalogError::StatusRename(self.name.clone()));
        }
        let name = update.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        self.name = name.to_string();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: CatalogEntryKind, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: CatalogEntryId(1),
            kind,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rename_shipping_method_trims() {
        let mut method = entry(CatalogEntryKind::ShippingMethod, "郵局");
        method
            .on_update(
                CatalogEntryUpdate {
                    name: " 中華郵政 ".into(),
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(method.name, "中華郵政");

        let err = method
            .on_update(CatalogEntryUpdate { name: "  ".into() }, &())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyName);
    }

    #[tokio::test]
    async fn test_status_cannot_be_renamed() {
        let mut status = entry(CatalogEntryKind::Status, "已退款");
        let err = status
            .on_update(CatalogEntryUpdate { name: "退款".into() }, &())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::StatusRename("已退款".into()));
        assert_eq!(status.name, "已退款");
    }
}
