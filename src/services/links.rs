use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::models::{Link, LinkPatch, NewLink};
use crate::store::Store;

/// Validated writes for the links directory
pub struct LinkService<'a> {
    store: &'a dyn Store,
}

impl<'a> LinkService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Link>> {
        Ok(self.store.list_links().await?)
    }

    pub async fn create(&self, link: NewLink) -> ServiceResult<Link> {
        link.validate().map_err(ServiceError::Invalid)?;
        let link = self.store.create_link(link).await?;
        info!("Added link '{}' ({})", link.name, link.id);
        Ok(link)
    }

    pub async fn update(&self, id: &str, patch: LinkPatch) -> ServiceResult<Link> {
        patch.validate().map_err(ServiceError::Invalid)?;
        Ok(self.store.update_link(id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.store.delete_link(id).await?;
        info!("Deleted link {}", id);
        Ok(())
    }
}
