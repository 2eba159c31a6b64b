use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::url::{NewUrl, UrlModel};
use crate::store::UrlStore;

#[derive(Clone)]
pub struct UrlService {
    store: Arc<dyn UrlStore>,
}

impl std::fmt::Debug for UrlService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlService").finish_non_exhaustive()
    }
}

/// Path ids arrive as free text. Blank means absent; anything that is not a
/// UUID cannot name a record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::MissingId);
    }
    Uuid::parse_str(raw).map_err(|_| {
        tracing::warn!(id = raw, "Url id is not a uuid");
        ApiError::NotFound
    })
}

impl UrlService {
    pub fn new(store: impl UrlStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[instrument(name = "Service: List urls", skip(self))]
    pub async fn list(&self) -> Result<Vec<UrlModel>, ApiError> {
        self.store.list_active().await.map_err(ApiError::store)
    }

    #[instrument(name = "Service: Create url", skip(self, url))]
    pub async fn create(&self, url: NewUrl) -> Result<UrlModel, ApiError> {
        let record = self.store.insert(url).await.map_err(ApiError::store)?;
        tracing::info!(id = %record.id, "Url created");
        Ok(record)
    }

    #[instrument(name = "Service: Update url", skip(self, url))]
    pub async fn update(&self, id: &str, url: NewUrl) -> Result<UrlModel, ApiError> {
        let id = parse_id(id)?;

        let existing = self
            .store
            .find_active(id)
            .await
            .map_err(|e| ApiError::internal("Failed to update URL", e))?;
        if existing.is_none() {
            tracing::warn!(%id, "Url to update was not found");
            return Err(ApiError::NotFound);
        }

        // A delete may land between the lookup and the write; the update
        // itself only touches active rows.
        let updated = self
            .store
            .update_active(id, url)
            .await
            .map_err(|e| ApiError::internal("Failed to update URL", e))?
            .ok_or(ApiError::NotFound)?;
        tracing::info!(%id, "Url updated");
        Ok(updated)
    }

    #[instrument(name = "Service: Delete url", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_id(id)?;

        let matched = self
            .store
            .soft_delete(id)
            .await
            .map_err(|e| ApiError::internal("Failed to delete URL", e))?;
        if !matched {
            tracing::warn!(%id, "Url to delete was not found");
            return Err(ApiError::NotFound);
        }
        tracing::info!(%id, "Url soft deleted");
        Ok(())
    }
}
