//! In-process [`UrlStore`] with the same soft-delete rules as Postgres.
//! Backs the API tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::url::{NewUrl, UrlModel};
use crate::store::{StoreResult, UrlStore};

#[derive(Clone, Debug, Default)]
pub struct InMemoryUrlRepository {
    rows: Arc<RwLock<HashMap<Uuid, UrlModel>>>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw row lookup, including soft-deleted records.
    pub async fn get(&self, id: Uuid) -> Option<UrlModel> {
        self.rows.read().await.get(&id).cloned()
    }
}

/// Postgres timestamps have microsecond precision.
fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

#[async_trait]
impl UrlStore for InMemoryUrlRepository {
    async fn list_active(&self) -> StoreResult<Vec<UrlModel>> {
        let rows = self.rows.read().await;
        let mut active: Vec<UrlModel> = rows.values().filter(|r| !r.is_deleted).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn insert(&self, url: NewUrl) -> StoreResult<UrlModel> {
        let mut rows = self.rows.write().await;
        let mut id = Uuid::new_v4();
        while rows.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let at = now();
        let record = UrlModel {
            id,
            name: url.name,
            main_url: url.main_url,
            sub_urls: url.sub_urls,
            is_deleted: false,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };
        rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_active(&self, id: Uuid) -> StoreResult<Option<UrlModel>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).filter(|r| !r.is_deleted).cloned())
    }

    async fn update_active(&self, id: Uuid, url: NewUrl) -> StoreResult<Option<UrlModel>> {
        let mut rows = self.rows.write().await;
        let Some(record) = rows.get_mut(&id).filter(|r| !r.is_deleted) else {
            return Ok(None);
        };
        record.name = url.name;
        record.main_url = url.main_url;
        record.sub_urls = url.sub_urls;
        record.updated_at = now();
        Ok(Some(record.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let Some(record) = rows.get_mut(&id) else {
            return Ok(false);
        };
        record.is_deleted = true;
        record.deleted_at = Some(now());
        Ok(true)
    }
}
