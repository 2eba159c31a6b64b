use async_trait::async_trait;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::models::url::{NewUrl, UrlModel};
use crate::store::{ConnectionPool, StoreResult, UrlStore};

const COLUMNS: &str = r#"id, name, "mainUrl", "subUrls", "isDeleted", "createdAt", "updatedAt", "deletedAt""#;

/// Postgres-backed [`UrlStore`]. Every method holds exactly one pooled
/// connection for exactly one statement.
#[derive(Clone, Debug)]
pub struct UrlRepository {
    pool: ConnectionPool,
}

impl UrlRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for UrlRepository {
    #[instrument(name = "Fetching active urls from database", skip(self))]
    async fn list_active(&self) -> StoreResult<Vec<UrlModel>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, UrlModel>(&format!(
            r#"SELECT {COLUMNS} FROM urls WHERE "isDeleted" = false ORDER BY "createdAt" DESC"#
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch urls: {:?}", e);
            e
        })?;
        Ok(rows)
    }

    #[instrument(name = "Saving new url to database", skip(self, url), fields(name = %url.name))]
    async fn insert(&self, url: NewUrl) -> StoreResult<UrlModel> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UrlModel>(&format!(
            r#"INSERT INTO urls ("name", "mainUrl", "subUrls", "createdAt", "updatedAt")
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING {COLUMNS}"#
        ))
        .bind(&url.name)
        .bind(&url.main_url)
        .bind(Json(&url.sub_urls))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(row)
    }

    #[instrument(name = "Fetching active url by id from database", skip(self))]
    async fn find_active(&self, id: Uuid) -> StoreResult<Option<UrlModel>> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UrlModel>(&format!(
            r#"SELECT {COLUMNS} FROM urls WHERE id = $1 AND "isDeleted" = false LIMIT 1"#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    #[instrument(name = "Updating url in database", skip(self, url))]
    async fn update_active(&self, id: Uuid, url: NewUrl) -> StoreResult<Option<UrlModel>> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UrlModel>(&format!(
            r#"UPDATE urls
            SET name = $1, "mainUrl" = $2, "subUrls" = $3, "updatedAt" = NOW()
            WHERE id = $4 AND "isDeleted" = false
            RETURNING {COLUMNS}"#
        ))
        .bind(&url.name)
        .bind(&url.main_url)
        .bind(Json(&url.sub_urls))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update url: {:?}", e);
            e
        })?;
        Ok(row)
    }

    #[instrument(name = "Soft deleting url in database", skip(self))]
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"UPDATE urls
            SET "isDeleted" = true, "deletedAt" = NOW()
            WHERE id = $1
            RETURNING id"#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft delete url: {:?}", e);
            e
        })?;
        Ok(row.is_some())
    }
}
