use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Alias name to URL.
pub type SubUrls = BTreeMap<String, String>;

/// A row of the `urls` table. Column names and JSON field names are both
/// camelCase.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct UrlModel {
    pub id: Uuid,
    pub name: String,
    pub main_url: String,
    #[sqlx(json)]
    pub sub_urls: SubUrls,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Request body shared by create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UrlPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "mainUrl must not be empty"))]
    pub main_url: String,
    #[serde(default)]
    pub sub_urls: Option<SubUrls>,
}

/// Validated field values ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrl {
    pub name: String,
    pub main_url: String,
    pub sub_urls: SubUrls,
}

impl From<UrlPayload> for NewUrl {
    fn from(payload: UrlPayload) -> Self {
        Self {
            name: payload.name,
            main_url: payload.main_url,
            sub_urls: payload.sub_urls.unwrap_or_default(),
        }
    }
}
