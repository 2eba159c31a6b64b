use axum::extract::State;
use tracing::instrument;

use crate::envelope::Envelope;
use crate::errors::ApiError;
use crate::models::url::{UrlModel, UrlPayload};
use crate::routes::extract::{IdPath, ValidatedJson};
use crate::startup::AppState;

pub const DELETED_MESSAGE: &str = "URL deleted successfully";

#[instrument(name = "HTTP: List urls", skip(state))]
pub async fn list_urls(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<UrlModel>>, ApiError> {
    let urls = state.url_service.list().await?;
    tracing::debug!(count = urls.len(), "Listed urls");
    Ok(Envelope::data(urls))
}

#[instrument(
    name = "HTTP: Create url",
    skip(state, payload),
    fields(name = %payload.name)
)]
pub async fn create_url(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UrlPayload>,
) -> Result<Envelope<UrlModel>, ApiError> {
    let record = state.url_service.create(payload.into()).await?;
    Ok(Envelope::data(record))
}

#[instrument(name = "HTTP: Update url", skip(state, payload))]
pub async fn update_url(
    IdPath(id): IdPath,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UrlPayload>,
) -> Result<Envelope<UrlModel>, ApiError> {
    let record = state.url_service.update(&id, payload.into()).await?;
    Ok(Envelope::data(record))
}

#[instrument(name = "HTTP: Delete url", skip(state))]
pub async fn delete_url(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Envelope<()>, ApiError> {
    state.url_service.delete(&id).await?;
    Ok(Envelope::message(DELETED_MESSAGE))
}

/// `PUT /urls/` and `DELETE /urls/` name no record.
pub async fn missing_id() -> ApiError {
    ApiError::MissingId
}
