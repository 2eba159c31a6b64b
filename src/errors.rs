use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing id parameter")]
    MissingId,

    #[error("{0}")]
    Validation(String),

    #[error("URL not found")]
    NotFound,

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// A store failure reported with the store's own message.
    pub fn store(source: StoreError) -> Self {
        ApiError::Internal {
            message: source.to_string(),
            source,
        }
    }

    /// A store failure reported with a fixed message; the cause is only logged.
    pub fn internal(message: &str, source: StoreError) -> Self {
        ApiError::Internal {
            message: message.to_string(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingId | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal { source, .. } => {
                tracing::error!(error = ?source, "{}", self);
            }
            other => tracing::warn!(status = status.as_u16(), "{}", other),
        }

        (status, Envelope::error(self.to_string())).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Cannot load configuration")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid database connection settings")]
    DatabaseOptions(#[source] sqlx::Error),

    #[error("Database migration failed")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),

    #[error("Cannot bind http server to {address}")]
    HttpServerBinding {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Http server terminated unexpectedly")]
    HttpServer(#[source] std::io::Error),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}
