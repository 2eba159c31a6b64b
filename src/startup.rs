use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::configuration::Settings;
use crate::errors::StartupError;
use crate::routes::cors::{self, preflight};
use crate::routes::health_check::health_check;
use crate::routes::url::{create_url, delete_url, list_urls, missing_id, update_url};
use crate::services::url::UrlService;
use crate::store::{ConnectionPool, UrlRepository, UrlStore};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct AppState {
    pub url_service: UrlService,
}

impl AppState {
    pub fn new(store: impl UrlStore) -> Self {
        Self {
            url_service: UrlService::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let [allow_origin, allow_methods, allow_headers] = cors::layers();

    Router::new()
        .route("/health_check", get(health_check))
        .route("/urls", get(list_urls).post(create_url).options(preflight))
        .route(
            "/urls/",
            axum::routing::put(missing_id)
                .delete(missing_id)
                .options(preflight),
        )
        .route(
            "/urls/{id}",
            axum::routing::put(update_url)
                .delete(delete_url)
                .options(preflight),
        )
        .with_state(state)
        .layer(allow_headers)
        .layer(allow_methods)
        .layer(allow_origin)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(&x_request_id)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "request",
                        http.method = %request.method(),
                        http.target = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    pool: Option<ConnectionPool>,
    state: AppState,
}

impl Application {
    /// Connects the pool lazily, applies migrations when configured, and
    /// binds the listener.
    pub async fn build(settings: &Settings) -> Result<Self, StartupError> {
        let pool = ConnectionPool::connect_lazy(&settings.database)
            .map_err(StartupError::DatabaseOptions)?;

        if settings.database.run_migrations {
            tracing::info!("Running database migrations");
            pool.migrate().await?;
        }

        let state = AppState::new(UrlRepository::new(pool.clone()));
        let mut application = Self::with_state(&settings.application.address(), state).await?;
        application.pool = Some(pool);
        Ok(application)
    }

    /// Binds the listener for an already assembled state.
    pub async fn with_state(address: &str, state: AppState) -> Result<Self, StartupError> {
        let listener =
            TcpListener::bind(address)
                .await
                .map_err(|source| StartupError::HttpServerBinding {
                    address: address.to_string(),
                    source,
                })?;
        let port = listener
            .local_addr()
            .map_err(StartupError::HttpServer)?
            .port();

        Ok(Self {
            port,
            listener,
            pool: None,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), StartupError> {
        tracing::info!(port = self.port, "Listening");
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::HttpServer)?;

        if let Some(pool) = self.pool {
            pool.close().await;
        }
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
