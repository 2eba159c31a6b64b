//! Fixed, permissive cross-origin policy applied to every response.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Answers a preflight request. The headers come from [`layers`].
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub fn layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

fn overriding(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
