use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::AppState;

pub const ADMIN_ID_HEADER: &str = "x-admin-id";
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Rejects requests that do not carry the configured admin id and password headers.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state.gate.verify(
        header_value(&headers, ADMIN_ID_HEADER),
        header_value(&headers, ADMIN_PASSWORD_HEADER),
    )?;
    Ok(next.run(request).await)
}
