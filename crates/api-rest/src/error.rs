use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clinic_core::ClinicError;
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body returned for every rejected request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// A registry error mapped onto an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else if err.is_conflict() {
            StatusCode::CONFLICT
        } else {
            match err {
                ClinicError::NoBillingRecord(_) => StatusCode::NOT_FOUND,
                ClinicError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };

        if status.is_server_error() {
            tracing::error!("request failed: {:?}", err);
        } else {
            tracing::warn!(status = status.as_u16(), "request rejected: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Malformed or mistyped JSON bodies are validation failures like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        let message = rejection.body_text();
        tracing::warn!(status = status.as_u16(), "request body rejected: {}", message);
        Self { status, message }
    }
}

/// `Json` extractor that answers body errors with [`ErrorRes`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}
