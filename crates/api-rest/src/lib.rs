//! # API REST
//!
//! REST API for the clinic front desk.
//!
//! Handles:
//! - HTTP endpoints with axum over a single shared [`Registry`]
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, the admin header gate)
//!
//! The registry is not thread-safe on its own; it lives behind one
//! `tokio::sync::RwLock`, so writers are serialised and readers see whole updates.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use clinic_core::{AdminGate, ClinicConfig, Registry};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod types;

pub use auth::{ADMIN_ID_HEADER, ADMIN_PASSWORD_HEADER};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub(crate) registry: Arc<RwLock<Registry>>,
    pub(crate) cfg: Arc<ClinicConfig>,
    pub(crate) gate: Arc<AdminGate>,
}

impl AppState {
    /// Creates state around an empty registry.
    pub fn new(cfg: Arc<ClinicConfig>) -> Self {
        let gate = Arc::new(AdminGate::new(cfg.admin().clone()));
        Self {
            registry: Arc::new(RwLock::new(Registry::new())),
            cfg,
            gate,
        }
    }

    /// Handle to the shared registry, for hosts running background work alongside the API.
    pub fn registry(&self) -> Arc<RwLock<Registry>> {
        self.registry.clone()
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.cfg
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_patients,
        handlers::create_patient,
        handlers::sort_patients,
        handlers::list_doctors,
        handlers::create_doctor,
        handlers::list_appointments,
        handlers::create_appointment,
        handlers::due_appointments,
        handlers::list_feedback,
        handlers::create_feedback,
        handlers::list_complaints,
        handlers::create_complaint,
        handlers::list_billing,
        handlers::create_billing,
        handlers::receipt,
        handlers::list_wards,
        handlers::create_ward,
        handlers::assign_bed,
        handlers::ward_statistics,
        handlers::list_tokens,
        handlers::next_token,
        handlers::support,
    ),
    components(schemas(
        types::FormNumber,
        types::HealthRes,
        types::CreatePatientReq,
        types::CreateDoctorReq,
        types::CreateAppointmentReq,
        types::TextReq,
        types::TextListRes,
        types::CreateBillingReq,
        types::ReceiptRes,
        types::CreateWardReq,
        types::AssignBedRes,
        types::WardStatisticsRes,
        types::TokensRes,
        types::NextTokenRes,
        types::SupportRes,
        error::ErrorRes,
        clinic_core::Patient,
        clinic_core::Doctor,
        clinic_core::Appointment,
        clinic_core::BillingRecord,
        clinic_core::Receipt,
        clinic_core::Ward,
        clinic_core::WardSummary,
        clinic_core::TokenEntry,
        clinic_core::Reminder,
    ))
)]
pub struct ApiDoc;

/// Builds the full router: open health and docs routes plus the admin-gated API.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route("/patients/sort", post(handlers::sort_patients))
        .route(
            "/doctors",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/appointments/due", get(handlers::due_appointments))
        .route(
            "/feedback",
            get(handlers::list_feedback).post(handlers::create_feedback),
        )
        .route(
            "/complaints",
            get(handlers::list_complaints).post(handlers::create_complaint),
        )
        .route(
            "/billing",
            get(handlers::list_billing).post(handlers::create_billing),
        )
        .route("/billing/:patient_id/receipt", get(handlers::receipt))
        .route(
            "/wards",
            get(handlers::list_wards).post(handlers::create_ward),
        )
        .route("/wards/statistics", get(handlers::ward_statistics))
        .route("/wards/:name/beds", post(handlers::assign_bed))
        .route("/tokens", get(handlers::list_tokens))
        .route("/tokens/next", post(handlers::next_token))
        .route("/support", get(handlers::support))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Arc::new(ClinicConfig::default())))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ADMIN_ID_HEADER, "admin")
            .header(ADMIN_PASSWORD_HEADER, "password");
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.expect("router responds");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_is_open() {
        let app = app();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn api_requires_admin_headers() {
        let app = app();
        let req = Request::builder()
            .uri("/patients")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid admin id or password");
    }

    #[tokio::test]
    async fn patients_get_ids_and_tokens() {
        let app = app();
        for name in ["Charan", "Amit"] {
            let (status, _) = send(
                &app,
                request(
                    "POST",
                    "/patients",
                    Some(json!({"name": name, "age": 30, "gender": "Male", "ailment": "Cough"})),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, patients) = send(&app, request("GET", "/patients", None)).await;
        assert_eq!(patients[1]["id"], 2);
        assert_eq!(patients[1]["token"], 2);

        let (_, sorted) = send(&app, request("POST", "/patients/sort", None)).await;
        assert_eq!(sorted[0]["name"], "Amit");

        let (_, next) = send(&app, request("POST", "/tokens/next", None)).await;
        assert_eq!(next["token"], 1);

        let (_, tokens) = send(&app, request("GET", "/tokens", None)).await;
        assert_eq!(tokens["pending"], json!([2]));
        assert_eq!(tokens["board"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_patient_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/patients",
                Some(json!({"name": " ", "age": 30, "gender": "Male", "ailment": "Cough"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/patients",
                Some(json!({"name": "Amit", "age": -1, "gender": "Male", "ailment": "Cough"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, patients) = send(&app, request("GET", "/patients", None)).await;
        assert_eq!(patients, json!([]));
    }

    #[tokio::test]
    async fn numeric_fields_accept_digit_text() {
        let app = app();
        let (status, patient) = send(
            &app,
            request(
                "POST",
                "/patients",
                Some(json!({"name": "Amit", "age": "30", "gender": "Male", "ailment": "Cough"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(patient["age"], 30);
    }

    #[tokio::test]
    async fn malformed_bodies_get_json_errors() {
        let app = app();
        let bodies = [
            json!({"name": "Amit", "age": "thirty", "gender": "Male", "ailment": "Cough"}),
            json!({"name": "Amit", "age": 30.5, "gender": "Male", "ailment": "Cough"}),
            json!({"name": "Amit", "gender": "Male", "ailment": "Cough"}),
        ];
        for body in bodies {
            let (status, error) = send(&app, request("POST", "/patients", Some(body.clone()))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert!(error["error"].is_string(), "{body}");
        }

        let req = Request::builder()
            .method("POST")
            .uri("/wards")
            .header(ADMIN_ID_HEADER, "admin")
            .header(ADMIN_PASSWORD_HEADER, "password")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let (status, error) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());

        let (_, patients) = send(&app, request("GET", "/patients", None)).await;
        assert_eq!(patients, json!([]));
    }

    #[tokio::test]
    async fn non_numeric_receipt_id_is_bad_request() {
        let app = app();
        let (status, error) = send(&app, request("GET", "/billing/abc/receipt", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["error"],
            "patient_id must be a non-negative whole number (got \"abc\")"
        );
    }

    #[tokio::test]
    async fn ward_conflicts_are_409() {
        let app = app();
        let ward = json!({"name": "ICU", "total_beds": 1});
        let (status, created) = send(&app, request("POST", "/wards", Some(ward.clone()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["occupied_beds"], 0);

        let (status, _) = send(&app, request("POST", "/wards", Some(ward))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, request("POST", "/wards/ICU/beds", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ward"]["occupied_beds"], 1);

        let (status, _) = send(&app, request("POST", "/wards/ICU/beds", None)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, request("POST", "/wards/Nowhere/beds", None)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, stats) = send(&app, request("GET", "/wards/statistics", None)).await;
        assert_eq!(stats["summary"]["free_beds"], 0);
        assert_eq!(stats["text"], "Ward: ICU, Total Beds: 1, Occupied Beds: 1");
    }

    #[tokio::test]
    async fn billing_receipt_round_trip() {
        let app = app();
        let (status, record) = send(
            &app,
            request(
                "POST",
                "/billing",
                Some(json!({"patient_id": 7, "registration_charge": 500, "medicine_cost": 1200})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["total_cost"], 1700);

        let (status, receipt) = send(&app, request("GET", "/billing/7/receipt", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["receipt"]["total_cost"], 1700);
        assert!(receipt["text"]
            .as_str()
            .unwrap()
            .contains("Total Amount: 1700 Rupees"));

        let (status, _) = send(&app, request("GET", "/billing/8/receipt", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn due_appointments_respect_window() {
        let app = app();
        send(
            &app,
            request(
                "POST",
                "/patients",
                Some(json!({"name": "Bala", "age": 52, "gender": "Female", "ailment": "Diabetes"})),
            ),
        )
        .await;
        for time in ["2024-06-01 20:00", "2024-06-02 21:00"] {
            let (status, _) = send(
                &app,
                request(
                    "POST",
                    "/appointments",
                    Some(json!({"patient_id": 1, "doctor_id": 1, "appointment_time": time})),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, due) = send(
            &app,
            request("GET", "/appointments/due?at=2024-06-01%2008:00", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(due.as_array().unwrap().len(), 1);
        assert_eq!(
            due[0]["message"],
            "Reminder: Bala, you have an appointment scheduled on 2024-06-01 20:00."
        );

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/appointments",
                Some(json!({"patient_id": 1, "doctor_id": 1, "appointment_time": "June 1st"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn feedback_and_complaints_are_listed() {
        let app = app();
        let (status, _) = send(
            &app,
            request("POST", "/feedback", Some(json!({"text": "Kind nurses"}))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&app, request("POST", "/complaints", Some(json!({"text": ""})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, feedback) = send(&app, request("GET", "/feedback", None)).await;
        assert_eq!(feedback["items"], json!(["Kind nurses"]));
        let (_, complaints) = send(&app, request("GET", "/complaints", None)).await;
        assert_eq!(complaints["items"], json!([]));
    }

    #[tokio::test]
    async fn support_message_comes_from_config() {
        let app = app();
        let (_, body) = send(&app, request("GET", "/support", None)).await;
        assert_eq!(
            body["message"],
            "For support, please contact us at: support@hospital.com or call +1234567890."
        );
    }
}
