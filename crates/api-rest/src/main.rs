//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `clinic-run` binary also runs the reminder sweep.

use std::sync::Arc;

use api_rest::{router, AppState};
use clinic_core::{ClinicConfig, EnvValues};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the clinic REST API server
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CLINIC_ADMIN_ID` / `CLINIC_ADMIN_PASSWORD`: credentials checked on every API route
/// - `CLINIC_REMINDER_HORIZON_HOURS`, `CLINIC_CURRENCY`, `CLINIC_SUPPORT_EMAIL`,
///   `CLINIC_SUPPORT_PHONE`: desk settings, see `ClinicConfig`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the environment holds an invalid setting,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ClinicConfig::from_env_values(EnvValues::collect(|key| std::env::var(key).ok()))?;
    let addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting clinic REST API on {}", addr);

    let app = router(AppState::new(Arc::new(cfg)));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
