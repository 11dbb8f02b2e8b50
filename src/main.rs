use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDateTime};
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use clinic_core::{ClinicConfig, EnvValues, Registry, Reminder};

const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 300;

/// Main entry point for the clinic front desk
///
/// Runs the REST server and a periodic reminder sweep over the same registry:
/// - REST server on port 3000 (configurable via CLINIC_REST_ADDR)
/// - reminder sweep every 300 seconds (configurable via CLINIC_REMINDER_INTERVAL_SECS)
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINIC_REMINDER_INTERVAL_SECS`: seconds between reminder sweeps (default: 300)
/// - `CLINIC_ADMIN_ID` / `CLINIC_ADMIN_PASSWORD`: credentials for the API
/// - `CLINIC_REMINDER_HORIZON_HOURS`: how far ahead the sweep looks (default: 24)
///
/// # Returns
/// * `Ok(())` - If the server runs and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(ClinicConfig::from_env_values(EnvValues::collect(|key| {
        std::env::var(key).ok()
    }))?);
    let rest_addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let interval = reminder_interval_from_env_value(
        std::env::var("CLINIC_REMINDER_INTERVAL_SECS").ok(),
    )?;

    tracing::info!("++ Starting clinic REST on {}", rest_addr);
    tracing::info!(
        "++ Reminder sweep every {}s, looking {}h ahead",
        interval.as_secs(),
        cfg.reminder_horizon().num_hours()
    );

    let state = AppState::new(cfg.clone());
    let sweep = tokio::spawn(run_reminder_sweep(
        state.registry(),
        cfg.reminder_horizon(),
        interval,
    ));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    let served = axum::serve(listener, router(state)).await;

    sweep.abort();
    served?;
    Ok(())
}

fn reminder_interval_from_env_value(value: Option<String>) -> anyhow::Result<StdDuration> {
    let Some(raw) = value else {
        return Ok(StdDuration::from_secs(DEFAULT_REMINDER_INTERVAL_SECS));
    };
    let secs: u64 = raw.trim().parse().map_err(|_| {
        anyhow::anyhow!("CLINIC_REMINDER_INTERVAL_SECS must be a whole number of seconds (got {raw:?})")
    })?;
    if secs == 0 {
        anyhow::bail!("CLINIC_REMINDER_INTERVAL_SECS must be greater than zero");
    }
    Ok(StdDuration::from_secs(secs))
}

async fn run_reminder_sweep(
    registry: Arc<RwLock<Registry>>,
    horizon: Duration,
    every: StdDuration,
) {
    let mut ticker = tokio::time::interval(every);
    let mut reminded = HashSet::new();
    loop {
        ticker.tick().await;
        let now = Local::now().naive_local();
        let fresh = {
            let registry = registry.read().await;
            new_reminders(&registry, now, horizon, &mut reminded)
        };
        for reminder in fresh {
            tracing::info!(
                appointment_id = reminder.appointment.id,
                patient_id = reminder.appointment.patient_id,
                "{}",
                reminder.message
            );
        }
    }
}

/// Reminders for due appointments not reminded about on an earlier sweep.
fn new_reminders(
    registry: &Registry,
    as_of: NaiveDateTime,
    horizon: Duration,
    reminded: &mut HashSet<u32>,
) -> Vec<Reminder> {
    registry
        .due_appointments(as_of, horizon)
        .filter(|due| reminded.insert(due.appointment.id))
        .map(|due| due.to_reminder())
        .collect()
}
