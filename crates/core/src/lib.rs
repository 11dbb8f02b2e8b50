//! # Clinic Core
//!
//! Core business logic for the clinic front desk.
//!
//! This crate holds every front-desk record in memory and owns their mutation:
//! - Patient and doctor registration, appointments, feedback and complaints
//! - Billing records and plain-text receipts
//! - Ward bed pools and the walk-in token queue
//! - Due-appointment reminders
//!
//! Input arrives through the typed requests in [`validation`], so the [`Registry`]
//! itself never sees malformed data. Nothing is persisted.
//!
//! **No host concerns**: the interactive shell lives in `clinic-cli` and the HTTP
//! surface in `api-rest`.

pub mod auth;
pub mod billing;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod registry;
pub mod reminders;
pub mod tokens;
pub mod validation;
pub mod wards;

pub use auth::AdminGate;
pub use billing::Receipt;
pub use clinic_types::{NonEmptyText, TextError};
pub use config::{AdminCredentials, ClinicConfig, EnvValues};
pub use error::{ClinicError, ClinicResult};
pub use models::{Appointment, BillingRecord, Doctor, Patient, TokenEntry, Ward};
pub use registry::Registry;
pub use reminders::{DueAppointment, Reminder};
pub use validation::{FreeText, NewAppointment, NewBilling, NewDoctor, NewPatient, NewWard};
pub use wards::WardSummary;
