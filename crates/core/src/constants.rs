//! Constants used throughout the clinic core crate.
//!
//! Defaults for configuration, text formats shared by the hosts, and the
//! suggestion lists offered on the registration forms.

/// Format accepted for appointment times and used when rendering them.
pub const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Human readable form of [`APPOINTMENT_TIME_FORMAT`], quoted in time parsing errors.
pub const APPOINTMENT_TIME_PATTERN: &str = "YYYY-MM-DD HH:MM";

/// Default admin id for the front-desk login placeholder.
pub const DEFAULT_ADMIN_ID: &str = "admin";

/// Default admin password for the front-desk login placeholder.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Default reminder window, in hours, looking forward from "now".
pub const DEFAULT_REMINDER_HORIZON_HOURS: i64 = 24;

/// Currency label printed on receipts when none is configured.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rupees";

pub const DEFAULT_SUPPORT_EMAIL: &str = "support@hospital.com";
pub const DEFAULT_SUPPORT_PHONE: &str = "+1234567890";

/// Shown by ward statistics when no ward has been added.
pub const NO_WARDS_MESSAGE: &str = "No wards available.";

/// Width of the rule under the receipt title.
pub const RECEIPT_RULE_WIDTH: usize = 20;

/// Gender choices offered on the patient form.
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];

/// Doctor names offered on the doctor form.
pub const DOCTOR_NAME_SUGGESTIONS: &[&str] = &[
    "Dr. A. Sharma",
    "Dr. R. Gupta",
    "Dr. S. Verma",
    "Dr. P. Singh",
    "Dr. N. Mehta",
    "Dr. K. Rao",
];

/// Specializations offered on the doctor form.
pub const SPECIALIZATION_SUGGESTIONS: &[&str] = &[
    "Cardiology",
    "Neurology",
    "Pediatrics",
    "Orthopedics",
    "General Medicine",
];
