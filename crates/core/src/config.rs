//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! registry hosts. Nothing in this module reads the process environment: binaries
//! read their environment variables and hand the raw values to
//! [`ClinicConfig::from_env_values`].

use chrono::Duration;
use clinic_types::NonEmptyText;

use crate::constants::{
    DEFAULT_ADMIN_ID, DEFAULT_ADMIN_PASSWORD, DEFAULT_CURRENCY_LABEL,
    DEFAULT_REMINDER_HORIZON_HOURS, DEFAULT_SUPPORT_EMAIL, DEFAULT_SUPPORT_PHONE,
};
use crate::{ClinicError, ClinicResult};

/// Placeholder admin credentials guarding the front desk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub id: NonEmptyText,
    pub password: NonEmptyText,
}

/// Raw, optional values as read from the environment.
#[derive(Clone, Debug, Default)]
pub struct EnvValues {
    pub admin_id: Option<String>,
    pub admin_password: Option<String>,
    pub reminder_horizon_hours: Option<String>,
    pub currency: Option<String>,
    pub support_email: Option<String>,
    pub support_phone: Option<String>,
}

impl EnvValues {
    /// Collects the `CLINIC_*` variables through `lookup` (normally `std::env::var(..).ok()`).
    pub fn collect(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            admin_id: lookup("CLINIC_ADMIN_ID"),
            admin_password: lookup("CLINIC_ADMIN_PASSWORD"),
            reminder_horizon_hours: lookup("CLINIC_REMINDER_HORIZON_HOURS"),
            currency: lookup("CLINIC_CURRENCY"),
            support_email: lookup("CLINIC_SUPPORT_EMAIL"),
            support_phone: lookup("CLINIC_SUPPORT_PHONE"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClinicConfig {
    admin: AdminCredentials,
    reminder_horizon: Duration,
    currency_label: NonEmptyText,
    support_email: NonEmptyText,
    support_phone: NonEmptyText,
}

impl ClinicConfig {
    pub fn new(
        admin: AdminCredentials,
        reminder_horizon: Duration,
        currency_label: NonEmptyText,
        support_email: NonEmptyText,
        support_phone: NonEmptyText,
    ) -> ClinicResult<Self> {
        if reminder_horizon <= Duration::zero() {
            return Err(ClinicError::InvalidConfig(
                "reminder horizon must be positive".into(),
            ));
        }

        Ok(Self {
            admin,
            reminder_horizon,
            currency_label,
            support_email,
            support_phone,
        })
    }

    /// Builds a configuration from raw values, using defaults for anything unset or blank.
    pub fn from_env_values(values: EnvValues) -> ClinicResult<Self> {
        let admin = AdminCredentials {
            id: text_or_default("CLINIC_ADMIN_ID", values.admin_id, DEFAULT_ADMIN_ID)?,
            password: text_or_default(
                "CLINIC_ADMIN_PASSWORD",
                values.admin_password,
                DEFAULT_ADMIN_PASSWORD,
            )?,
        };

        Self::new(
            admin,
            reminder_horizon_from_env_value(values.reminder_horizon_hours)?,
            text_or_default("CLINIC_CURRENCY", values.currency, DEFAULT_CURRENCY_LABEL)?,
            text_or_default(
                "CLINIC_SUPPORT_EMAIL",
                values.support_email,
                DEFAULT_SUPPORT_EMAIL,
            )?,
            text_or_default(
                "CLINIC_SUPPORT_PHONE",
                values.support_phone,
                DEFAULT_SUPPORT_PHONE,
            )?,
        )
    }

    pub fn admin(&self) -> &AdminCredentials {
        &self.admin
    }

    pub fn reminder_horizon(&self) -> Duration {
        self.reminder_horizon
    }

    pub fn currency_label(&self) -> &str {
        self.currency_label.as_str()
    }

    pub fn support_message(&self) -> String {
        format!(
            "For support, please contact us at: {} or call {}.",
            self.support_email, self.support_phone
        )
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            admin: AdminCredentials {
                id: NonEmptyText::new(DEFAULT_ADMIN_ID).expect("default admin id is non-empty"),
                password: NonEmptyText::new(DEFAULT_ADMIN_PASSWORD)
                    .expect("default admin password is non-empty"),
            },
            reminder_horizon: Duration::hours(DEFAULT_REMINDER_HORIZON_HOURS),
            currency_label: NonEmptyText::new(DEFAULT_CURRENCY_LABEL)
                .expect("default currency is non-empty"),
            support_email: NonEmptyText::new(DEFAULT_SUPPORT_EMAIL)
                .expect("default support email is non-empty"),
            support_phone: NonEmptyText::new(DEFAULT_SUPPORT_PHONE)
                .expect("default support phone is non-empty"),
        }
    }
}

/// Parse the reminder horizon (whole hours) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of one day.
pub fn reminder_horizon_from_env_value(value: Option<String>) -> ClinicResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(Duration::hours(DEFAULT_REMINDER_HORIZON_HOURS));
    };

    match value.parse::<i64>() {
        Ok(hours) if hours > 0 => Duration::try_hours(hours).ok_or_else(|| {
            ClinicError::InvalidConfig(format!(
                "CLINIC_REMINDER_HORIZON_HOURS is out of range: {value}"
            ))
        }),
        _ => Err(ClinicError::InvalidConfig(format!(
            "CLINIC_REMINDER_HORIZON_HOURS must be a positive whole number of hours, got {value:?}"
        ))),
    }
}

fn text_or_default(
    name: &str,
    value: Option<String>,
    default: &str,
) -> ClinicResult<NonEmptyText> {
    let value = value.filter(|v| !v.trim().is_empty());
    NonEmptyText::new(value.as_deref().unwrap_or(default))
        .map_err(|_| ClinicError::InvalidConfig(format!("{name} cannot be empty")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = ClinicConfig::from_env_values(EnvValues::default()).expect("defaults are valid");
        assert_eq!(cfg.admin().id.as_str(), "admin");
        assert_eq!(cfg.admin().password.as_str(), "password");
        assert_eq!(cfg.reminder_horizon(), Duration::days(1));
        assert_eq!(cfg.currency_label(), "Rupees");
        assert_eq!(
            cfg.support_message(),
            "For support, please contact us at: support@hospital.com or call +1234567890."
        );
    }

    #[test]
    fn collect_reads_clinic_variables() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CLINIC_ADMIN_ID", "desk"),
            ("CLINIC_CURRENCY", "INR"),
            ("CLINIC_REMINDER_HORIZON_HOURS", "48"),
            ("CLINIC_SUPPORT_PHONE", "  "),
        ]);
        let values = EnvValues::collect(|key| env.get(key).map(|v| v.to_string()));
        let cfg = ClinicConfig::from_env_values(values).expect("valid values");

        assert_eq!(cfg.admin().id.as_str(), "desk");
        assert_eq!(cfg.admin().password.as_str(), "password");
        assert_eq!(cfg.currency_label(), "INR");
        assert_eq!(cfg.reminder_horizon(), Duration::hours(48));
        assert!(cfg.support_message().ends_with("call +1234567890."));
    }

    #[test]
    fn horizon_must_be_positive_hours() {
        assert_eq!(
            reminder_horizon_from_env_value(Some(" ".into())).unwrap(),
            Duration::hours(24)
        );
        for bad in ["0", "-5", "1.5", "soon"] {
            let err = reminder_horizon_from_env_value(Some(bad.into())).expect_err(bad);
            assert!(matches!(err, ClinicError::InvalidConfig(_)));
        }
    }

    #[test]
    fn new_rejects_non_positive_horizon() {
        let defaults = ClinicConfig::default();
        let err = ClinicConfig::new(
            defaults.admin().clone(),
            Duration::zero(),
            NonEmptyText::new("Rupees").unwrap(),
            NonEmptyText::new("a@b.c").unwrap(),
            NonEmptyText::new("1").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ClinicError::InvalidConfig(_)));
    }
}
