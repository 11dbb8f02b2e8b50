use clinic_types::TextError;

use crate::constants::APPOINTMENT_TIME_PATTERN;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{field} is required")]
    EmptyField {
        field: &'static str,
        #[source]
        source: TextError,
    },
    #[error("{field} must be a non-negative whole number (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid appointment time {0:?}: expected {}", APPOINTMENT_TIME_PATTERN)]
    InvalidAppointmentTime(String),

    #[error("ward already exists: {0}")]
    WardExists(String),
    #[error("no free bed in ward {0} (ward is full or does not exist)")]
    WardUnavailable(String),

    #[error("no billing record found for patient {0}")]
    NoBillingRecord(u32),

    #[error("invalid admin id or password")]
    InvalidCredentials,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClinicError {
    /// Errors raised at the input boundary before any record is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClinicError::InvalidInput(_)
                | ClinicError::EmptyField { .. }
                | ClinicError::InvalidNumber { .. }
                | ClinicError::InvalidAppointmentTime(_)
        )
    }

    /// Ward operations rejected because of the current ward state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ClinicError::WardExists(_) | ClinicError::WardUnavailable(_)
        )
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
