//! Front-desk admin gate.
//!
//! A single configured id/password pair unlocks the front desk. This is a
//! placeholder check: there are no sessions, hashing or lockouts.

use crate::config::AdminCredentials;
use crate::{ClinicError, ClinicResult};

#[derive(Clone, Debug)]
pub struct AdminGate {
    credentials: AdminCredentials,
}

impl AdminGate {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Checks an id/password pair against the configured admin credentials.
    pub fn verify(&self, admin_id: &str, password: &str) -> ClinicResult<()> {
        if admin_id == self.credentials.id.as_str()
            && password == self.credentials.password.as_str()
        {
            tracing::info!(admin_id, "admin login accepted");
            Ok(())
        } else {
            tracing::warn!(admin_id, "admin login rejected");
            Err(ClinicError::InvalidCredentials)
        }
    }
}
