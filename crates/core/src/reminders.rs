//! Appointment reminders.
//!
//! An appointment is due when it falls at or before `as_of + horizon`. Appointments
//! already in the past are still due, matching the front desk's "send reminders"
//! sweep. Appointments whose patient id matches no registered patient are skipped.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::APPOINTMENT_TIME_FORMAT;
use crate::models::{Appointment, Patient};

/// A due appointment paired with the patient it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueAppointment<'a> {
    pub appointment: &'a Appointment,
    pub patient: &'a Patient,
}

impl DueAppointment<'_> {
    pub fn reminder_message(&self) -> String {
        format!(
            "Reminder: {}, you have an appointment scheduled on {}.",
            self.patient.name,
            self.appointment
                .appointment_time
                .format(APPOINTMENT_TIME_FORMAT)
        )
    }

    pub fn to_reminder(&self) -> Reminder {
        Reminder {
            appointment: self.appointment.clone(),
            patient_name: self.patient.name.to_string(),
            message: self.reminder_message(),
        }
    }
}

/// Owned form of a [`DueAppointment`] for hosts that serialize reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Reminder {
    pub appointment: Appointment,
    pub patient_name: String,
    pub message: String,
}

/// Latest appointment time still considered due.
pub fn reminder_deadline(as_of: NaiveDateTime, horizon: Duration) -> NaiveDateTime {
    as_of
        .checked_add_signed(horizon)
        .unwrap_or(if horizon < Duration::zero() {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

pub(crate) fn due_appointments<'a>(
    appointments: &'a [Appointment],
    patients: &'a [Patient],
    as_of: NaiveDateTime,
    horizon: Duration,
) -> impl Iterator<Item = DueAppointment<'a>> + 'a {
    let deadline = reminder_deadline(as_of, horizon);
    appointments
        .iter()
        .filter(move |appointment| appointment.appointment_time <= deadline)
        .filter_map(move |appointment| {
            patients
                .iter()
                .find(|patient| patient.id == appointment.patient_id)
                .map(|patient| DueAppointment {
                    appointment,
                    patient,
                })
        })
}
