//! Input validation at the registry boundary.
//!
//! Every registry mutation takes one of the request types defined here. Each is
//! built once from raw form values (`parse`) or from already-typed values (`new`),
//! and a successfully built request is always safe to hand to the registry. Failures
//! are reported as validation errors and leave clinic state untouched.

use std::str::FromStr;

use chrono::NaiveDateTime;
use clinic_types::NonEmptyText;

use crate::constants::APPOINTMENT_TIME_FORMAT;
use crate::{ClinicError, ClinicResult};

/// Requires `input` to contain non-whitespace text.
pub fn required_text(field: &'static str, input: &str) -> ClinicResult<NonEmptyText> {
    NonEmptyText::new(input).map_err(|source| ClinicError::EmptyField { field, source })
}

/// Parses a form field made only of ASCII digits.
///
/// Signs, decimal points and blank input are rejected, as are values that do not fit `T`.
pub fn parse_whole_number<T: FromStr>(field: &'static str, input: &str) -> ClinicResult<T> {
    let trimmed = input.trim();
    let invalid = || ClinicError::InvalidNumber {
        field,
        value: input.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    trimmed.parse::<T>().map_err(|_| invalid())
}

/// Narrows a signed value (e.g. from a JSON body) to a non-negative `T`.
pub fn whole_number<T: TryFrom<i64>>(field: &'static str, value: i64) -> ClinicResult<T> {
    T::try_from(value).map_err(|_| ClinicError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parses an appointment time in `YYYY-MM-DD HH:MM` form.
pub fn parse_appointment_time(input: &str) -> ClinicResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), APPOINTMENT_TIME_FORMAT)
        .map_err(|_| ClinicError::InvalidAppointmentTime(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: NonEmptyText,
    pub age: u32,
    pub gender: NonEmptyText,
    pub ailment: NonEmptyText,
}

impl NewPatient {
    pub fn new(name: &str, age: u32, gender: &str, ailment: &str) -> ClinicResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            age,
            gender: required_text("gender", gender)?,
            ailment: required_text("ailment", ailment)?,
        })
    }

    /// Builds a patient request from the raw registration form.
    pub fn parse(name: &str, age: &str, gender: &str, ailment: &str) -> ClinicResult<Self> {
        let age = parse_whole_number("age", age)?;
        Self::new(name, age, gender, ailment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: NonEmptyText,
    pub specialization: NonEmptyText,
    pub contact: NonEmptyText,
}

impl NewDoctor {
    pub fn new(name: &str, specialization: &str, contact: &str) -> ClinicResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            specialization: required_text("specialization", specialization)?,
            contact: required_text("contact", contact)?,
        })
    }
}

/// Appointment request. Patient and doctor ids are not checked against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: u32,
    pub doctor_id: u32,
    pub appointment_time: NaiveDateTime,
}

impl NewAppointment {
    pub fn new(patient_id: u32, doctor_id: u32, appointment_time: NaiveDateTime) -> Self {
        Self {
            patient_id,
            doctor_id,
            appointment_time,
        }
    }

    pub fn parse(patient_id: &str, doctor_id: &str, appointment_time: &str) -> ClinicResult<Self> {
        Ok(Self::new(
            parse_whole_number("patient_id", patient_id)?,
            parse_whole_number("doctor_id", doctor_id)?,
            parse_appointment_time(appointment_time)?,
        ))
    }
}

/// Billing request. The total is fixed here so the registry never has to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBilling {
    pub patient_id: u32,
    pub registration_charge: u64,
    pub medicine_cost: u64,
    total_cost: u64,
}

impl NewBilling {
    pub fn new(patient_id: u32, registration_charge: u64, medicine_cost: u64) -> ClinicResult<Self> {
        let total_cost = registration_charge
            .checked_add(medicine_cost)
            .ok_or_else(|| ClinicError::InvalidInput("billing total is too large".into()))?;
        Ok(Self {
            patient_id,
            registration_charge,
            medicine_cost,
            total_cost,
        })
    }

    pub fn parse(
        patient_id: &str,
        registration_charge: &str,
        medicine_cost: &str,
    ) -> ClinicResult<Self> {
        Self::new(
            parse_whole_number("patient_id", patient_id)?,
            parse_whole_number("registration_charge", registration_charge)?,
            parse_whole_number("medicine_cost", medicine_cost)?,
        )
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWard {
    pub name: NonEmptyText,
    pub total_beds: u32,
}

impl NewWard {
    pub fn new(name: &str, total_beds: u32) -> ClinicResult<Self> {
        Ok(Self {
            name: required_text("ward name", name)?,
            total_beds,
        })
    }

    pub fn parse(name: &str, total_beds: &str) -> ClinicResult<Self> {
        let total_beds = parse_whole_number("total_beds", total_beds)?;
        Self::new(name, total_beds)
    }
}

/// Free-text submission used for both feedback and complaints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeText(pub NonEmptyText);

impl FreeText {
    pub fn parse(field: &'static str, text: &str) -> ClinicResult<Self> {
        required_text(field, text).map(Self)
    }
}
