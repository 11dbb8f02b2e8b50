//! Records held by the registry.
//!
//! Records are created by the registry only; hosts receive them by reference or as
//! clones and never mutate them.

use chrono::NaiveDateTime;
use clinic_types::NonEmptyText;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::APPOINTMENT_TIME_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Patient {
    pub id: u32,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    pub age: u32,
    #[schema(value_type = String)]
    pub gender: NonEmptyText,
    #[schema(value_type = String)]
    pub ailment: NonEmptyText,
    /// Walk-in queue number issued at registration.
    pub token: u32,
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Gender: {}, Ailment: {}",
            self.id, self.name, self.age, self.gender, self.ailment
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Doctor {
    pub id: u32,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub specialization: NonEmptyText,
    #[schema(value_type = String)]
    pub contact: NonEmptyText,
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Specialization: {}, Contact: {}",
            self.id, self.name, self.specialization, self.contact
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Appointment {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub appointment_time: NaiveDateTime,
}

impl std::fmt::Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Patient ID: {}, Doctor ID: {}, Time: {}",
            self.id,
            self.patient_id,
            self.doctor_id,
            self.appointment_time.format(APPOINTMENT_TIME_FORMAT)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BillingRecord {
    pub id: u32,
    pub patient_id: u32,
    pub registration_charge: u64,
    pub medicine_cost: u64,
    /// Sum of the two charges, fixed when the record is created.
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ward {
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    pub total_beds: u32,
    pub occupied_beds: u32,
}

impl Ward {
    pub fn free_beds(&self) -> u32 {
        self.total_beds - self.occupied_beds
    }

    pub fn is_full(&self) -> bool {
        self.occupied_beds >= self.total_beds
    }
}

impl std::fmt::Display for Ward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ward: {}, Total Beds: {}, Occupied Beds: {}",
            self.name, self.total_beds, self.occupied_beds
        )
    }
}

/// One line of the token board: a patient and the token they were issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenEntry {
    pub token: u32,
    pub patient_name: String,
}

impl std::fmt::Display for TokenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token: {}, Patient: {}", self.token, self.patient_name)
    }
}
