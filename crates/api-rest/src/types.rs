//! Request and response bodies for the REST API.
//!
//! Request bodies carry raw form values; handlers turn them into the core's
//! validated request types before touching the registry.

use std::str::FromStr;

use clinic_core::validation::{parse_whole_number, whole_number};
use clinic_core::{ClinicResult, Receipt, TokenEntry, Ward, WardSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A numeric form field sent either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FormNumber {
    Whole(i64),
    Text(String),
}

impl FormNumber {
    pub fn parse<T>(&self, field: &'static str) -> ClinicResult<T>
    where
        T: FromStr + TryFrom<i64>,
    {
        match self {
            FormNumber::Whole(value) => whole_number(field, *value),
            FormNumber::Text(text) => parse_whole_number(field, text),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub name: String,
    pub age: FormNumber,
    pub gender: String,
    pub ailment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDoctorReq {
    pub name: String,
    pub specialization: String,
    pub contact: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentReq {
    pub patient_id: FormNumber,
    pub doctor_id: FormNumber,
    /// "YYYY-MM-DD HH:MM"
    pub appointment_time: String,
}

/// Feedback or complaint submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TextReq {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TextListRes {
    pub items: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBillingReq {
    pub patient_id: FormNumber,
    pub registration_charge: FormNumber,
    pub medicine_cost: FormNumber,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptRes {
    pub receipt: Receipt,
    /// Plain-text rendering of the receipt.
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWardReq {
    pub name: String,
    pub total_beds: FormNumber,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignBedRes {
    pub ward: Ward,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WardStatisticsRes {
    pub summary: WardSummary,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokensRes {
    /// Tokens still waiting, head first.
    pub pending: Vec<u32>,
    /// Token issued to every registered patient.
    pub board: Vec<TokenEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextTokenRes {
    pub token: Option<u32>,
    pub message: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DueQuery {
    /// Reference time ("YYYY-MM-DD HH:MM"); defaults to now.
    pub at: Option<String>,
    /// Look-ahead window in hours; defaults to the configured horizon.
    pub hours: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportRes {
    pub message: String,
}
