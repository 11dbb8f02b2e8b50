//! Plain-text billing receipts.

use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::RECEIPT_RULE_WIDTH;
use crate::models::BillingRecord;

/// A receipt for a single billing record, priced in the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Receipt {
    pub patient_id: u32,
    pub registration_charge: u64,
    pub medicine_cost: u64,
    pub total_cost: u64,
    pub currency: String,
}

impl Receipt {
    pub fn new(record: &BillingRecord, currency: impl Into<String>) -> Self {
        Self {
            patient_id: record.patient_id,
            registration_charge: record.registration_charge,
            medicine_cost: record.medicine_cost,
            total_cost: record.total_cost,
            currency: currency.into(),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Receipt")?;
        writeln!(f, "{}", "-".repeat(RECEIPT_RULE_WIDTH))?;
        writeln!(f, "Patient ID: {}", self.patient_id)?;
        writeln!(
            f,
            "Registration Charge: {} {}",
            self.registration_charge, self.currency
        )?;
        writeln!(f, "Medicine Cost: {} {}", self.medicine_cost, self.currency)?;
        writeln!(f, "Total Amount: {} {}", self.total_cost, self.currency)
    }
}
