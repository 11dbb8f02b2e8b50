//! The clinic registry.
//!
//! [`Registry`] is the in-memory aggregate of every front-desk record and the only
//! place those records are created or changed. It is a plain value owned by its
//! host: the CLI shell holds it directly, the REST API keeps it behind a lock.
//!
//! ## Contract
//!
//! - Ids are assigned as "collection size + 1" and start at 1.
//! - Records are never updated or deleted. Wards change only through
//!   [`Registry::assign_bed`], and the patient list only changes order through
//!   [`Registry::sort_patients_by_name`].
//! - Patient and doctor ids on appointments and billing records are not checked.
//! - Operations never fail once given a validated request; ward conflicts are
//!   reported as `false`.

use chrono::{Duration, NaiveDateTime};
use clinic_types::NonEmptyText;

use crate::billing::Receipt;
use crate::models::{Appointment, BillingRecord, Doctor, Patient, TokenEntry, Ward};
use crate::reminders::{due_appointments, DueAppointment};
use crate::tokens::TokenQueue;
use crate::validation::{FreeText, NewAppointment, NewBilling, NewDoctor, NewPatient, NewWard};
use crate::wards::{WardSummary, Wards};
use crate::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    feedback: Vec<NonEmptyText>,
    complaints: Vec<NonEmptyText>,
    billing: Vec<BillingRecord>,
    wards: Wards,
    tokens: TokenQueue,
}

fn next_id(len: usize) -> u32 {
    len as u32 + 1
}

impl Registry {
    pub fn new() -> Self {
        Self {
            wards: Wards::new(),
            tokens: TokenQueue::new(),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Patients and tokens
    // ------------------------------------------------------------------

    /// Registers a patient and issues their walk-in token.
    ///
    /// The token is the current queue length plus one and is appended to the
    /// token queue in the same step, so tokens are queued in registration order.
    pub fn register_patient(&mut self, request: NewPatient) -> Patient {
        let id = next_id(self.patients.len());
        let token = self.tokens.issue();
        let patient = Patient {
            id,
            name: request.name,
            age: request.age,
            gender: request.gender,
            ailment: request.ailment,
            token,
        };
        tracing::info!(patient_id = id, token, "registered patient");
        self.patients.push(patient.clone());
        patient
    }

    /// Calls the next walk-in token, removing it from the queue.
    ///
    /// The patient who holds the token is left untouched.
    pub fn next_token(&mut self) -> Option<u32> {
        let token = self.tokens.call_next();
        match token {
            Some(token) => tracing::info!(token, "called next token"),
            None => tracing::debug!("token queue is empty"),
        }
        token
    }

    /// Tokens still waiting to be called, head first.
    pub fn pending_tokens(&self) -> Vec<u32> {
        self.tokens.pending().collect()
    }

    /// Every patient with the token issued to them, in patient list order.
    ///
    /// Called tokens still appear here; the board reflects registrations, not the queue.
    pub fn token_board(&self) -> Vec<TokenEntry> {
        self.patients
            .iter()
            .map(|p| TokenEntry {
                token: p.token,
                patient_name: p.name.to_string(),
            })
            .collect()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Reorders the patient list by name, ascending. Equal names keep their order.
    pub fn sort_patients_by_name(&mut self) {
        self.patients.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = self.patients.len(), "sorted patients by name");
    }

    // ------------------------------------------------------------------
    // Doctors and appointments
    // ------------------------------------------------------------------

    /// Registers a doctor. Duplicate doctors are allowed.
    pub fn register_doctor(&mut self, request: NewDoctor) -> Doctor {
        let doctor = Doctor {
            id: next_id(self.doctors.len()),
            name: request.name,
            specialization: request.specialization,
            contact: request.contact,
        };
        tracing::info!(doctor_id = doctor.id, "registered doctor");
        self.doctors.push(doctor.clone());
        doctor
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Books an appointment without checking that the patient or doctor exist.
    pub fn schedule_appointment(&mut self, request: NewAppointment) -> Appointment {
        let appointment = Appointment {
            id: next_id(self.appointments.len()),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            appointment_time: request.appointment_time,
        };
        tracing::info!(
            appointment_id = appointment.id,
            patient_id = appointment.patient_id,
            doctor_id = appointment.doctor_id,
            "scheduled appointment"
        );
        self.appointments.push(appointment.clone());
        appointment
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments at or before `as_of + horizon`, each paired with its patient.
    ///
    /// Each call returns a fresh iterator over the current state. Appointments whose
    /// patient id matches no registered patient are left out.
    pub fn due_appointments(
        &self,
        as_of: NaiveDateTime,
        horizon: Duration,
    ) -> impl Iterator<Item = DueAppointment<'_>> + '_ {
        due_appointments(&self.appointments, &self.patients, as_of, horizon)
    }

    // ------------------------------------------------------------------
    // Feedback and complaints
    // ------------------------------------------------------------------

    pub fn record_feedback(&mut self, text: FreeText) {
        self.feedback.push(text.0);
        tracing::info!(count = self.feedback.len(), "recorded feedback");
    }

    pub fn record_complaint(&mut self, text: FreeText) {
        self.complaints.push(text.0);
        tracing::info!(count = self.complaints.len(), "recorded complaint");
    }

    pub fn feedback(&self) -> &[NonEmptyText] {
        &self.feedback
    }

    pub fn complaints(&self) -> &[NonEmptyText] {
        &self.complaints
    }

    // ------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------

    /// Records a bill. A patient may have any number of billing records.
    pub fn record_billing(&mut self, request: NewBilling) -> BillingRecord {
        let record = BillingRecord {
            id: next_id(self.billing.len()),
            patient_id: request.patient_id,
            registration_charge: request.registration_charge,
            medicine_cost: request.medicine_cost,
            total_cost: request.total_cost(),
        };
        tracing::info!(
            billing_id = record.id,
            patient_id = record.patient_id,
            total_cost = record.total_cost,
            "recorded billing"
        );
        self.billing.push(record.clone());
        record
    }

    pub fn billing_records(&self) -> &[BillingRecord] {
        &self.billing
    }

    /// The first billing record recorded for `patient_id`.
    pub fn billing_for(&self, patient_id: u32) -> Option<&BillingRecord> {
        self.billing.iter().find(|r| r.patient_id == patient_id)
    }

    /// Receipt for the first billing record of `patient_id`.
    pub fn receipt(&self, patient_id: u32, currency: &str) -> ClinicResult<Receipt> {
        self.billing_for(patient_id)
            .map(|record| Receipt::new(record, currency))
            .ok_or(ClinicError::NoBillingRecord(patient_id))
    }

    // ------------------------------------------------------------------
    // Wards
    // ------------------------------------------------------------------

    /// Adds a ward with every bed free. Returns `false` without change if the name exists.
    pub fn add_ward(&mut self, request: NewWard) -> bool {
        let name = request.name.to_string();
        let added = self.wards.add(request);
        if added {
            tracing::info!(ward = %name, "added ward");
        } else {
            tracing::warn!(ward = %name, "ward already exists");
        }
        added
    }

    /// Occupies a bed. Returns `false` without change if the ward is missing or full.
    pub fn assign_bed(&mut self, ward_name: &str) -> bool {
        let assigned = self.wards.assign_bed(ward_name);
        if assigned {
            tracing::info!(ward = ward_name, "assigned bed");
        } else {
            tracing::warn!(ward = ward_name, "no bed available");
        }
        assigned
    }

    pub fn ward(&self, name: &str) -> Option<&Ward> {
        self.wards.get(name)
    }

    /// Wards in hash map order.
    pub fn wards(&self) -> impl Iterator<Item = &Ward> {
        self.wards.iter()
    }

    pub fn ward_statistics(&self) -> String {
        self.wards.statistics()
    }

    pub fn ward_summary(&self) -> WardSummary {
        self.wards.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(name: &str) -> NewPatient {
        NewPatient::new(name, 30, "Male", "Fever").unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn patient_ids_and_tokens_follow_registration_order() {
        let mut registry = Registry::new();
        for (i, name) in ["Amit", "Bala", "Charan"].into_iter().enumerate() {
            let queued_before = registry.pending_tokens().len() as u32;
            let p = registry.register_patient(patient(name));
            assert_eq!(p.id, i as u32 + 1);
            assert_eq!(p.token, queued_before + 1);
        }
        assert_eq!(registry.pending_tokens(), vec![1, 2, 3]);
    }

    #[test]
    fn next_token_drains_queue_in_order() {
        let mut registry = Registry::new();
        registry.register_patient(patient("Amit"));
        registry.register_patient(patient("Bala"));

        assert_eq!(registry.next_token(), Some(1));
        assert_eq!(registry.next_token(), Some(2));
        assert_eq!(registry.next_token(), None);

        // Calling tokens does not remove patients.
        assert_eq!(registry.patients().len(), 2);
        assert_eq!(registry.token_board().len(), 2);
    }

    #[test]
    fn token_board_lists_every_registration() {
        let mut registry = Registry::new();
        registry.register_patient(patient("Amit"));
        registry.register_patient(patient("Bala"));
        registry.next_token();

        let board: Vec<String> = registry.token_board().iter().map(|e| e.to_string()).collect();
        assert_eq!(board, vec!["Token: 1, Patient: Amit", "Token: 2, Patient: Bala"]);
    }

    #[test]
    fn sort_patients_by_name_is_idempotent() {
        let mut registry = Registry::new();
        for name in ["Charan", "Amit", "Bala"] {
            registry.register_patient(patient(name));
        }

        registry.sort_patients_by_name();
        let names = |r: &Registry| -> Vec<String> {
            r.patients().iter().map(|p| p.name.to_string()).collect()
        };
        assert_eq!(names(&registry), vec!["Amit", "Bala", "Charan"]);

        registry.sort_patients_by_name();
        assert_eq!(names(&registry), vec!["Amit", "Bala", "Charan"]);

        // Ids travel with their patients.
        assert_eq!(registry.patients()[0].id, 2);
    }

    #[test]
    fn ids_continue_after_sorting() {
        let mut registry = Registry::new();
        registry.register_patient(patient("Zed"));
        registry.register_patient(patient("Amit"));
        registry.sort_patients_by_name();

        let p = registry.register_patient(patient("Bala"));
        assert_eq!(p.id, 3);
    }

    #[test]
    fn duplicate_doctors_are_allowed() {
        let mut registry = Registry::new();
        let request = NewDoctor::new("Dr. A. Sharma", "Cardiology", "555-0101").unwrap();
        let first = registry.register_doctor(request.clone());
        let second = registry.register_doctor(request);

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(registry.doctors().len(), 2);
    }

    #[test]
    fn appointments_accept_unknown_references() {
        let mut registry = Registry::new();
        let appointment = registry.schedule_appointment(NewAppointment::new(99, 42, now()));
        assert_eq!(appointment.id, 1);
        assert_eq!(registry.appointments().len(), 1);
    }

    #[test]
    fn due_appointments_pair_with_patients() {
        let mut registry = Registry::new();
        registry.register_patient(patient("Amit"));
        registry.schedule_appointment(NewAppointment::new(1, 1, now() + Duration::hours(12)));
        registry.schedule_appointment(NewAppointment::new(1, 1, now() + Duration::hours(36)));
        registry.schedule_appointment(NewAppointment::new(5, 1, now() + Duration::hours(1)));

        let due: Vec<(u32, String)> = registry
            .due_appointments(now(), Duration::days(1))
            .map(|d| (d.appointment.id, d.patient.name.to_string()))
            .collect();
        assert_eq!(due, vec![(1, "Amit".to_string())]);

        // Restartable: same answer on a second pass.
        assert_eq!(registry.due_appointments(now(), Duration::days(1)).count(), 1);
    }

    #[test]
    fn billing_total_and_receipt() {
        let mut registry = Registry::new();
        let record = registry.record_billing(NewBilling::new(7, 500, 1200).unwrap());
        assert_eq!(record.total_cost, 1700);

        let receipt = registry.receipt(7, "Rupees").expect("patient 7 has a bill");
        let text = receipt.render();
        assert!(text.contains("Registration Charge: 500 Rupees"));
        assert!(text.contains("Medicine Cost: 1200 Rupees"));
        assert!(text.contains("Total Amount: 1700 Rupees"));
    }

    #[test]
    fn receipt_uses_first_record_for_patient() {
        let mut registry = Registry::new();
        registry.record_billing(NewBilling::new(3, 100, 50).unwrap());
        registry.record_billing(NewBilling::new(3, 0, 900).unwrap());

        assert_eq!(registry.billing_records().len(), 2);
        assert_eq!(registry.billing_for(3).map(|r| r.id), Some(1));
        assert_eq!(registry.receipt(3, "Rupees").unwrap().total_cost, 150);
        assert!(matches!(
            registry.receipt(4, "Rupees"),
            Err(ClinicError::NoBillingRecord(4))
        ));
    }

    #[test]
    fn ward_conflicts_leave_state_unchanged() {
        let mut registry = Registry::new();
        assert!(registry.add_ward(NewWard::new("ICU", 10).unwrap()));
        assert!(!registry.add_ward(NewWard::new("ICU", 5).unwrap()));

        let icu = registry.ward("ICU").unwrap();
        assert_eq!((icu.total_beds, icu.occupied_beds), (10, 0));

        assert!(!registry.assign_bed("Cardiac"));
        assert_eq!(registry.wards().count(), 1);
    }

    #[test]
    fn occupied_beds_never_exceed_total() {
        let mut registry = Registry::new();
        registry.add_ward(NewWard::new("General", 3).unwrap());

        let results: Vec<bool> = (0..5).map(|_| registry.assign_bed("General")).collect();
        assert_eq!(results, vec![true, true, true, false, false]);

        let general = registry.ward("General").unwrap();
        assert_eq!(general.occupied_beds, 3);
        assert_eq!(registry.ward_summary().free_beds, 0);
    }

    #[test]
    fn feedback_and_complaints_keep_submission_order() {
        let mut registry = Registry::new();
        registry.record_feedback(FreeText::parse("feedback", "Friendly staff").unwrap());
        registry.record_feedback(FreeText::parse("feedback", "Short wait").unwrap());
        registry.record_complaint(FreeText::parse("complaint", "Cold food").unwrap());

        let feedback: Vec<&str> = registry.feedback().iter().map(|t| t.as_str()).collect();
        assert_eq!(feedback, vec!["Friendly staff", "Short wait"]);
        assert_eq!(registry.complaints()[0].as_str(), "Cold food");
    }
}
