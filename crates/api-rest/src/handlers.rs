//! HTTP handlers over the shared registry.
//!
//! Every handler takes the registry lock for the length of one registry call, so
//! each request is applied as a single step.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use clinic_core::validation::{parse_appointment_time, parse_whole_number};
use clinic_core::{
    Appointment, BillingRecord, ClinicError, Doctor, FreeText, NewAppointment, NewBilling,
    NewDoctor, NewPatient, NewWard, Patient, Reminder, Ward,
};

use crate::error::{ApiError, AppJson};
use crate::types::*;
use crate::AppState;

type Created<T> = (StatusCode, Json<T>);

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Open to unauthenticated callers so load balancers can probe it.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Clinic front desk REST API is alive".into(),
    })
}

// ----------------------------------------------------------------------
// Patients
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Patients in list order", body = [Patient])
    )
)]
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    let registry = state.registry.read().await;
    Json(registry.patients().to_vec())
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient registered and token issued", body = Patient),
        (status = 400, description = "Invalid patient details", body = crate::error::ErrorRes)
    )
)]
/// Register a patient
///
/// Assigns the next patient id and issues the next walk-in token.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePatientReq>,
) -> Result<Created<Patient>, ApiError> {
    let request = NewPatient::new(
        &req.name,
        req.age.parse("age")?,
        &req.gender,
        &req.ailment,
    )?;
    let patient = state.registry.write().await.register_patient(request);
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    post,
    path = "/patients/sort",
    responses(
        (status = 200, description = "Patients sorted by name", body = [Patient])
    )
)]
pub async fn sort_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    let mut registry = state.registry.write().await;
    registry.sort_patients_by_name();
    Json(registry.patients().to_vec())
}

// ----------------------------------------------------------------------
// Doctors and appointments
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "Registered doctors", body = [Doctor])
    )
)]
pub async fn list_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    let registry = state.registry.read().await;
    Json(registry.doctors().to_vec())
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = CreateDoctorReq,
    responses(
        (status = 201, description = "Doctor registered", body = Doctor),
        (status = 400, description = "Invalid doctor details", body = crate::error::ErrorRes)
    )
)]
pub async fn create_doctor(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateDoctorReq>,
) -> Result<Created<Doctor>, ApiError> {
    let request = NewDoctor::new(&req.name, &req.specialization, &req.contact)?;
    let doctor = state.registry.write().await.register_doctor(request);
    Ok((StatusCode::CREATED, Json(doctor)))
}

#[utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "Scheduled appointments", body = [Appointment])
    )
)]
pub async fn list_appointments(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    let registry = state.registry.read().await;
    Json(registry.appointments().to_vec())
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment scheduled", body = Appointment),
        (status = 400, description = "Invalid ids or appointment time", body = crate::error::ErrorRes)
    )
)]
/// Schedule an appointment
///
/// Patient and doctor ids are not checked against the registry.
pub async fn create_appointment(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateAppointmentReq>,
) -> Result<Created<Appointment>, ApiError> {
    let request = NewAppointment::new(
        req.patient_id.parse("patient_id")?,
        req.doctor_id.parse("doctor_id")?,
        parse_appointment_time(&req.appointment_time)?,
    );
    let appointment = state.registry.write().await.schedule_appointment(request);
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    get,
    path = "/appointments/due",
    params(DueQuery),
    responses(
        (status = 200, description = "Reminders for due appointments", body = [Reminder]),
        (status = 400, description = "Invalid reference time or window", body = crate::error::ErrorRes)
    )
)]
/// Reminders for appointments due within the window
///
/// Appointments whose patient id matches no registered patient are left out.
#[axum::debug_handler]
pub async fn due_appointments(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<Reminder>>, ApiError> {
    let as_of = match query.at {
        Some(at) => parse_appointment_time(&at)?,
        None => Local::now().naive_local(),
    };
    let horizon = match query.hours {
        Some(hours) => {
            let hours: u32 = parse_whole_number("hours", &hours)?;
            chrono::Duration::hours(i64::from(hours))
        }
        None => state.cfg.reminder_horizon(),
    };

    let registry = state.registry.read().await;
    let reminders = registry
        .due_appointments(as_of, horizon)
        .map(|due| due.to_reminder())
        .collect();
    Ok(Json(reminders))
}

// ----------------------------------------------------------------------
// Feedback and complaints
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/feedback",
    responses(
        (status = 200, description = "Feedback in submission order", body = TextListRes)
    )
)]
pub async fn list_feedback(State(state): State<AppState>) -> Json<TextListRes> {
    let registry = state.registry.read().await;
    Json(TextListRes {
        items: registry.feedback().iter().map(|t| t.to_string()).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = TextReq,
    responses(
        (status = 201, description = "Feedback submitted"),
        (status = 400, description = "Empty feedback", body = crate::error::ErrorRes)
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    AppJson(req): AppJson<TextReq>,
) -> Result<StatusCode, ApiError> {
    let text = FreeText::parse("feedback", &req.text)?;
    state.registry.write().await.record_feedback(text);
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/complaints",
    responses(
        (status = 200, description = "Complaints in submission order", body = TextListRes)
    )
)]
pub async fn list_complaints(State(state): State<AppState>) -> Json<TextListRes> {
    let registry = state.registry.read().await;
    Json(TextListRes {
        items: registry.complaints().iter().map(|t| t.to_string()).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/complaints",
    request_body = TextReq,
    responses(
        (status = 201, description = "Complaint submitted"),
        (status = 400, description = "Empty complaint", body = crate::error::ErrorRes)
    )
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    AppJson(req): AppJson<TextReq>,
) -> Result<StatusCode, ApiError> {
    let text = FreeText::parse("complaint", &req.text)?;
    state.registry.write().await.record_complaint(text);
    Ok(StatusCode::CREATED)
}

// ----------------------------------------------------------------------
// Billing
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/billing",
    responses(
        (status = 200, description = "All billing records", body = [BillingRecord])
    )
)]
pub async fn list_billing(State(state): State<AppState>) -> Json<Vec<BillingRecord>> {
    let registry = state.registry.read().await;
    Json(registry.billing_records().to_vec())
}

#[utoipa::path(
    post,
    path = "/billing",
    request_body = CreateBillingReq,
    responses(
        (status = 201, description = "Billing recorded", body = BillingRecord),
        (status = 400, description = "Invalid billing details", body = crate::error::ErrorRes)
    )
)]
pub async fn create_billing(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateBillingReq>,
) -> Result<Created<BillingRecord>, ApiError> {
    let request = NewBilling::new(
        req.patient_id.parse("patient_id")?,
        req.registration_charge.parse("registration_charge")?,
        req.medicine_cost.parse("medicine_cost")?,
    )?;
    let record = state.registry.write().await.record_billing(request);
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/billing/{patient_id}/receipt",
    params(("patient_id" = u32, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Receipt for the patient's first bill", body = ReceiptRes),
        (status = 404, description = "No billing record for the patient", body = crate::error::ErrorRes)
    )
)]
pub async fn receipt(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ReceiptRes>, ApiError> {
    let patient_id: u32 = parse_whole_number("patient_id", &patient_id)?;
    let receipt = state
        .registry
        .read()
        .await
        .receipt(patient_id, state.cfg.currency_label())?;
    let text = receipt.render();
    Ok(Json(ReceiptRes { receipt, text }))
}

// ----------------------------------------------------------------------
// Wards
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/wards",
    responses(
        (status = 200, description = "Wards in unspecified order", body = [Ward])
    )
)]
pub async fn list_wards(State(state): State<AppState>) -> Json<Vec<Ward>> {
    let registry = state.registry.read().await;
    Json(registry.wards().cloned().collect())
}

#[utoipa::path(
    post,
    path = "/wards",
    request_body = CreateWardReq,
    responses(
        (status = 201, description = "Ward added", body = Ward),
        (status = 400, description = "Invalid ward details", body = crate::error::ErrorRes),
        (status = 409, description = "Ward already exists", body = crate::error::ErrorRes)
    )
)]
pub async fn create_ward(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateWardReq>,
) -> Result<Created<Ward>, ApiError> {
    let request = NewWard::new(&req.name, req.total_beds.parse("total_beds")?)?;
    let ward = Ward {
        name: request.name.clone(),
        total_beds: request.total_beds,
        occupied_beds: 0,
    };

    if !state.registry.write().await.add_ward(request) {
        return Err(ClinicError::WardExists(ward.name.into_inner()).into());
    }
    Ok((StatusCode::CREATED, Json(ward)))
}

#[utoipa::path(
    post,
    path = "/wards/{name}/beds",
    params(("name" = String, Path, description = "Ward name")),
    responses(
        (status = 200, description = "Bed assigned", body = AssignBedRes),
        (status = 409, description = "Ward is full or does not exist", body = crate::error::ErrorRes)
    )
)]
pub async fn assign_bed(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AssignBedRes>, ApiError> {
    let mut registry = state.registry.write().await;
    if !registry.assign_bed(&name) {
        return Err(ClinicError::WardUnavailable(name).into());
    }
    let ward = registry
        .ward(&name)
        .cloned()
        .ok_or_else(|| ClinicError::WardUnavailable(name.clone()))?;
    Ok(Json(AssignBedRes { ward }))
}

#[utoipa::path(
    get,
    path = "/wards/statistics",
    responses(
        (status = 200, description = "Bed totals and per-ward lines", body = WardStatisticsRes)
    )
)]
pub async fn ward_statistics(State(state): State<AppState>) -> Json<WardStatisticsRes> {
    let registry = state.registry.read().await;
    Json(WardStatisticsRes {
        summary: registry.ward_summary(),
        text: registry.ward_statistics(),
    })
}

// ----------------------------------------------------------------------
// Tokens and support
// ----------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/tokens",
    responses(
        (status = 200, description = "Pending tokens and the token board", body = TokensRes)
    )
)]
pub async fn list_tokens(State(state): State<AppState>) -> Json<TokensRes> {
    let registry = state.registry.read().await;
    Json(TokensRes {
        pending: registry.pending_tokens(),
        board: registry.token_board(),
    })
}

#[utoipa::path(
    post,
    path = "/tokens/next",
    responses(
        (status = 200, description = "Next token, or none when the queue is empty", body = NextTokenRes)
    )
)]
pub async fn next_token(State(state): State<AppState>) -> Json<NextTokenRes> {
    let token = state.registry.write().await.next_token();
    let message = match token {
        Some(token) => format!("Next token to be called: {token}"),
        None => "No tokens available to call.".to_string(),
    };
    Json(NextTokenRes { token, message })
}

#[utoipa::path(
    get,
    path = "/support",
    responses(
        (status = 200, description = "Support contact details", body = SupportRes)
    )
)]
pub async fn support(State(state): State<AppState>) -> Json<SupportRes> {
    Json(SupportRes {
        message: state.cfg.support_message(),
    })
}
