//! Front-desk shell commands.
//!
//! Each input line is split with shell quoting rules and parsed with clap into a
//! [`ShellCommand`]. A [`Session`] owns the registry for the lifetime of the shell
//! and turns commands into plain-text output.

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use clinic_core::constants::{
    DOCTOR_NAME_SUGGESTIONS, GENDER_OPTIONS, SPECIALIZATION_SUGGESTIONS,
};
use clinic_core::validation::{parse_appointment_time, parse_whole_number};
use clinic_core::{
    AdminGate, ClinicConfig, ClinicError, FreeText, NewAppointment, NewBilling, NewDoctor,
    NewPatient, NewWard, Registry,
};

use crate::render::{lines_or, numbered_or};

#[derive(Parser, Debug)]
#[command(name = "clinic", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Unlock the front desk
    Login { admin_id: String, password: String },
    /// Register a patient and issue a token
    AddPatient {
        name: String,
        #[arg(allow_hyphen_values = true)]
        age: String,
        gender: String,
        ailment: String,
    },
    /// Register a doctor
    AddDoctor {
        name: String,
        specialization: String,
        contact: String,
    },
    /// Schedule an appointment (time as "YYYY-MM-DD HH:MM")
    Schedule {
        patient_id: String,
        doctor_id: String,
        time: String,
    },
    /// Submit feedback
    Feedback {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Submit a complaint
    Complaint {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Record a bill for a patient
    Bill {
        patient_id: String,
        #[arg(allow_hyphen_values = true)]
        registration_charge: String,
        #[arg(allow_hyphen_values = true)]
        medicine_cost: String,
    },
    /// Print the receipt for a patient's first bill
    Receipt { patient_id: String },
    /// Add a ward with a number of beds
    AddWard {
        name: String,
        #[arg(allow_hyphen_values = true)]
        total_beds: String,
    },
    /// Occupy one bed in a ward
    AssignBed { ward: String },
    /// Call the next walk-in token
    NextToken,
    /// Show every patient's token
    Tokens,
    /// List patients
    Patients,
    /// Sort patients by name
    SortPatients,
    /// List doctors
    Doctors,
    /// List appointments
    Appointments,
    /// List wards
    Wards,
    /// Show ward statistics
    WardStats,
    /// Show reminders for due appointments
    Reminders {
        /// Reference time instead of now ("YYYY-MM-DD HH:MM")
        #[arg(long)]
        at: Option<String>,
        /// Look-ahead window in hours instead of the configured horizon
        #[arg(long)]
        hours: Option<String>,
    },
    /// List submitted feedback
    Feedbacks,
    /// List submitted complaints
    Complaints,
    /// Show suggested form values
    Presets,
    /// Show support contact details
    Support,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

pub struct Session {
    registry: Registry,
    config: ClinicConfig,
    gate: AdminGate,
    logged_in: bool,
}

impl Session {
    pub fn new(config: ClinicConfig) -> Self {
        let gate = AdminGate::new(config.admin().clone());
        Self {
            registry: Registry::new(),
            config,
            gate,
            logged_in: false,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn login(&mut self, admin_id: &str, password: &str) -> Result<(), ClinicError> {
        self.gate.verify(admin_id, password)?;
        self.logged_in = true;
        Ok(())
    }

    /// Parses and runs one line of input. Blank lines produce empty output.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<Outcome> {
        let words = shlex::split(line).ok_or_else(|| anyhow!("unbalanced quotes in input"))?;
        if words.is_empty() {
            return Ok(Outcome::Output(String::new()));
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => match err.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    return Ok(Outcome::Output(err.render().to_string()));
                }
                _ => bail!(err.render().to_string()),
            },
        };
        self.execute(parsed.command)
    }

    pub fn execute(&mut self, command: ShellCommand) -> anyhow::Result<Outcome> {
        let open = matches!(command, ShellCommand::Login { .. } | ShellCommand::Quit);
        if !open && !self.logged_in {
            bail!("please log in first: login <admin_id> <password>");
        }

        let output = match command {
            ShellCommand::Login { admin_id, password } => {
                self.login(&admin_id, &password)?;
                "Login successful.".into()
            }
            ShellCommand::Quit => return Ok(Outcome::Quit),
            ShellCommand::AddPatient {
                name,
                age,
                gender,
                ailment,
            } => {
                let patient = self
                    .registry
                    .register_patient(NewPatient::parse(&name, &age, &gender, &ailment)?);
                format!("Added patient {} with token {}.", patient, patient.token)
            }
            ShellCommand::AddDoctor {
                name,
                specialization,
                contact,
            } => {
                let doctor = self
                    .registry
                    .register_doctor(NewDoctor::new(&name, &specialization, &contact)?);
                format!("Added doctor {}.", doctor)
            }
            ShellCommand::Schedule {
                patient_id,
                doctor_id,
                time,
            } => {
                let request = NewAppointment::parse(&patient_id, &doctor_id, &time)?;
                self.registry.schedule_appointment(request);
                "Appointment scheduled successfully.".into()
            }
            ShellCommand::Feedback { text } => {
                self.registry
                    .record_feedback(FreeText::parse("feedback", &text.join(" "))?);
                "Feedback submitted successfully.".into()
            }
            ShellCommand::Complaint { text } => {
                self.registry
                    .record_complaint(FreeText::parse("complaint", &text.join(" "))?);
                "Complaint submitted successfully.".into()
            }
            ShellCommand::Bill {
                patient_id,
                registration_charge,
                medicine_cost,
            } => {
                let request = NewBilling::parse(&patient_id, &registration_charge, &medicine_cost)?;
                self.registry.record_billing(request);
                "Billing added successfully.".into()
            }
            ShellCommand::Receipt { patient_id } => {
                let patient_id = parse_whole_number("patient_id", &patient_id)?;
                self.registry
                    .receipt(patient_id, self.config.currency_label())?
                    .render()
                    .trim_end()
                    .to_string()
            }
            ShellCommand::AddWard { name, total_beds } => {
                let request = NewWard::parse(&name, &total_beds)?;
                let ward_name = request.name.to_string();
                if !self.registry.add_ward(request) {
                    return Err(ClinicError::WardExists(ward_name).into());
                }
                "Ward added successfully.".into()
            }
            ShellCommand::AssignBed { ward } => {
                if !self.registry.assign_bed(&ward) {
                    return Err(ClinicError::WardUnavailable(ward).into());
                }
                format!("Bed assigned in ward {}.", ward.trim())
            }
            ShellCommand::NextToken => match self.registry.next_token() {
                Some(token) => format!("Next token to be called: {token}"),
                None => "No tokens available to call.".into(),
            },
            ShellCommand::Tokens => lines_or(self.registry.token_board(), "No tokens issued."),
            ShellCommand::Patients => lines_or(self.registry.patients(), "No patients found."),
            ShellCommand::SortPatients => {
                self.registry.sort_patients_by_name();
                lines_or(self.registry.patients(), "No patients found.")
            }
            ShellCommand::Doctors => lines_or(self.registry.doctors(), "No doctors found."),
            ShellCommand::Appointments => {
                lines_or(self.registry.appointments(), "No appointments found.")
            }
            ShellCommand::Wards | ShellCommand::WardStats => self.registry.ward_statistics(),
            ShellCommand::Reminders { at, hours } => self.reminders(at, hours)?,
            ShellCommand::Feedbacks => numbered_or(self.registry.feedback(), "No feedback yet."),
            ShellCommand::Complaints => {
                numbered_or(self.registry.complaints(), "No complaints yet.")
            }
            ShellCommand::Presets => format!(
                "Genders: {}\nDoctors: {}\nSpecializations: {}",
                GENDER_OPTIONS.join(", "),
                DOCTOR_NAME_SUGGESTIONS.join(", "),
                SPECIALIZATION_SUGGESTIONS.join(", ")
            ),
            ShellCommand::Support => self.config.support_message(),
        };

        Ok(Outcome::Output(output))
    }

    fn reminders(&self, at: Option<String>, hours: Option<String>) -> anyhow::Result<String> {
        let as_of: NaiveDateTime = match at {
            Some(at) => parse_appointment_time(&at)?,
            None => Local::now().naive_local(),
        };
        let horizon = match hours {
            Some(hours) => {
                let hours: i64 = parse_whole_number("hours", &hours)?;
                chrono::Duration::try_hours(hours).context("reminder window is too large")?
            }
            None => self.config.reminder_horizon(),
        };

        let messages: Vec<String> = self
            .registry
            .due_appointments(as_of, horizon)
            .map(|due| due.reminder_message())
            .collect();
        Ok(lines_or(messages, "No appointments due."))
    }
}
