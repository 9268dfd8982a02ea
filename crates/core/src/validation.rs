//! Input validation utilities.
//!
//! The repository accepts whatever it is given. Anything arriving from outside the process
//! (form fields, JSON bodies) goes through these functions first. A failure names the
//! offending field so it can be shown to the user as-is.

use crate::constants::APPOINTMENT_DATE_FORMAT;
use crate::{ClinicError, ClinicResult};
use chrono::NaiveDate;
use clinic_types::{NonEmptyText, PatientAge};

/// Validated fields for creating or updating a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInput {
    pub name: NonEmptyText,
    pub age: PatientAge,
    pub phone: NonEmptyText,
}

/// Validated fields for booking an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentInput {
    pub patient_id: u64,
    pub date: NaiveDate,
    pub description: NonEmptyText,
}

impl AppointmentInput {
    /// The date in the stored `YYYY-MM-DD` form.
    pub fn date_text(&self) -> String {
        self.date.format(APPOINTMENT_DATE_FORMAT).to_string()
    }
}

/// Validates patient form fields.
///
/// # Errors
///
/// Returns `ClinicError::InvalidInput` if:
/// - `name` or `phone` is blank,
/// - `age` is not a whole number between 0 and 150.
pub fn validate_patient_input(name: &str, age: &str, phone: &str) -> ClinicResult<PatientInput> {
    let name = NonEmptyText::new(name)
        .map_err(|_| ClinicError::InvalidInput("name is required".into()))?;
    let age = PatientAge::parse(age).map_err(|e| ClinicError::InvalidInput(e.to_string()))?;
    let phone = NonEmptyText::new(phone)
        .map_err(|_| ClinicError::InvalidInput("phone is required".into()))?;

    Ok(PatientInput { name, age, phone })
}

/// Validates appointment form fields.
///
/// Patient existence is not checked here; that needs the repository.
///
/// # Errors
///
/// Returns `ClinicError::InvalidInput` if:
/// - `date` is blank or not a real `YYYY-MM-DD` calendar date,
/// - `description` is blank.
pub fn validate_appointment_input(
    patient_id: u64,
    date: &str,
    description: &str,
) -> ClinicResult<AppointmentInput> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ClinicError::InvalidInput("date is required".into()));
    }
    // chrono accepts unpadded fields, so pin the shape before parsing.
    let well_shaped = date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    let date = well_shaped
        .then(|| NaiveDate::parse_from_str(date, APPOINTMENT_DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| {
            ClinicError::InvalidInput(format!(
                "date must be a valid YYYY-MM-DD date, got '{}'",
                date
            ))
        })?;

    let description = NonEmptyText::new(description)
        .map_err(|_| ClinicError::InvalidInput("description is required".into()))?;

    Ok(AppointmentInput {
        patient_id,
        date,
        description,
    })
}
