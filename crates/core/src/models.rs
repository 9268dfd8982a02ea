//! Clinic data model.
//!
//! Records are plain data. Ids are assigned by [`ClinicRepository`](crate::ClinicRepository)
//! and never reused, so the only way to get a record is through a repository factory.
//! Serialised field names are the wire format of the JSON API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered clinic patient.
///
/// `age` holds decimal text. Inputs that went through
/// [`validate_patient_input`](crate::validation::validate_patient_input) are guaranteed to be
/// a whole number of years in `0..=150`, but the repository itself stores whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub age: String,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl Patient {
    pub(crate) fn new(id: u64, name: String, age: String, phone: String) -> Self {
        Self {
            id,
            name,
            age,
            phone,
            notes: String::new(),
        }
    }
}

/// A booked appointment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: u64,
    /// Id of the patient this appointment belongs to. May dangle.
    pub patient_id: u64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub description: String,
}

impl Appointment {
    /// Projects the appointment onto the JSON API shape.
    pub fn to_api(&self) -> ApiAppointment {
        ApiAppointment {
            id: self.id,
            patient_id: self.patient_id,
            date: self.date.clone(),
            description: self.description.clone(),
        }
    }
}

/// An appointment together with the resolved name of its patient.
///
/// `patient_name` is [`UNKNOWN_PATIENT_NAME`](crate::constants::UNKNOWN_PATIENT_NAME) when
/// the patient id does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentWithPatient {
    pub id: u64,
    pub patient_id: u64,
    pub patient_name: String,
    pub date: String,
    pub description: String,
}

/// Appointment shape served by `GET /api/appointments`.
///
/// Structurally the same as [`Appointment`] today; kept separate so the API shape can move
/// without touching the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiAppointment {
    pub id: u64,
    pub patient_id: u64,
    pub date: String,
    pub description: String,
}

/// Everything the dashboard shows, taken from one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub patients: Vec<Patient>,
    pub appointments: Vec<AppointmentWithPatient>,
}
