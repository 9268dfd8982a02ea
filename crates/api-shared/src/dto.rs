//! Wire types for the clinic APIs.
//!
//! Request bodies are deliberately lenient: missing text fields deserialise as empty
//! strings so that validation in `clinic-core` reports them by name, instead of the body
//! being rejected wholesale by the extractor.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body for creating or updating a patient.
///
/// `age` may be sent as a JSON string or integer. Fractional numbers are rejected at
/// deserialisation rather than rounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "30")]
    pub age: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentReq {
    pub patient_id: u64,
    #[serde(default)]
    #[schema(example = "2025-10-22")]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// Query string for `GET /api/appointments/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchAppointmentsQuery {
    /// Case-insensitive substring of the patient name
    pub q: Option<String>,
    /// Exact appointment date, `YYYY-MM-DD`
    pub date: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Unsigned(n) => n.to_string(),
        StringOrNumber::Signed(n) => n.to_string(),
    })
}
