//! Constants used throughout the clinic core crate.
//!
//! Seed records and display placeholders live here so the repository, the service, and
//! the tests agree on them.

/// Patient name shown for appointments whose patient no longer exists.
pub const UNKNOWN_PATIENT_NAME: &str = "Unknown";

/// Date format expected for appointment dates (`YYYY-MM-DD`).
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Patients added to a freshly seeded repository, as `(name, age, phone)`.
pub const SEED_PATIENTS: &[(&str, &str, &str)] = &[
    ("Ahmed Ali", "30", "091-111-222"),
    ("Sara Omar", "25", "092-222-333"),
];

/// Appointments added to a freshly seeded repository, as `(patient_id, date, description)`.
pub const SEED_APPOINTMENTS: &[(u64, &str, &str)] = &[(1, "2025-10-22", "General Checkup")];
