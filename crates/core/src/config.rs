//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services,
//! so nothing reads process-wide environment variables while handling a request.

use crate::{ClinicError, ClinicResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    seed_data: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(seed_data: bool) -> Self {
        Self { seed_data }
    }

    /// Whether the repository starts with the demo patients and appointment.
    pub fn seed_data(&self) -> bool {
        self.seed_data
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Parse the seed-data switch from an optional string value.
///
/// If `value` is `None` or empty/whitespace, seeding is on. Accepts the usual boolean
/// spellings (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`), case-insensitively.
pub fn seed_data_from_env_value(value: Option<String>) -> ClinicResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(true),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(ClinicError::InvalidInput(format!(
            "CLINIC_SEED_DATA must be a boolean, got '{}'",
            other
        ))),
    }
}
