use crate::dto::HealthRes;

/// Simple health service shared by the API surfaces
///
/// Provides a standardised way to check the health status of the clinic service.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Clinic service is alive".into(),
        }
    }
}
