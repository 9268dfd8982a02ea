#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient {0} not found")]
    PatientNotFound(u64),
    #[error("clinic repository lock poisoned")]
    LockPoisoned,
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
