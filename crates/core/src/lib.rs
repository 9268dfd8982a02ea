//! # Clinic Core
//!
//! Core business logic for the clinic record service.
//!
//! This crate contains pure data operations over in-memory state:
//! - Patient and appointment records ([`models`])
//! - The ordered, id-assigning store ([`repository`])
//! - A lock-guarded handle for concurrent callers ([`service`])
//! - Input validation for anything arriving from outside ([`validation`])
//!
//! **No API concerns**: HTTP servers, routing, and wire request types belong in `api-rest`
//! or `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};
pub use models::{ApiAppointment, Appointment, AppointmentWithPatient, Dashboard, Patient};
pub use repository::ClinicRepository;
pub use service::ClinicService;

// Re-export validated value types so callers don't need a direct dependency.
pub use clinic_types::{AgeError, NonEmptyText, PatientAge, TextError};
