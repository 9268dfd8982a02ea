//! Thread-safe clinic service.
//!
//! [`ClinicService`] is the handle the API layers hold. It wraps a single
//! [`ClinicRepository`] behind one `RwLock`, so operations touching both collections (the
//! cascading patient delete, booking against an existing patient) are atomic with respect to
//! every other request. Reads share the lock; writes take it exclusively. Every method hands
//! back owned snapshots, so no guard escapes this module.

use crate::config::CoreConfig;
use crate::models::{ApiAppointment, Appointment, AppointmentWithPatient, Dashboard, Patient};
use crate::repository::ClinicRepository;
use crate::{ClinicError, ClinicResult};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pure clinic data operations - no API concerns
#[derive(Clone, Debug, Default)]
pub struct ClinicService {
    repo: Arc<RwLock<ClinicRepository>>,
}

impl ClinicService {
    /// Wraps an existing repository.
    pub fn new(repo: ClinicRepository) -> Self {
        Self {
            repo: Arc::new(RwLock::new(repo)),
        }
    }

    /// Builds the service the process starts with, seeded or empty per `cfg`.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        let repo = if cfg.seed_data() {
            ClinicRepository::with_seed_data()
        } else {
            ClinicRepository::new()
        };
        tracing::info!(
            patients = repo.patient_count(),
            appointments = repo.appointment_count(),
            "clinic repository ready"
        );
        Self::new(repo)
    }

    fn read(&self) -> ClinicResult<RwLockReadGuard<'_, ClinicRepository>> {
        self.repo.read().map_err(|_| ClinicError::LockPoisoned)
    }

    fn write(&self) -> ClinicResult<RwLockWriteGuard<'_, ClinicRepository>> {
        self.repo.write().map_err(|_| ClinicError::LockPoisoned)
    }

    pub fn add_patient(
        &self,
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
    ) -> ClinicResult<Patient> {
        let patient = self.write()?.add_patient(name, age, phone);
        tracing::info!(patient_id = patient.id, "patient added");
        Ok(patient)
    }

    pub fn find_patient(&self, patient_id: u64) -> ClinicResult<Option<Patient>> {
        Ok(self.read()?.find_patient(patient_id).cloned())
    }

    pub fn get_all_patients(&self) -> ClinicResult<Vec<Patient>> {
        Ok(self.read()?.get_all_patients().to_vec())
    }

    /// Overwrites name, age, and phone. `Ok(None)` means no such patient.
    pub fn update_patient(
        &self,
        patient_id: u64,
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
    ) -> ClinicResult<Option<Patient>> {
        let updated = self
            .write()?
            .update_patient(patient_id, name, age, phone);
        if updated.is_some() {
            tracing::info!(patient_id, "patient updated");
        }
        Ok(updated)
    }

    /// Deletes a patient and its appointments. Unknown ids are a no-op.
    pub fn delete_patient(&self, patient_id: u64) -> ClinicResult<()> {
        let (removed, appointments_removed) = self.write()?.delete_patient(patient_id);
        if removed {
            tracing::info!(patient_id, appointments_removed, "patient deleted");
        } else {
            tracing::debug!(patient_id, "delete requested for unknown patient");
        }
        Ok(())
    }

    /// Appends an appointment without checking the patient exists.
    ///
    /// Prefer [`ClinicService::book_appointment`] for anything user-facing.
    pub fn add_appointment(
        &self,
        patient_id: u64,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> ClinicResult<Appointment> {
        let appointment = self.write()?.add_appointment(patient_id, date, description);
        tracing::info!(
            appointment_id = appointment.id,
            patient_id,
            "appointment added"
        );
        Ok(appointment)
    }

    /// Appends an appointment for a patient that must exist.
    ///
    /// The existence check and the insert happen under the same write lock, so a concurrent
    /// delete cannot leave the new appointment dangling.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::PatientNotFound` if no patient has `patient_id`; nothing is
    /// added in that case.
    pub fn book_appointment(
        &self,
        patient_id: u64,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> ClinicResult<Appointment> {
        let mut repo = self.write()?;
        if repo.find_patient(patient_id).is_none() {
            return Err(ClinicError::PatientNotFound(patient_id));
        }
        let appointment = repo.add_appointment(patient_id, date, description);
        drop(repo);

        tracing::info!(
            appointment_id = appointment.id,
            patient_id,
            "appointment booked"
        );
        Ok(appointment)
    }

    pub fn get_all_appointments(&self) -> ClinicResult<Vec<Appointment>> {
        Ok(self.read()?.get_all_appointments().to_vec())
    }

    pub fn appointments_with_patient_names(&self) -> ClinicResult<Vec<AppointmentWithPatient>> {
        Ok(self.read()?.appointments_with_patient_names())
    }

    /// See [`ClinicRepository::search_appointments`].
    pub fn search_appointments(
        &self,
        query: Option<&str>,
        date: Option<&str>,
    ) -> ClinicResult<Vec<AppointmentWithPatient>> {
        Ok(self.read()?.search_appointments(query, date))
    }

    pub fn get_appointments_as_api_format(&self) -> ClinicResult<Vec<ApiAppointment>> {
        Ok(self.read()?.get_appointments_as_api_format())
    }

    /// All patients and enriched appointments, read under one lock.
    pub fn dashboard(&self) -> ClinicResult<Dashboard> {
        let repo = self.read()?;
        Ok(Dashboard {
            patients: repo.get_all_patients().to_vec(),
            appointments: repo.appointments_with_patient_names(),
        })
    }
}
