//! In-memory clinic repository.
//!
//! [`ClinicRepository`] owns two ordered collections, patients and appointments, and the id
//! counters for each. Lookups are linear scans; the collections are small and insertion
//! order is part of the contract.
//!
//! ## Invariants
//!
//! - Ids start at 1, increase by one per creation, and are never reused after deletion.
//! - Both collections keep insertion order.
//! - Deleting a patient removes every appointment that references it. Nothing else enforces
//!   referential integrity: [`ClinicRepository::add_appointment`] accepts any patient id and
//!   enriched views fall back to [`UNKNOWN_PATIENT_NAME`].
//!
//! The repository is not synchronised. Shared access goes through
//! [`ClinicService`](crate::ClinicService).

use crate::constants::{SEED_APPOINTMENTS, SEED_PATIENTS, UNKNOWN_PATIENT_NAME};
use crate::models::{ApiAppointment, Appointment, AppointmentWithPatient, Patient};

/// Store for all patient and appointment state.
#[derive(Debug, Clone)]
pub struct ClinicRepository {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    next_patient_id: u64,
    next_appointment_id: u64,
}

impl Default for ClinicRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ClinicRepository {
    /// Creates an empty repository. The first ids handed out are 1.
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            appointments: Vec::new(),
            next_patient_id: 1,
            next_appointment_id: 1,
        }
    }

    /// Creates a repository holding the demo patients and appointment.
    ///
    /// See [`SEED_PATIENTS`] and [`SEED_APPOINTMENTS`].
    pub fn with_seed_data() -> Self {
        let mut repo = Self::new();
        for (name, age, phone) in SEED_PATIENTS {
            repo.add_patient(*name, *age, *phone);
        }
        for (patient_id, date, description) in SEED_APPOINTMENTS {
            repo.add_appointment(*patient_id, *date, *description);
        }
        repo
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    // ------------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------------

    /// Adds a patient with the next free id and returns a copy of the new record.
    ///
    /// No validation happens here; see [`crate::validation`].
    pub fn add_patient(
        &mut self,
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
    ) -> Patient {
        let patient = Patient::new(self.next_patient_id, name.into(), age.into(), phone.into());
        self.next_patient_id += 1;
        self.patients.push(patient.clone());
        patient
    }

    /// Finds a patient by id.
    pub fn find_patient(&self, patient_id: u64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == patient_id)
    }

    /// All patients, in insertion order.
    pub fn get_all_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Overwrites name, age, and phone of an existing patient.
    ///
    /// `id` and `notes` are left alone. Returns `None`, changing nothing, if no patient has
    /// `patient_id`.
    pub fn update_patient(
        &mut self,
        patient_id: u64,
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
    ) -> Option<Patient> {
        let patient = self.patients.iter_mut().find(|p| p.id == patient_id)?;
        patient.name = name.into();
        patient.age = age.into();
        patient.phone = phone.into();
        Some(patient.clone())
    }

    /// Deletes a patient and every appointment referencing it.
    ///
    /// Unknown ids are a no-op. Returns whether a patient was removed and how many
    /// appointments went with it.
    pub fn delete_patient(&mut self, patient_id: u64) -> (bool, usize) {
        let patients_before = self.patients.len();
        self.patients.retain(|p| p.id != patient_id);

        let appointments_before = self.appointments.len();
        self.appointments.retain(|a| a.patient_id != patient_id);

        (
            self.patients.len() != patients_before,
            appointments_before - self.appointments.len(),
        )
    }

    // ------------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------------

    /// Adds an appointment with the next free id and returns a copy of it.
    ///
    /// `patient_id` is not checked. Callers that need the patient to exist should use
    /// [`ClinicService::book_appointment`](crate::ClinicService::book_appointment).
    pub fn add_appointment(
        &mut self,
        patient_id: u64,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Appointment {
        let appointment = Appointment {
            id: self.next_appointment_id,
            patient_id,
            date: date.into(),
            description: description.into(),
        };
        self.next_appointment_id += 1;
        self.appointments.push(appointment.clone());
        appointment
    }

    /// All appointments, in insertion order.
    pub fn get_all_appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Every appointment with its patient name resolved.
    pub fn appointments_with_patient_names(&self) -> Vec<AppointmentWithPatient> {
        self.enrich_appointments(&self.appointments)
    }

    /// Resolves patient names for the given appointments, keeping their order.
    pub fn enrich_appointments<'a>(
        &self,
        appointments: impl IntoIterator<Item = &'a Appointment>,
    ) -> Vec<AppointmentWithPatient> {
        appointments
            .into_iter()
            .map(|a| AppointmentWithPatient {
                id: a.id,
                patient_id: a.patient_id,
                patient_name: self
                    .patient_name(a.patient_id)
                    .unwrap_or(UNKNOWN_PATIENT_NAME)
                    .to_owned(),
                date: a.date.clone(),
                description: a.description.clone(),
            })
            .collect()
    }

    /// Filters appointments by patient name and/or exact date.
    ///
    /// - `date`: keep appointments whose date string equals it exactly.
    /// - `query`: keep appointments whose patient name contains it, ignoring case.
    ///   Appointments whose patient cannot be resolved never match a query.
    ///
    /// `None` or an empty string disables that filter. Both filters must hold when both are
    /// given.
    pub fn search_appointments(
        &self,
        query: Option<&str>,
        date: Option<&str>,
    ) -> Vec<AppointmentWithPatient> {
        let query = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
        let date = date.filter(|d| !d.is_empty());

        let matches = self
            .appointments
            .iter()
            .filter(|a| date.is_none_or(|d| a.date == d))
            .filter(|a| match &query {
                None => true,
                Some(q) => self
                    .patient_name(a.patient_id)
                    .is_some_and(|name| name.to_lowercase().contains(q.as_str())),
            });

        self.enrich_appointments(matches)
    }

    /// Appointments in the JSON API shape.
    pub fn get_appointments_as_api_format(&self) -> Vec<ApiAppointment> {
        self.appointments.iter().map(Appointment::to_api).collect()
    }

    fn patient_name(&self, patient_id: u64) -> Option<&str> {
        self.find_patient(patient_id).map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with_patient() -> ClinicRepository {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Test Patient", "30", "111");
        repo
    }

    fn ids(records: &[AppointmentWithPatient]) -> Vec<u64> {
        records.iter().map(|a| a.id).collect()
    }

    // ------------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_patient_creates_patient_with_correct_data() {
        let mut repo = ClinicRepository::new();
        let patient = repo.add_patient("John Doe", "30", "091-123-456");

        assert_eq!(patient.id, 1);
        assert_eq!(patient.name, "John Doe");
        assert_eq!(patient.age, "30");
        assert_eq!(patient.phone, "091-123-456");
        assert_eq!(patient.notes, "");
    }

    #[test]
    fn test_add_patient_ids_follow_call_order() {
        let mut repo = ClinicRepository::new();
        let ids: Vec<u64> = (0..5)
            .map(|i| repo.add_patient(format!("Patient {}", i), "25", "111").id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("First", "25", "111");
        let second = repo.add_patient("Second", "30", "222");
        repo.delete_patient(second.id);

        let third = repo.add_patient("Third", "35", "333");
        assert_eq!(third.id, 3, "deleted id 2 must not be handed out again");

        repo.add_appointment(1, "2025-12-25", "A");
        repo.delete_patient(1);
        let next = repo.add_appointment(3, "2025-12-26", "B");
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_find_patient_returns_correct_patient() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Alice", "28", "111");
        repo.add_patient("Bob", "35", "222");

        let found = repo.find_patient(2).expect("Bob should exist");
        assert_eq!(found.name, "Bob");
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_find_patient_returns_none_for_unknown_or_deleted_id() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Alice", "28", "111");

        assert!(repo.find_patient(999).is_none());
        assert!(repo.find_patient(0).is_none());

        repo.delete_patient(1);
        assert!(repo.find_patient(1).is_none());
    }

    #[test]
    fn test_get_all_patients_returns_all_in_order() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Patient 1", "25", "111");
        repo.add_patient("Patient 2", "30", "222");

        let patients = repo.get_all_patients();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].name, "Patient 1");
        assert_eq!(patients[1].name, "Patient 2");
    }

    #[test]
    fn test_update_patient_overwrites_fields_and_keeps_id() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("John Doe", "30", "091");

        let updated = repo
            .update_patient(1, "Jane Doe", "31", "555")
            .expect("patient 1 should exist");
        assert_eq!(updated.name, "Jane Doe");

        let found = repo.find_patient(1).expect("patient 1 should still exist");
        assert_eq!(found.id, 1);
        assert_eq!(found.name, "Jane Doe");
        assert_eq!(found.age, "31");
        assert_eq!(found.phone, "555");
        assert_eq!(found.notes, "");
    }

    #[test]
    fn test_update_unknown_patient_returns_none_and_changes_nothing() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Alice", "28", "111");
        let before = repo.get_all_patients().to_vec();

        assert!(repo.update_patient(999, "Name", "30", "111").is_none());
        assert_eq!(repo.get_all_patients(), before.as_slice());
    }

    #[test]
    fn test_delete_patient_removes_only_that_patient() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("To Delete", "25", "111");
        repo.add_patient("To Keep", "30", "222");

        assert_eq!(repo.delete_patient(1), (true, 0));

        let patients = repo.get_all_patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "To Keep");
    }

    #[test]
    fn test_delete_patient_twice_is_noop() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Alice", "28", "111");
        repo.add_patient("Bob", "35", "222");
        repo.add_appointment(2, "2025-12-25", "Checkup");

        repo.delete_patient(1);
        let patients = repo.get_all_patients().to_vec();
        let appointments = repo.get_all_appointments().to_vec();

        assert_eq!(repo.delete_patient(1), (false, 0));
        assert_eq!(repo.get_all_patients(), patients.as_slice());
        assert_eq!(repo.get_all_appointments(), appointments.as_slice());
    }

    #[test]
    fn test_empty_repository_returns_empty_lists() {
        let repo = ClinicRepository::new();
        assert!(repo.get_all_patients().is_empty());
        assert!(repo.get_all_appointments().is_empty());
        assert!(repo.appointments_with_patient_names().is_empty());
        assert!(repo.get_appointments_as_api_format().is_empty());
    }

    // ------------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_appointment_creates_appointment() {
        let mut repo = repo_with_patient();
        let appointment = repo.add_appointment(1, "2025-12-25", "Checkup");

        assert_eq!(appointment.id, 1);
        assert_eq!(appointment.patient_id, 1);
        assert_eq!(appointment.date, "2025-12-25");
        assert_eq!(appointment.description, "Checkup");
    }

    #[test]
    fn test_add_appointment_accepts_dangling_patient_id() {
        let mut repo = repo_with_patient();
        let appointment = repo.add_appointment(42, "2025-12-25", "Orphan");

        assert_eq!(appointment.patient_id, 42);
        assert_eq!(repo.appointment_count(), 1);
    }

    #[test]
    fn test_get_all_appointments_returns_all() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Checkup 1");
        repo.add_appointment(1, "2025-12-26", "Checkup 2");

        let appointments = repo.get_all_appointments();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[0].description, "Checkup 1");
        assert_eq!(appointments[1].description, "Checkup 2");
    }

    #[test]
    fn test_appointments_with_patient_names_enriches_data() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Checkup");

        let enriched = repo.appointments_with_patient_names();
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].patient_name, "Test Patient");
        assert_eq!(enriched[0].patient_id, 1);
        assert_eq!(enriched[0].date, "2025-12-25");
        assert_eq!(enriched[0].description, "Checkup");
    }

    #[test]
    fn test_dangling_appointment_is_shown_as_unknown() {
        let mut repo = repo_with_patient();
        repo.add_appointment(99, "2025-12-25", "Orphan");

        let enriched = repo.appointments_with_patient_names();
        assert_eq!(enriched[0].patient_name, UNKNOWN_PATIENT_NAME);
    }

    #[test]
    fn test_enrich_appointments_subset_keeps_order() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "A");
        repo.add_appointment(1, "2025-12-26", "B");
        repo.add_appointment(1, "2025-12-27", "C");

        let subset: Vec<&Appointment> = repo
            .get_all_appointments()
            .iter()
            .filter(|a| a.description != "B")
            .collect();
        let enriched = repo.enrich_appointments(subset);

        assert_eq!(ids(&enriched), vec![1, 3]);
    }

    #[test]
    fn test_delete_patient_removes_appointments() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Checkup");

        assert_eq!(repo.delete_patient(1), (true, 1));
        assert!(repo.get_all_appointments().is_empty());
    }

    #[test]
    fn test_delete_patient_cascade_leaves_other_appointments_unchanged() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Alice", "28", "111");
        repo.add_patient("Bob", "35", "222");
        repo.add_appointment(1, "2025-12-25", "Alice 1");
        let bob_1 = repo.add_appointment(2, "2025-12-25", "Bob 1");
        repo.add_appointment(1, "2025-12-26", "Alice 2");
        let bob_2 = repo.add_appointment(2, "2025-12-27", "Bob 2");

        assert_eq!(repo.delete_patient(1), (true, 2));
        assert_eq!(repo.get_all_appointments(), &[bob_1, bob_2]);
        assert_eq!(repo.get_all_patients().len(), 1);
    }

    #[test]
    fn test_get_appointments_as_api_format() {
        let mut repo = repo_with_patient();
        let appointment = repo.add_appointment(1, "2025-12-25", "Checkup");

        let api = repo.get_appointments_as_api_format();
        assert_eq!(api, vec![appointment.to_api()]);
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_appointments_filters_by_date() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Christmas Checkup");
        repo.add_appointment(1, "2025-12-26", "Day After");
        repo.add_appointment(1, "2025-12-25", "Christmas Evening");

        let results = repo.search_appointments(None, Some("2025-12-25"));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description, "Christmas Checkup");
        assert_eq!(results[1].description, "Christmas Evening");
    }

    #[test]
    fn test_search_appointments_filters_by_name() {
        let mut repo = repo_with_patient();
        repo.add_patient("Another Patient", "25", "222");
        repo.add_appointment(1, "2025-12-25", "First Patient Checkup");
        repo.add_appointment(2, "2025-12-25", "Second Patient Checkup");

        let results = repo.search_appointments(Some("Test"), None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].patient_name, "Test Patient");
    }

    #[test]
    fn test_search_appointments_is_case_insensitive() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Checkup");

        let lower = repo.search_appointments(Some("test"), None);
        let upper = repo.search_appointments(Some("TEST"), None);
        assert_eq!(lower.len(), 1);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_search_appointments_combined_is_intersection() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("Ahmed Ali", "30", "111");
        repo.add_patient("Sara Omar", "25", "222");
        repo.add_appointment(1, "2025-12-25", "A");
        repo.add_appointment(2, "2025-12-25", "B");
        repo.add_appointment(1, "2025-12-26", "C");
        repo.add_appointment(2, "2025-12-26", "D");

        let by_name = ids(&repo.search_appointments(Some("ali"), None));
        let by_date = ids(&repo.search_appointments(None, Some("2025-12-26")));
        let both = ids(&repo.search_appointments(Some("ali"), Some("2025-12-26")));

        let expected: Vec<u64> = by_name
            .iter()
            .copied()
            .filter(|id| by_date.contains(id))
            .collect();
        assert_eq!(both, expected);
        assert_eq!(both, vec![3]);
    }

    #[test]
    fn test_search_appointments_empty_filters_return_everything() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "A");
        repo.add_appointment(7, "2025-12-26", "Dangling");

        let all = repo.appointments_with_patient_names();
        assert_eq!(repo.search_appointments(None, None), all);
        assert_eq!(repo.search_appointments(Some(""), Some("")), all);
    }

    #[test]
    fn test_search_by_query_excludes_dangling_appointments() {
        let mut repo = repo_with_patient();
        repo.add_appointment(1, "2025-12-25", "Known");
        repo.add_appointment(99, "2025-12-25", "Dangling");

        // "unknown" would match the placeholder name if it were searched.
        assert!(repo.search_appointments(Some("unknown"), None).is_empty());

        let by_date = repo.search_appointments(None, Some("2025-12-25"));
        assert_eq!(by_date.len(), 2, "date-only search still sees dangling rows");
    }

    #[test]
    fn test_search_with_no_matches_returns_empty() {
        let mut repo = ClinicRepository::new();
        repo.add_patient("John", "30", "111");
        repo.add_appointment(1, "2025-12-25", "Checkup");

        assert!(repo.search_appointments(Some("NonExistent"), None).is_empty());
    }

    // ------------------------------------------------------------------------
    // Seed data
    // ------------------------------------------------------------------------

    #[test]
    fn test_seeded_repository_scenario() {
        let mut repo = ClinicRepository::with_seed_data();

        let names: Vec<&str> = repo
            .get_all_patients()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ahmed Ali", "Sara Omar"]);

        let enriched = repo.appointments_with_patient_names();
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].patient_name, "Ahmed Ali");
        assert_eq!(enriched[0].date, "2025-10-22");
        assert_eq!(enriched[0].description, "General Checkup");

        repo.delete_patient(1);
        assert!(repo.appointments_with_patient_names().is_empty());
        assert_eq!(repo.patient_count(), 1);
    }
}
