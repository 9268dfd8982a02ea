//! # API REST
//!
//! REST API implementation for the clinic service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! All state lives in a [`ClinicService`]; handlers validate input with
//! `clinic_core::validation` and translate [`ClinicError`]s into JSON error bodies.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CreateAppointmentReq, ErrorRes, HealthRes, HealthService, PatientReq, SearchAppointmentsQuery,
};
use clinic_core::validation::{validate_appointment_input, validate_patient_input};
use clinic_core::{
    ApiAppointment, Appointment, AppointmentWithPatient, ClinicError, ClinicService, Dashboard,
    Patient,
};

/// Error half of every handler result.
type ApiError = (StatusCode, Json<ErrorRes>);

/// Extractor failure rendered as the usual `{"error": ...}` body.
///
/// axum's own rejections answer in plain text; the wrappers below route them through
/// [`api_error`] instead, keeping the status axum picked (400, 415, 422).
struct Rejection(ApiError);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<JsonRejection> for Rejection {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        Self(api_error(rejection.status(), rejection.body_text()))
    }
}

impl From<PathRejection> for Rejection {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        Self(api_error(rejection.status(), rejection.body_text()))
    }
}

impl From<QueryRejection> for Rejection {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        Self(api_error(rejection.status(), rejection.body_text()))
    }
}

/// `Json` body extractor with JSON error bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(Rejection))]
struct ApiJson<T>(T);

/// `Path` extractor with JSON error bodies.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(Rejection))]
struct ApiPath<T>(T);

/// `Query` extractor with JSON error bodies.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(Rejection))]
struct ApiQuery<T>(T);

/// Application state shared across REST API handlers
#[derive(Clone)]
struct AppState {
    clinic_service: ClinicService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        dashboard,
        list_patients,
        create_patient,
        get_patient,
        update_patient,
        delete_patient,
        list_appointments,
        create_appointment,
        search_appointments,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        PatientReq,
        CreateAppointmentReq,
        Patient,
        Appointment,
        AppointmentWithPatient,
        ApiAppointment,
        Dashboard,
    ))
)]
struct ApiDoc;

/// Builds the REST router over the given clinic service.
///
/// Includes Swagger UI at `/swagger-ui` and the OpenAPI document at
/// `/api-docs/openapi.json`.
pub fn router(clinic_service: ClinicService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/appointments/search", get(search_appointments))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { clinic_service })
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorRes::new(message)))
}

/// Maps a core error onto an HTTP response.
///
/// Anything that is not the caller's fault is logged and reported as a bare 500.
fn clinic_error(context: &str, err: ClinicError) -> ApiError {
    match err {
        ClinicError::InvalidInput(msg) => api_error(StatusCode::BAD_REQUEST, msg),
        ClinicError::PatientNotFound(_) => api_error(StatusCode::BAD_REQUEST, "Patient not found"),
        other => {
            tracing::error!("{} error: {:?}", context, other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn patient_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Not Found")
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "All patients and enriched appointments", body = Dashboard),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Patients and name-enriched appointments, taken from one snapshot.
#[axum::debug_handler]
async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, ApiError> {
    state
        .clinic_service
        .dashboard()
        .map(Json)
        .map_err(|e| clinic_error("Dashboard", e))
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all patients in insertion order
///
/// Returns a bare JSON array: no pagination, filtering, or envelope.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ApiError> {
    state
        .clinic_service
        .get_all_patients()
        .map(Json)
        .map_err(|e| clinic_error("List patients", e))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientReq,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Validation failed or malformed JSON", body = ErrorRes),
        (status = 415, description = "Body is not `application/json`", body = ErrorRes),
        (status = 422, description = "Body does not match the request schema", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// Name and phone are required; age must be a whole number between 0 and 150.
///
/// # Errors
/// Returns `400 Bad Request` if validation fails.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PatientReq>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let input = validate_patient_input(&req.name, &req.age, &req.phone)
        .map_err(|e| clinic_error("Create patient", e))?;

    match state.clinic_service.add_patient(
        input.name.into_inner(),
        input.age.to_string(),
        input.phone.into_inner(),
    ) {
        Ok(patient) => Ok((StatusCode::CREATED, Json(patient))),
        Err(e) => Err(clinic_error("Create patient", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 400, description = "Id is not a number", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<Patient>, ApiError> {
    match state.clinic_service.find_patient(id) {
        Ok(Some(patient)) => Ok(Json(patient)),
        Ok(None) => Err(patient_not_found()),
        Err(e) => Err(clinic_error("Get patient", e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    request_body = PatientReq,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Validation failed, bad id, or malformed JSON", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 415, description = "Body is not `application/json`", body = ErrorRes),
        (status = 422, description = "Body does not match the request schema", body = ErrorRes)
    )
)]
/// Overwrite a patient's name, age, and phone
///
/// The patient must exist before the body is validated, so an unknown id is always a 404.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(req): ApiJson<PatientReq>,
) -> Result<Json<Patient>, ApiError> {
    match state.clinic_service.find_patient(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(patient_not_found()),
        Err(e) => return Err(clinic_error("Update patient", e)),
    }

    let input = validate_patient_input(&req.name, &req.age, &req.phone)
        .map_err(|e| clinic_error("Update patient", e))?;

    match state.clinic_service.update_patient(
        id,
        input.name.into_inner(),
        input.age.to_string(),
        input.phone.into_inner(),
    ) {
        Ok(Some(patient)) => Ok(Json(patient)),
        // Deleted between the lookup and the update.
        Ok(None) => Err(patient_not_found()),
        Err(e) => Err(clinic_error("Update patient", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient and their appointments deleted (or never existed)"),
        (status = 400, description = "Id is not a number", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a patient and every appointment that references them. Idempotent.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .clinic_service
        .delete_patient(id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| clinic_error("Delete patient", e))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "List of appointments", body = [ApiAppointment]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all appointments in the API shape (no patient names).
#[axum::debug_handler]
async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiAppointment>>, ApiError> {
    state
        .clinic_service
        .get_appointments_as_api_format()
        .map(Json)
        .map_err(|e| clinic_error("List appointments", e))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Validation failed, patient not found, or malformed JSON", body = ErrorRes),
        (status = 415, description = "Body is not `application/json`", body = ErrorRes),
        (status = 422, description = "Body does not match the request schema, e.g. no `patient_id`", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Book an appointment for an existing patient
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the date is not a valid `YYYY-MM-DD` date,
/// - the description is blank,
/// - the patient does not exist.
#[axum::debug_handler]
async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAppointmentReq>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let input = validate_appointment_input(req.patient_id, &req.date, &req.description)
        .map_err(|e| clinic_error("Create appointment", e))?;

    let date = input.date_text();
    match state.clinic_service.book_appointment(
        input.patient_id,
        date,
        input.description.into_inner(),
    ) {
        Ok(appointment) => Ok((StatusCode::CREATED, Json(appointment))),
        Err(e) => Err(clinic_error("Create appointment", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/appointments/search",
    params(SearchAppointmentsQuery),
    responses(
        (status = 200, description = "Matching appointments with patient names", body = [AppointmentWithPatient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Search appointments by patient name and/or exact date
///
/// Both parameters are trimmed. With neither given, every appointment is returned.
#[axum::debug_handler]
async fn search_appointments(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentWithPatient>>, ApiError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    let date = params.date.as_deref().map(str::trim).unwrap_or_default();

    let result = if query.is_empty() && date.is_empty() {
        state.clinic_service.appointments_with_patient_names()
    } else {
        state
            .clinic_service
            .search_appointments(Some(query), Some(date))
    };

    result
        .map(Json)
        .map_err(|e| clinic_error("Search appointments", e))
}
