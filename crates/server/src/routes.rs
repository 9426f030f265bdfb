use std::str::FromStr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use serde::Deserialize;
use tracing::Level;
use utoipa::{IntoParams, OpenApi};

use common::types::Health;
use service::faculty::{repository::FacultyRepository, FacultyService};
use service::student::{repository::StudentRepository, StudentService};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod faculty;
pub mod student;

/// Shared handler state; the services are built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService<dyn StudentRepository>>,
    pub faculties: Arc<FacultyService<dyn FacultyRepository>>,
}

impl ServerState {
    pub fn new(
        students: StudentService<dyn StudentRepository>,
        faculties: FacultyService<dyn FacultyRepository>,
    ) -> Self {
        Self { students: Arc::new(students), faculties: Arc::new(faculties) }
    }
}

/// `?id=` on the single-record endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Parse a required query parameter; missing, blank and malformed values are a 400.
pub(crate) fn parse_param<T: FromStr>(raw: Option<&str>, name: &str) -> Result<T, JsonApiError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or_else(|| JsonApiError::bad_request(format!("query parameter `{name}` is required")))?;
    raw.parse()
        .map_err(|_| JsonApiError::bad_request(format!("query parameter `{name}` is invalid: `{raw}`")))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: faculty and student APIs plus operational routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let faculty_routes = Router::new()
        .route(
            "/faculty",
            get(faculty::get).post(faculty::create).put(faculty::edit).delete(faculty::delete),
        )
        .route("/faculty/all", get(faculty::all))
        .route("/faculty/byColor", get(faculty::by_color))
        .route("/faculty/byColorOrName", get(faculty::by_color_or_name))
        .route("/faculty/students", get(faculty::students));

    let student_routes = Router::new()
        .route(
            "/student",
            get(student::get).post(student::create).put(student::edit).delete(student::delete),
        )
        .route("/student/all", get(student::all))
        .route("/student/byAge", get(student::by_age))
        .route("/student/byAgeBetween", get(student::by_age_between))
        .route("/student/faculty", get(student::faculty))
        .route("/student/count", get(student::count))
        .route("/student/avgAge", get(student::avg_age))
        .route("/student/averageAge", get(student::average_age))
        .route("/student/lastFive", get(student::last_five))
        .route("/student/namesStartingWithA", get(student::names_starting_with_a))
        .route("/student/print-parallel", get(student::print_parallel))
        .route("/student/print-synchronized", get(student::print_synchronized));

    let ops: Router = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    Router::new()
        .merge(faculty_routes)
        .merge(student_routes)
        .with_state(state)
        .merge(ops)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parse_param_rejects_blank_and_garbage() {
        assert_eq!(parse_param::<i64>(Some(" 42 "), "id").unwrap(), 42);
        for raw in [None, Some(""), Some("   "), Some("abc")] {
            let err = parse_param::<i64>(raw, "id").unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }
}
