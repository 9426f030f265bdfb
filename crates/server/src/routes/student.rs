use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use models::{faculty, student};
use service::student::domain::NewStudent;

use super::{parse_param, IdQuery, ServerState};
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeQuery {
    pub age: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    pub min: Option<String>,
    pub max: Option<String>,
}

#[utoipa::path(get, path = "/student", tag = "student", params(IdQuery), responses((status = 200, description = "OK", body = crate::openapi::StudentDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn get(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<student::Model>, JsonApiError> {
    let id = parse_param(q.id.as_deref(), "id")?;
    Ok(Json(state.students.find(id).await?))
}

#[utoipa::path(post, path = "/student", tag = "student", request_body = crate::openapi::NewStudentDoc, responses((status = 200, description = "OK", body = crate::openapi::StudentDoc)))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewStudent>) -> Result<Json<student::Model>, JsonApiError> {
    let s = state.students.create(input).await?;
    info!(student_id = s.id, "created student");
    Ok(Json(s))
}

#[utoipa::path(put, path = "/student", tag = "student", request_body = crate::openapi::StudentDoc, responses((status = 200, description = "OK", body = crate::openapi::StudentDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn edit(State(state): State<ServerState>, ApiJson(input): ApiJson<student::Model>) -> Result<Json<student::Model>, JsonApiError> {
    let id = input.id;
    state
        .students
        .edit(input)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("student {id} not found")))
}

#[utoipa::path(delete, path = "/student", tag = "student", params(IdQuery), responses((status = 200, description = "`true` if the student existed", body = bool)))]
pub async fn delete(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<bool>, JsonApiError> {
    let id = parse_param(q.id.as_deref(), "id")?;
    Ok(Json(state.students.delete(id).await?))
}

#[utoipa::path(get, path = "/student/all", tag = "student", responses((status = 200, description = "OK", body = [crate::openapi::StudentDoc])))]
pub async fn all(State(state): State<ServerState>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    Ok(Json(state.students.all().await?))
}

#[utoipa::path(get, path = "/student/byAge", tag = "student", params(AgeQuery), responses((status = 200, description = "OK", body = [crate::openapi::StudentDoc])))]
pub async fn by_age(State(state): State<ServerState>, Query(q): Query<AgeQuery>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    let age = parse_param(q.age.as_deref(), "age")?;
    Ok(Json(state.students.by_age(age).await?))
}

#[utoipa::path(get, path = "/student/byAgeBetween", tag = "student", params(AgeRangeQuery), responses((status = 200, description = "OK", body = [crate::openapi::StudentDoc])))]
pub async fn by_age_between(
    State(state): State<ServerState>,
    Query(q): Query<AgeRangeQuery>,
) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    let min = parse_param(q.min.as_deref(), "min")?;
    let max = parse_param(q.max.as_deref(), "max")?;
    Ok(Json(state.students.by_age_between(min, max).await?))
}

#[utoipa::path(get, path = "/student/faculty", tag = "student", params(IdQuery), responses((status = 200, description = "Faculty or `null`", body = crate::openapi::FacultyDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn faculty(
    State(state): State<ServerState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Option<faculty::Model>>, JsonApiError> {
    let id = parse_param(q.id.as_deref(), "id")?;
    Ok(Json(state.students.faculty_of(id).await?))
}

#[utoipa::path(get, path = "/student/count", tag = "student", responses((status = 200, description = "OK", body = u64)))]
pub async fn count(State(state): State<ServerState>) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(state.students.count().await?))
}

#[utoipa::path(get, path = "/student/avgAge", tag = "student", responses((status = 200, description = "Computed by the database", body = f64)))]
pub async fn avg_age(State(state): State<ServerState>) -> Result<Json<f64>, JsonApiError> {
    Ok(Json(state.students.avg_age().await?))
}

#[utoipa::path(get, path = "/student/averageAge", tag = "student", responses((status = 200, description = "Computed in memory", body = f64)))]
pub async fn average_age(State(state): State<ServerState>) -> Result<Json<f64>, JsonApiError> {
    Ok(Json(state.students.average_age().await?))
}

#[utoipa::path(get, path = "/student/lastFive", tag = "student", responses((status = 200, description = "OK", body = [crate::openapi::StudentDoc])))]
pub async fn last_five(State(state): State<ServerState>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    Ok(Json(state.students.last_five().await?))
}

#[utoipa::path(get, path = "/student/namesStartingWithA", tag = "student", responses((status = 200, description = "OK", body = [String])))]
pub async fn names_starting_with_a(State(state): State<ServerState>) -> Result<Json<Vec<String>>, JsonApiError> {
    Ok(Json(state.students.names_starting_with_a().await?))
}

/// Printer threads keep running after the response; their output goes to the log.
#[utoipa::path(get, path = "/student/print-parallel", tag = "student", responses((status = 200, description = "Printing started"), (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)))]
pub async fn print_parallel(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    let _detached = state.students.print_parallel().await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(get, path = "/student/print-synchronized", tag = "student", responses((status = 200, description = "Printing started"), (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody)))]
pub async fn print_synchronized(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    let _detached = state.students.print_synchronized().await?;
    Ok(StatusCode::OK)
}
