use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use models::{faculty, student};
use service::faculty::domain::NewFaculty;

use super::{parse_param, IdQuery, ServerState};
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ColorQuery {
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ColorOrNameQuery {
    pub color: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultyIdQuery {
    #[serde(rename = "facultyId")]
    pub faculty_id: Option<String>,
}

#[utoipa::path(get, path = "/faculty", tag = "faculty", params(IdQuery), responses((status = 200, description = "OK", body = crate::openapi::FacultyDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn get(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<faculty::Model>, JsonApiError> {
    let id = parse_param(q.id.as_deref(), "id")?;
    Ok(Json(state.faculties.find(id).await?))
}

#[utoipa::path(post, path = "/faculty", tag = "faculty", request_body = crate::openapi::NewFacultyDoc, responses((status = 200, description = "OK", body = crate::openapi::FacultyDoc)))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewFaculty>) -> Result<Json<faculty::Model>, JsonApiError> {
    let f = state.faculties.create(input).await?;
    info!(faculty_id = f.id, "created faculty");
    Ok(Json(f))
}

#[utoipa::path(put, path = "/faculty", tag = "faculty", request_body = crate::openapi::FacultyDoc, responses((status = 200, description = "OK", body = crate::openapi::FacultyDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn edit(State(state): State<ServerState>, ApiJson(input): ApiJson<faculty::Model>) -> Result<Json<faculty::Model>, JsonApiError> {
    let id = input.id;
    state
        .faculties
        .edit(input)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("faculty {id} not found")))
}

#[utoipa::path(delete, path = "/faculty", tag = "faculty", params(IdQuery), responses((status = 200, description = "`true` if the faculty existed", body = bool)))]
pub async fn delete(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<bool>, JsonApiError> {
    let id = parse_param(q.id.as_deref(), "id")?;
    Ok(Json(state.faculties.delete(id).await?))
}

#[utoipa::path(get, path = "/faculty/all", tag = "faculty", responses((status = 200, description = "OK", body = [crate::openapi::FacultyDoc])))]
pub async fn all(State(state): State<ServerState>) -> Result<Json<Vec<faculty::Model>>, JsonApiError> {
    Ok(Json(state.faculties.all().await?))
}

#[utoipa::path(get, path = "/faculty/byColor", tag = "faculty", params(ColorQuery), responses((status = 200, description = "OK", body = [crate::openapi::FacultyDoc])))]
pub async fn by_color(State(state): State<ServerState>, Query(q): Query<ColorQuery>) -> Result<Json<Vec<faculty::Model>>, JsonApiError> {
    let color = q.color.ok_or_else(|| JsonApiError::bad_request("query parameter `color` is required"))?;
    Ok(Json(state.faculties.by_color(&color).await?))
}

#[utoipa::path(get, path = "/faculty/byColorOrName", tag = "faculty", params(ColorOrNameQuery), responses((status = 200, description = "OK", body = [crate::openapi::FacultyDoc])))]
pub async fn by_color_or_name(
    State(state): State<ServerState>,
    Query(q): Query<ColorOrNameQuery>,
) -> Result<Json<Vec<faculty::Model>>, JsonApiError> {
    Ok(Json(state.faculties.by_color_or_name(q.color.as_deref(), q.name.as_deref()).await?))
}

#[utoipa::path(get, path = "/faculty/students", tag = "faculty", params(FacultyIdQuery), responses((status = 200, description = "OK", body = [crate::openapi::StudentDoc]), (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)))]
pub async fn students(
    State(state): State<ServerState>,
    Query(q): Query<FacultyIdQuery>,
) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    let id = parse_param(q.faculty_id.as_deref(), "facultyId")?;
    Ok(Json(state.faculties.students_of(id).await?))
}
