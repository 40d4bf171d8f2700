use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::{NewStudent, Student, StudentPatch};
use service::students::{StudentQuery, StudentStats};
use uuid::Uuid;

use super::AppState;
use crate::errors::JsonApiError;

/// Create a student; 201 with the stored record.
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_student(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.students.get(id).await?))
}

/// Partial update: only the fields present in the body change.
pub async fn update_student(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(Json(state.students.update(id, patch).await?))
}

pub async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /students?q=&department=&sort_by=&order=&limit=&offset=`
pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<Vec<Student>>, JsonApiError> {
    let Query(query) = query?;
    Ok(Json(state.students.list(&query).await?))
}

pub async fn student_stats(State(state): State<AppState>) -> Json<StudentStats> {
    Json(state.students.stats().await)
}
