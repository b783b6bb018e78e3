use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};

use crate::api::handlers::{deleted, ApiError, AppState};
use crate::model::{Branch, CourseResponse, Id, NewCourse};
use crate::store::traits::Store;

pub async fn list_courses<S: Store>(
    State(services): State<AppState<S>>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    Ok(Json(services.courses.view_all_courses().await?))
}

pub async fn get_course_by_name<S: Store>(
    State(services): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    Ok(Json(services.courses.find_by_name(&name).await?))
}

pub async fn list_courses_by_eligibility<S: Store>(
    State(services): State<AppState<S>>,
    Path(eligibility): Path<String>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    Ok(Json(services.courses.find_by_eligibility(&eligibility).await?))
}

pub async fn get_course<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<CourseResponse>, ApiError> {
    Ok(Json(services.courses.find_by_id(id).await?))
}

pub async fn create_course<S: Store>(
    State(services): State<AppState<S>>,
    Path((college_id, program_id)): Path<(Id, Id)>,
    RequestJson(course): RequestJson<NewCourse>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = services
        .courses
        .add_course(college_id, program_id, course)
        .await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(fields): RequestJson<NewCourse>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let course_id = services.courses.update_course(id, fields).await?;
    Ok(Json(serde_json::json!({
        "courseId": course_id,
        "message": format!("Course {} updated", course_id)
    })))
}

pub async fn delete_course<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services.courses.delete_by_id(id).await?;
    Ok(deleted(format!("Course {} deleted", id)))
}

pub async fn delete_course_by_name<S: Store>(
    State(services): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services.courses.delete_by_name(&name).await?;
    Ok(deleted(format!("Course {} deleted", name)))
}

pub async fn list_course_branches<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Vec<Branch>>, ApiError> {
    Ok(Json(services.courses.list_branches(id).await?))
}

pub async fn list_program_courses<S: Store>(
    State(services): State<AppState<S>>,
    Path(program_id): Path<Id>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    Ok(Json(services.courses.list_by_program(program_id).await?))
}
