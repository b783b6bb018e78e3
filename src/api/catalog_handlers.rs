use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};

use crate::api::handlers::{ApiError, AppState};
use crate::model::{
    Branch, College, Id, NewBranch, NewCollege, NewProgram, NewUniversity, Program, University,
};
use crate::store::traits::Store;

pub async fn create_university<S: Store>(
    State(services): State<AppState<S>>,
    RequestJson(university): RequestJson<NewUniversity>,
) -> Result<(StatusCode, Json<University>), ApiError> {
    let university = services.catalog.add_university(university).await?;
    Ok((StatusCode::CREATED, Json(university)))
}

pub async fn get_university<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<University>, ApiError> {
    Ok(Json(services.catalog.find_university(id).await?))
}

pub async fn create_college<S: Store>(
    State(services): State<AppState<S>>,
    RequestJson(college): RequestJson<NewCollege>,
) -> Result<(StatusCode, Json<College>), ApiError> {
    let college = services.catalog.add_college(college).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

pub async fn get_college<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<College>, ApiError> {
    Ok(Json(services.catalog.find_college(id).await?))
}

pub async fn create_program<S: Store>(
    State(services): State<AppState<S>>,
    RequestJson(program): RequestJson<NewProgram>,
) -> Result<(StatusCode, Json<Program>), ApiError> {
    let program = services.catalog.add_program(program).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

pub async fn list_programs<S: Store>(
    State(services): State<AppState<S>>,
) -> Result<Json<Vec<Program>>, ApiError> {
    Ok(Json(services.catalog.view_all_programs().await?))
}

pub async fn get_program<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Program>, ApiError> {
    Ok(Json(services.catalog.find_program(id).await?))
}

pub async fn create_branch<S: Store>(
    State(services): State<AppState<S>>,
    Path(course_id): Path<Id>,
    RequestJson(branch): RequestJson<NewBranch>,
) -> Result<(StatusCode, Json<Branch>), ApiError> {
    let branch = services.catalog.add_branch(course_id, branch).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}
