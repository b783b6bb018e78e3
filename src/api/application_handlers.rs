use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};

use crate::api::handlers::{deleted, ApiError, AppState};
use crate::model::{Application, Id, NewApplication};
use crate::store::traits::Store;

pub async fn create_application<S: Store>(
    State(services): State<AppState<S>>,
    Path(scheduled_id): Path<Id>,
    RequestJson(application): RequestJson<NewApplication>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let application = services
        .applications
        .add_application(scheduled_id, application)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn get_application<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Application>, ApiError> {
    Ok(Json(services.applications.find_by_id(id).await?))
}

pub async fn list_schedule_applications<S: Store>(
    State(services): State<AppState<S>>,
    Path(scheduled_id): Path<Id>,
) -> Result<Json<Vec<Application>>, ApiError> {
    Ok(Json(
        services.applications.find_by_schedule(scheduled_id).await?,
    ))
}

pub async fn delete_application<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services.applications.delete_by_id(id).await?;
    Ok(deleted(format!("Application {} deleted", id)))
}
