use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use chrono::NaiveDate;

use crate::api::handlers::{deleted, ApiError, AppState};
use crate::model::{Id, ProgramScheduledResponse, ScheduleDates};
use crate::store::traits::Store;

type ScheduleList = Result<Json<Vec<ProgramScheduledResponse>>, ApiError>;

pub async fn create_schedule<S: Store>(
    State(services): State<AppState<S>>,
    Path((university_id, college_id, program_id, course_id, branch_id)): Path<(Id, Id, Id, Id, Id)>,
    RequestJson(dates): RequestJson<ScheduleDates>,
) -> Result<(StatusCode, Json<ProgramScheduledResponse>), ApiError> {
    let schedule = services
        .schedules
        .add_schedule(university_id, college_id, program_id, course_id, branch_id, dates)
        .await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn list_schedules<S: Store>(State(services): State<AppState<S>>) -> ScheduleList {
    Ok(Json(services.schedules.view_all().await?))
}

pub async fn get_schedule<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<ProgramScheduledResponse>, ApiError> {
    Ok(Json(services.schedules.find_by_id(id).await?))
}

pub async fn update_schedule<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(dates): RequestJson<ScheduleDates>,
) -> Result<Json<ProgramScheduledResponse>, ApiError> {
    Ok(Json(services.schedules.update_schedule(id, dates).await?))
}

pub async fn delete_schedule<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services.schedules.delete_by_id(id).await?;
    Ok(deleted(format!("Program scheduled {} deleted", id)))
}

pub async fn schedules_by_college_name<S: Store>(
    State(services): State<AppState<S>>,
    Path(name): Path<String>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_college_name(&name).await?))
}

/// `date` is an ISO-8601 calendar date, e.g. `2024-07-01`.
pub async fn schedules_by_start_date<S: Store>(
    State(services): State<AppState<S>>,
    Path(date): Path<NaiveDate>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_start_date(date).await?))
}

pub async fn schedules_by_college<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_college_reg_id(id).await?))
}

pub async fn schedules_by_branch<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_branch_id(id).await?))
}

pub async fn schedules_by_program<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_program_id(id).await?))
}

pub async fn schedules_by_course<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_course_id(id).await?))
}

pub async fn schedules_by_university<S: Store>(
    State(services): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ScheduleList {
    Ok(Json(services.schedules.find_by_university_id(id).await?))
}
