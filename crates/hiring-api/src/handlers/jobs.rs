//! Job endpoints.
//!
//! Reads are open to any signed-in user; changes require an admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use hiring_models::{CreateJobInput, Job, JobStatus, UpdateJobInput};

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiResult;
use crate::handlers::{DataResponse, DeletedResponse};
use crate::metrics;
use crate::state::AppState;

/// Filters for the job list.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive title search.
    #[serde(default)]
    pub q: Option<String>,
}

pub async fn list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<JobQuery>,
) -> ApiResult<Json<DataResponse<Vec<Job>>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<JobStatus>)
        .transpose()?;
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let jobs = state.store.jobs.as_ref();
    let mut found = match (status, search) {
        (Some(status), None) => jobs.filter_by_status(status).await?,
        (_, Some(q)) => jobs.search_by_title(q).await?,
        (None, None) => jobs.list().await?,
    };
    if let Some(status) = status {
        found.retain(|j| j.status == status);
    }

    Ok(Json(DataResponse::new(found)))
}

pub async fn get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Job>>> {
    let job = state.store.jobs.get_by_id(&id).await?;
    Ok(Json(DataResponse::new(job)))
}

pub async fn get_job_by_slug(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<DataResponse<Job>>> {
    let job = state.store.jobs.get_by_slug(&slug).await?;
    Ok(Json(DataResponse::new(job)))
}

pub async fn create_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<CreateJobInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Job>>)> {
    input.validate()?;
    let job = state.store.jobs.create(input).await?;

    info!(user_id = %admin.user.id, job_id = %job.id, "Job created via API");
    metrics::record_mutation("job", "create");
    Ok((StatusCode::CREATED, Json(DataResponse::new(job))))
}

pub async fn update_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateJobInput>,
) -> ApiResult<Json<DataResponse<Job>>> {
    update.validate()?;
    let job = state.store.jobs.update(&id, update).await?;

    info!(user_id = %admin.user.id, job_id = %job.id, "Job updated via API");
    metrics::record_mutation("job", "update");
    Ok(Json(DataResponse::new(job)))
}

pub async fn delete_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<DeletedResponse>>> {
    state.store.jobs.delete(&id).await?;

    info!(user_id = %admin.user.id, job_id = %id, "Job deleted via API");
    metrics::record_mutation("job", "delete");
    Ok(Json(DataResponse::new(DeletedResponse::new(id))))
}
