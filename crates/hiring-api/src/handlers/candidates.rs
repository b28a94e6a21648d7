//! Candidate endpoints. Admin only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use hiring_models::{Candidate, CandidateStatus, CreateCandidateInput, UpdateCandidateInput};

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::handlers::{DataResponse, DeletedResponse};
use crate::metrics;
use crate::state::AppState;

/// Filters for the candidate list. All given filters must match.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuery {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive search over name and email.
    #[serde(default)]
    pub q: Option<String>,
}

pub async fn list_candidates(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<CandidateQuery>,
) -> ApiResult<Json<DataResponse<Vec<Candidate>>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<CandidateStatus>)
        .transpose()?;
    let job_id = query.job_id.as_deref().filter(|j| !j.is_empty());
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let candidates = state.store.candidates.as_ref();
    let mut found = if let Some(job_id) = job_id {
        candidates.filter_by_job(job_id).await?
    } else if let Some(q) = search {
        candidates.search_by_name_or_email(q).await?
    } else if let Some(status) = status {
        candidates.filter_by_status(status).await?
    } else {
        candidates.list().await?
    };

    if let Some(status) = status {
        found.retain(|c| c.status == status);
    }
    if let Some(q) = search {
        let needle = q.to_lowercase();
        found.retain(|c| c.matches_name_or_email(&needle));
    }

    Ok(Json(DataResponse::new(found)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Candidate>>> {
    let candidate = state.store.candidates.get_by_id(&id).await?;
    Ok(Json(DataResponse::new(candidate)))
}

pub async fn create_candidate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(input): Json<CreateCandidateInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Candidate>>)> {
    input.validate()?;
    let candidate = state.store.candidates.create(input).await?;

    info!(user_id = %admin.user.id, candidate_id = %candidate.id, "Candidate created via API");
    metrics::record_mutation("candidate", "create");
    Ok((StatusCode::CREATED, Json(DataResponse::new(candidate))))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateCandidateInput>,
) -> ApiResult<Json<DataResponse<Candidate>>> {
    let candidate = state.store.candidates.update(&id, update).await?;

    info!(user_id = %admin.user.id, candidate_id = %candidate.id, "Candidate updated via API");
    metrics::record_mutation("candidate", "update");
    Ok(Json(DataResponse::new(candidate)))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<DeletedResponse>>> {
    state.store.candidates.delete(&id).await?;

    info!(user_id = %admin.user.id, candidate_id = %id, "Candidate deleted via API");
    metrics::record_mutation("candidate", "delete");
    Ok(Json(DataResponse::new(DeletedResponse::new(id))))
}
