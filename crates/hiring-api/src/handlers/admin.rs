//! Admin maintenance endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::handlers::DataResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MaintenanceResponse {
    pub message: String,
}

/// Restore users, jobs and candidates to their fixtures.
pub async fn reset_data(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<DataResponse<MaintenanceResponse>>> {
    state.auth.reset_users().await?;
    state.store.reset_records().await?;

    info!(user_id = %admin.user.id, "Data reset to fixtures");
    Ok(Json(DataResponse::new(MaintenanceResponse {
        message: "Data reset to fixtures".to_string(),
    })))
}

/// Remove every stored document, including the caller's session.
pub async fn clear_storage(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<DataResponse<MaintenanceResponse>>> {
    state.auth.clear_storage().await?;
    state.store.clear_records().await?;

    info!(user_id = %admin.user.id, "Storage cleared");
    Ok(Json(DataResponse::new(MaintenanceResponse {
        message: "Storage cleared".to_string(),
    })))
}
