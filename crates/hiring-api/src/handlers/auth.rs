//! JSON auth endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use hiring_models::User;

use crate::auth::{removal_cookie, request_token, session_cookie, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::handlers::DataResponse;
use crate::services::{AuthError, LoginResult};
use crate::state::AppState;

/// Login credentials, from a form post or a JSON body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "validate_email_field"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Where to go after a successful login.
    #[serde(default)]
    pub redirect: Option<String>,
}

fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    let message = if email.trim().is_empty() {
        "Email is required"
    } else if !email.validate_email() {
        "Please enter a valid email"
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new("email");
    err.message = Some(message.into());
    Err(err)
}

/// Sign in and receive the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> ApiResult<(CookieJar, Json<DataResponse<LoginResult>>)> {
    form.validate()?;
    let result = state.auth.login(&form.email, &form.password).await?;
    let jar = jar.add(session_cookie(result.token.clone()));
    Ok((jar, Json(DataResponse::new(result))))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Drop the session and the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<DataResponse<LogoutResponse>>)> {
    state.auth.logout().await?;
    Ok((
        jar.remove(removal_cookie()),
        Json(DataResponse::new(LogoutResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// The signed-in user, re-read from the session once the token checks out.
pub async fn me(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> ApiResult<Json<DataResponse<User>>> {
    let user = state.auth.current_user().await?;
    Ok(Json(DataResponse::new(user)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    pub is_admin: bool,
    pub is_applicant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Session flags for the presented token. Never fails for a missing session.
pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<DataResponse<AuthStatus>>> {
    let token = request_token(&headers);
    let user = match state.auth.authorize(token.as_deref()).await {
        Ok(session) => Some(session.user),
        Err(AuthError::Store(e)) => return Err(ApiError::from(e)),
        Err(_) => None,
    };

    let status = match user {
        Some(user) => AuthStatus {
            authenticated: state.auth.is_authenticated().await,
            is_admin: state.auth.is_admin().await,
            is_applicant: state.auth.is_applicant().await,
            user: Some(user),
        },
        None => AuthStatus {
            authenticated: false,
            is_admin: false,
            is_applicant: false,
            user: None,
        },
    };

    Ok(Json(DataResponse::new(status)))
}
