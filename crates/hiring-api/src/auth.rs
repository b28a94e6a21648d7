//! Session extraction for API handlers.
//!
//! The session token is read from the `hiring_session` cookie, falling back
//! to an `Authorization: Bearer` header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use hiring_models::{Session, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "hiring_session";

/// Session token presented with a request, if any.
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Cookie carrying a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to remove the session cookie.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

impl From<Session> for AuthUser {
    fn from(session: Session) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

/// A signed-in admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers);
        let session = state.auth.authorize(token.as_deref()).await?;
        debug!(user_id = %session.user.id, "Authenticated request");
        Ok(session.into())
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.user.is_admin() {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn headers(header: (&str, &str)) -> HeaderMap {
        let (parts, _) = Request::builder()
            .header(header.0, header.1)
            .body(())
            .unwrap()
            .into_parts();
        parts.headers
    }

    #[test]
    fn test_token_from_cookie() {
        let p = headers(("cookie", "theme=dark; hiring_session=token_1_abc"));
        assert_eq!(request_token(&p).as_deref(), Some("token_1_abc"));
    }

    #[test]
    fn test_token_from_bearer() {
        let p = headers(("authorization", "Bearer token_2_xyz"));
        assert_eq!(request_token(&p).as_deref(), Some("token_2_xyz"));

        let p = headers(("authorization", "Basic abc"));
        assert_eq!(request_token(&p), None);
    }
}
