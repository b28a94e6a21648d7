//! Rendered pages: dashboard, login, logout, unauthorized and not-found.

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::error;
use validator::Validate;

use hiring_models::{Role, Session};
use hiring_store::StoreError;

use crate::auth::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::config::ApiConfig;
use crate::error::{ApiError, INTERNAL_DETAIL};
use crate::guard::{self, GuardOutcome, LOGIN_PATH};
use crate::handlers::auth::LoginForm;
use crate::pages::{self, LoginView};
use crate::security::is_local_redirect;
use crate::services::AuthError;
use crate::state::AppState;

/// Failure while rendering a page. Shown as the error view.
#[derive(Debug)]
pub struct PageError {
    error: ApiError,
    hide_detail: bool,
}

impl PageError {
    pub fn new(error: impl Into<ApiError>, config: &ApiConfig) -> Self {
        Self {
            error: error.into(),
            hide_detail: config.is_production(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("Page failed: {}", self.error);
        let message = if self.hide_detail {
            INTERNAL_DETAIL.to_string()
        } else {
            self.error.to_string()
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::error_page(&message)),
        )
            .into_response()
    }
}

/// Session behind the page cookie, if it is still valid.
async fn page_session(state: &AppState, jar: &CookieJar) -> Result<Option<Session>, PageError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    match state.auth.authorize(token.as_deref()).await {
        Ok(session) => Ok(Some(session)),
        Err(e) if e.is_unauthenticated() => Ok(None),
        Err(e) => Err(PageError::new(e, &state.config)),
    }
}

fn requested_path(uri: &axum::http::Uri) -> &str {
    uri.path_and_query().map(|p| p.as_str()).unwrap_or("/")
}

/// Admin dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let session = page_session(&state, &jar).await?;

    match guard::evaluate(session.as_ref(), Some(Role::Admin), requested_path(&uri)) {
        GuardOutcome::Redirect(to) => Ok(Redirect::to(&to).into_response()),
        GuardOutcome::Allow(user) => {
            let page_error = |e: StoreError| PageError::new(e, &state.config);
            let jobs = state.store.jobs.list().await.map_err(page_error)?;
            let candidates = state.store.candidates.list().await.map_err(page_error)?;
            Ok(Html(pages::dashboard_page(&user, jobs.len(), candidates.len())).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Login form.
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(pages::login_page(&LoginView {
        redirect: query.redirect,
        ..Default::default()
    }))
}

/// Handle a login form post.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let mut view = LoginView {
        email: form.email.clone(),
        redirect: form.redirect.clone(),
        ..Default::default()
    };

    if let Err(errors) = form.validate() {
        let fields = errors.field_errors();
        let first_message = |field: &str| {
            fields
                .get(field)
                .and_then(|errs| errs.first())
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
        };
        view.email_error = first_message("email");
        view.password_error = first_message("password");
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(pages::login_page(&view))).into_response());
    }

    match state.auth.login(&form.email, &form.password).await {
        Ok(result) => {
            let target = form
                .redirect
                .as_deref()
                .filter(|r| is_local_redirect(r))
                .unwrap_or("/");
            let jar = jar.add(session_cookie(result.token));
            Ok((jar, Redirect::to(target)).into_response())
        }
        Err(AuthError::Store(e)) => Err(PageError::new(e, &state.config)),
        Err(e) => {
            view.form_error = Some(e.to_string());
            Ok((StatusCode::UNAUTHORIZED, Html(pages::login_page(&view))).into_response())
        }
    }
}

/// Sign out and return to the login page.
pub async fn logout_submit(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    state
        .auth
        .logout()
        .await
        .map_err(|e| PageError::new(e, &state.config))?;
    Ok((jar.remove(removal_cookie()), Redirect::to(LOGIN_PATH)).into_response())
}

pub async fn unauthorized() -> Html<String> {
    Html(pages::unauthorized_page())
}

/// Fallback for unknown routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page(uri.path())))
}
