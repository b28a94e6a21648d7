//! Server-rendered HTML views.

use hiring_models::User;

use crate::security::escape_html;

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:3rem auto;padding:0 1rem;color:#1d1d1d}\
.error{color:#c62828}label{display:block;margin-top:1rem}input{display:block;width:100%;padding:.4rem}\
button{margin-top:1.2rem;padding:.5rem 1.2rem}pre{background:#f4f4f4;padding:1rem;overflow:auto}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{} | Hiring Dashboard</title><style>{}</style></head><body>{}</body></html>",
        escape_html(title),
        STYLE,
        body
    )
}

/// Values and messages for the login form.
#[derive(Debug, Default, Clone)]
pub struct LoginView {
    pub email: String,
    pub redirect: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    /// Error from the auth service, shown verbatim above the form.
    pub form_error: Option<String>,
}

fn field_error(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!("<p class=\"error\">{}</p>", escape_html(m)))
        .unwrap_or_default()
}

pub fn login_page(view: &LoginView) -> String {
    let redirect = view
        .redirect
        .as_deref()
        .map(|r| {
            format!(
                "<input type=\"hidden\" name=\"redirect\" value=\"{}\">",
                escape_html(r)
            )
        })
        .unwrap_or_default();

    let body = format!(
        "<h1>Sign in</h1>{}\
<form method=\"post\" action=\"/login\" novalidate>{}\
<label for=\"email\">Email</label>\
<input id=\"email\" name=\"email\" type=\"email\" value=\"{}\" autocomplete=\"email\">{}\
<label for=\"password\">Password</label>\
<input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"current-password\">{}\
<button type=\"submit\">Login</button></form>",
        field_error(&view.form_error),
        redirect,
        escape_html(&view.email),
        field_error(&view.email_error),
        field_error(&view.password_error),
    );
    layout("Login", &body)
}

/// Admin dashboard showing the signed-in user and entity counts.
pub fn dashboard_page(user: &User, job_count: usize, candidate_count: usize) -> String {
    let user_json = serde_json::to_string_pretty(user).unwrap_or_default();
    let body = format!(
        "<h1>Dashboard</h1><p>Welcome, {}.</p>\
<ul><li>Jobs: {}</li><li>Candidates: {}</li></ul>\
<h2>Current user</h2><pre>{}</pre>\
<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>",
        escape_html(&user.full_name),
        job_count,
        candidate_count,
        escape_html(&user_json),
    );
    layout("Dashboard", &body)
}

pub fn unauthorized_page() -> String {
    layout(
        "Unauthorized",
        "<h1>Unauthorized</h1><p>You do not have permission to view this page.</p>\
<p><a href=\"/\">Go to dashboard</a> | <a href=\"/login\">Login with another account</a></p>",
    )
}

pub fn not_found_page(path: &str) -> String {
    let body = format!(
        "<h1>Page not found</h1><p>Nothing lives at <code>{}</code>.</p>\
<p><a href=\"/\">Back to dashboard</a> | <a href=\"/login\">Login</a></p>",
        escape_html(path)
    );
    layout("Not found", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1><p class=\"error\">{}</p>\
<p><a href=\"/\">Back to dashboard</a></p>",
        escape_html(message)
    );
    layout("Error", &body)
}
