//! Route guard for rendered pages.
//!
//! Decides whether a page may render for the current session. Failures are
//! redirects, never errors.

use hiring_models::{Role, Session, User};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path shown when the role does not match.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Render the page for this user.
    Allow(User),
    /// Send the browser elsewhere.
    Redirect(String),
}

/// Check `session` against the role a page requires.
///
/// Missing or expired sessions go to the login page with the requested path
/// preserved; a role mismatch goes to the unauthorized page.
pub fn evaluate(
    session: Option<&Session>,
    required_role: Option<Role>,
    requested_path: &str,
) -> GuardOutcome {
    let Some(session) = session.filter(|s| !s.is_expired()) else {
        return GuardOutcome::Redirect(login_redirect(requested_path));
    };

    match required_role {
        Some(role) if session.user.role != role => {
            GuardOutcome::Redirect(UNAUTHORIZED_PATH.to_string())
        }
        _ => GuardOutcome::Allow(session.user.clone()),
    }
}

/// Login URL that returns to `path` afterwards.
pub fn login_redirect(path: &str) -> String {
    // slashes stay readable in the query
    let encoded = urlencoding::encode(path).replace("%2F", "/");
    format!("{}?redirect={}", LOGIN_PATH, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use hiring_models::UserId;

    fn session(role: Role) -> Session {
        let user = User {
            id: UserId::from("user_001"),
            email: "admin@rakamin.com".to_string(),
            full_name: "Admin Rakamin".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        Session::issue(user, "token_1_abc", Utc::now())
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        assert_eq!(
            evaluate(None, Some(Role::Admin), "/"),
            GuardOutcome::Redirect("/login?redirect=/".to_string())
        );
    }

    #[test]
    fn test_expired_session_counts_as_missing() {
        let mut expired = session(Role::Admin);
        expired.expires_at = Utc::now() - Duration::minutes(1);

        assert_eq!(
            evaluate(Some(&expired), None, "/"),
            GuardOutcome::Redirect("/login?redirect=/".to_string())
        );
    }

    #[test]
    fn test_role_mismatch_redirects_to_unauthorized() {
        let applicant = session(Role::Applicant);
        assert_eq!(
            evaluate(Some(&applicant), Some(Role::Admin), "/"),
            GuardOutcome::Redirect("/unauthorized".to_string())
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let admin = session(Role::Admin);
        match evaluate(Some(&admin), Some(Role::Admin), "/") {
            GuardOutcome::Allow(user) => assert_eq!(user.role, Role::Admin),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert!(matches!(
            evaluate(Some(&session(Role::Applicant)), None, "/"),
            GuardOutcome::Allow(_)
        ));
    }

    #[test]
    fn test_login_redirect_encodes_query() {
        assert_eq!(
            login_redirect("/jobs?status=active&q=dev"),
            "/login?redirect=/jobs%3Fstatus%3Dactive%26q%3Ddev"
        );
    }
}
