//! Route Guard — pure, synchronous decision per navigation.
//!
//! No internal state: every evaluation reads a fresh session snapshot. A
//! wrong-role user bounces to their own dashboard, never to an error page.

use crate::models::user::UserType;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session permits the requested subtree; render it unchanged.
    Render,
    /// Not authenticated. `from` carries the originally requested location
    /// for a post-login redirect-back; the login flow accepts but does not
    /// consume it (see DESIGN.md), so it is informational today.
    RedirectToLogin { from: String },
    /// Authenticated but the wrong role; send the user to their own home.
    RedirectToDashboard { user_type: UserType },
}

impl RouteDecision {
    /// Target path for redirects, `None` when rendering.
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            RouteDecision::Render => None,
            RouteDecision::RedirectToLogin { .. } => Some("/login".to_string()),
            RouteDecision::RedirectToDashboard { user_type } => Some(user_type.dashboard_path()),
        }
    }
}

pub fn evaluate(
    session: &Session,
    required_role: Option<UserType>,
    requested_path: &str,
) -> RouteDecision {
    if !session.is_authenticated || session.token.is_none() {
        return RouteDecision::RedirectToLogin {
            from: requested_path.to_string(),
        };
    }
    // invariant: an authenticated session always carries a user
    let Some(user) = session.user.as_ref() else {
        return RouteDecision::RedirectToLogin {
            from: requested_path.to_string(),
        };
    };
    if let Some(role) = required_role {
        if user.user_type != role {
            return RouteDecision::RedirectToDashboard {
                user_type: user.user_type,
            };
        }
    }
    RouteDecision::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user;

    fn session_for(user_type: UserType) -> Session {
        Session {
            user: Some(user::fixture(user_type)),
            token: Some("tok".to_string()),
            is_authenticated: true,
        }
    }

    #[test]
    fn test_unauthenticated_always_redirects_to_login() {
        let session = Session::default();
        for required in [None, Some(UserType::Employee), Some(UserType::Admin)] {
            let decision = evaluate(&session, required, "/employer/jobs");
            assert_eq!(
                decision,
                RouteDecision::RedirectToLogin {
                    from: "/employer/jobs".to_string()
                }
            );
            assert_eq!(decision.redirect_path().as_deref(), Some("/login"));
        }
    }

    #[test]
    fn test_wrong_role_bounces_to_own_dashboard() {
        let session = session_for(UserType::Employee);
        let decision = evaluate(&session, Some(UserType::Employer), "/employer/dashboard");
        assert_eq!(
            decision,
            RouteDecision::RedirectToDashboard {
                user_type: UserType::Employee
            }
        );
        assert_eq!(
            decision.redirect_path().as_deref(),
            Some("/employee/dashboard")
        );
    }

    #[test]
    fn test_matching_role_renders() {
        let session = session_for(UserType::Admin);
        assert_eq!(
            evaluate(&session, Some(UserType::Admin), "/admin/users"),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_no_required_role_renders_for_any_authenticated_user() {
        let session = session_for(UserType::Employee);
        assert_eq!(evaluate(&session, None, "/profile"), RouteDecision::Render);
    }

    #[test]
    fn test_missing_token_redirects_even_if_flag_is_forged() {
        // a hand-edited snapshot can carry a flag that disagrees with the fields
        let mut session = session_for(UserType::Employee);
        session.token = None;
        let decision = evaluate(&session, None, "/profile");
        assert!(matches!(decision, RouteDecision::RedirectToLogin { .. }));
    }
}
