//! Route guard
//!
//! Decides whether protected content may render. The check is evaluated on
//! every call rather than once, because the token can expire while the
//! application is open; detecting an expired session clears the persisted
//! slots as a side effect.

use jiff::Timestamp;

use crate::TRACING_TARGET_SESSION;
use crate::session::manager::SessionManager;

/// Role required for administrative operations.
pub const ADMIN_ROLE: &str = "Admin";

/// Redirect target for unauthenticated sessions.
pub const LOGIN_REDIRECT: &str = "/login";

/// Redirect target for authenticated users without the admin role.
pub const UNAUTHORIZED_REDIRECT: &str = "/unauthorized";

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// A session fetch is in flight; render a placeholder, never redirect.
    Loading,
    /// No valid session; redirect to the login page.
    Unauthenticated,
    /// Valid session without the admin role; redirect to the unauthorized page.
    AuthenticatedNonAdmin,
    /// Valid admin session; render protected content.
    AuthenticatedAdmin,
}

impl GuardState {
    /// Redirect target for this state, if any.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GuardState::Loading | GuardState::AuthenticatedAdmin => None,
            GuardState::Unauthenticated => Some(LOGIN_REDIRECT),
            GuardState::AuthenticatedNonAdmin => Some(UNAUTHORIZED_REDIRECT),
        }
    }

    /// Whether protected content may render.
    pub fn allows_admin(&self) -> bool {
        matches!(self, GuardState::AuthenticatedAdmin)
    }
}

/// Evaluates the guard against the session at the current instant.
pub fn evaluate(session: &mut SessionManager) -> GuardState {
    evaluate_at(session, Timestamp::now())
}

/// Evaluates the guard against the session at `now`.
///
/// An expired session is torn down here, clearing the stored token and
/// expiration together before redirecting to login.
pub fn evaluate_at(session: &mut SessionManager, now: Timestamp) -> GuardState {
    if session.is_loading() {
        return GuardState::Loading;
    }

    if session.session_expired(now) {
        tracing::info!(
            target: TRACING_TARGET_SESSION,
            "Session expired, clearing credentials"
        );
        session.teardown();
        return GuardState::Unauthenticated;
    }

    let Some(user) = session.user() else {
        return GuardState::Unauthenticated;
    };

    if user.role != ADMIN_ROLE {
        tracing::warn!(
            target: TRACING_TARGET_SESSION,
            role = %user.role,
            "Authenticated user lacks the admin role"
        );
        return GuardState::AuthenticatedNonAdmin;
    }

    GuardState::AuthenticatedAdmin
}
