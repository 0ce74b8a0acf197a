//! Session manager
//!
//! Single source of truth for "is there a valid admin session". Owns the
//! login/refresh/logout lifecycle: login stores the token and its
//! expiration, the profile fetch populates the user, and any profile
//! failure tears the session down so a stale token never lingers.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::TRACING_TARGET_SESSION;
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{Error, Result};
use crate::session::store::{AUTH_EXPIRATION_KEY, AUTH_TOKEN_KEY};

/// Fixed session lifetime, counted from a successful login.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_mins(60);

/// Profile of the logged-in user, as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

/// Credentials submitted to `POST /users/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Login response payload: the profile plus the issued bearer token.
#[derive(Debug, Clone, Deserialize)]
struct LoginValue {
    #[serde(flatten)]
    user: User,
    token: String,
}

/// Owns the authentication token, its expiration, and the current user
/// profile.
///
/// The token and expiration are persisted in the client's credential store
/// and are always written and cleared together; `user` is populated only
/// by a successful profile fetch with the current token.
#[derive(Debug)]
pub struct SessionManager {
    client: ApiClient,
    user: Option<User>,
    loading: bool,
}

impl SessionManager {
    /// Creates a session manager over the given client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: None,
            loading: false,
        }
    }

    /// The shared API client this session operates through.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Profile of the logged-in user, if the session is established.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True when the last profile fetch with the current token succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True strictly while a login or profile fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The persisted bearer token, if any.
    pub fn stored_token(&self) -> Option<String> {
        self.client.credentials().get(AUTH_TOKEN_KEY)
    }

    /// The persisted session expiration, if present and parseable.
    pub fn stored_expiration(&self) -> Option<Timestamp> {
        self.client
            .credentials()
            .get(AUTH_EXPIRATION_KEY)
            .and_then(|raw| raw.parse().ok())
    }

    /// Whether the stored session is expired at `now`.
    ///
    /// A token with a missing or unparseable expiration counts as expired:
    /// the two slots are only ever written together, so a lone token is an
    /// invalid state.
    pub fn session_expired(&self, now: Timestamp) -> bool {
        if self.stored_token().is_none() {
            return false;
        }
        match self.stored_expiration() {
            Some(expires_at) => expires_at <= now,
            None => true,
        }
    }

    /// Authenticates against `POST /users/login`, stores the token and its
    /// expiration, and fetches the profile.
    ///
    /// # Errors
    ///
    /// Returns an invalid-credentials error when the server rejects the
    /// login, a network error on transport failure, and a validation error
    /// for locally rejected credentials.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<&User> {
        request.validate()?;

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            email = %request.email,
            "Logging in"
        );

        self.loading = true;
        let outcome = self
            .client
            .post_value::<_, LoginValue>(&endpoints::login(), request)
            .await;
        self.loading = false;

        let value = match outcome {
            Ok(value) => value,
            Err(Error::Api { message, .. }) => {
                tracing::info!(
                    target: TRACING_TARGET_SESSION,
                    "Login rejected by server"
                );
                return Err(Error::invalid_credentials(message));
            }
            Err(err) => return Err(err),
        };

        let expires_at = Timestamp::now()
            .checked_add(SESSION_TTL)
            .unwrap_or(Timestamp::MAX);

        let store = self.client.credentials();
        store.set(AUTH_TOKEN_KEY, &value.token)?;
        store.set(AUTH_EXPIRATION_KEY, &expires_at.to_string())?;

        tracing::info!(
            target: TRACING_TARGET_SESSION,
            expires_at = %expires_at,
            "Session established"
        );

        self.fetch_profile().await
    }

    /// Fetches the profile with the stored token via `GET /users/me`.
    ///
    /// On any failure (transport, non-2xx, or a domain failure) the session
    /// is torn down: both persisted slots are cleared and `user` is reset.
    pub async fn fetch_profile(&mut self) -> Result<&User> {
        if self.stored_token().is_none() {
            self.teardown();
            return Err(Error::NotAuthenticated);
        }

        self.loading = true;
        let outcome = self.client.get_value::<User>(&endpoints::me()).await;
        self.loading = false;

        match outcome {
            Ok(user) => {
                tracing::debug!(
                    target: TRACING_TARGET_SESSION,
                    user_id = %user.id,
                    role = %user.role,
                    "Profile fetched"
                );
                Ok(self.user.insert(user))
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    error = %err,
                    "Profile fetch failed, tearing down session"
                );
                self.teardown();
                Err(err)
            }
        }
    }

    /// Re-runs the profile fetch with the stored token.
    ///
    /// Used at startup and after entering a protected area, to pick up
    /// out-of-band session state.
    pub async fn refresh(&mut self) -> Result<&User> {
        self.fetch_profile().await
    }

    /// Clears the token, expiration, and user unconditionally. Local only,
    /// no network call.
    pub fn logout(&mut self) {
        tracing::info!(target: TRACING_TARGET_SESSION, "Logging out");
        self.teardown();
    }

    /// Clears both persisted slots and the in-memory user.
    pub(crate) fn teardown(&mut self) {
        let store = self.client.credentials();
        if let Err(err) = store.remove(AUTH_TOKEN_KEY) {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                error = %err,
                "Failed to clear stored token"
            );
        }
        if let Err(err) = store.remove(AUTH_EXPIRATION_KEY) {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                error = %err,
                "Failed to clear stored expiration"
            );
        }
        self.user = None;
    }

    #[cfg(test)]
    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    #[cfg(test)]
    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
