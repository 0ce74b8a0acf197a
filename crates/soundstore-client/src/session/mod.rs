//! Session management for the catalog API.
//!
//! This module owns the authentication token lifecycle: the injected
//! credential store the token and its expiration are persisted in, the
//! session manager that performs login/refresh/logout, and the route guard
//! that decides whether admin-gated operations may proceed.

mod guard;
mod manager;
mod store;

pub use guard::{
    ADMIN_ROLE, GuardState, LOGIN_REDIRECT, UNAUTHORIZED_REDIRECT, evaluate, evaluate_at,
};
pub use manager::{LoginRequest, SESSION_TTL, SessionManager, User};
pub use store::{
    AUTH_EXPIRATION_KEY, AUTH_TOKEN_KEY, CredentialStore, FileCredentialStore,
    MemoryCredentialStore,
};
