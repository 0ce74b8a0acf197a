#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for API client operations.
///
/// Use this target for logging client initialization, request dispatch, and
/// client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "soundstore_client::client";

/// Tracing target for session lifecycle operations (login, refresh, teardown).
pub const TRACING_TARGET_SESSION: &str = "soundstore_client::session";

/// Tracing target for paginated accessor operations.
pub const TRACING_TARGET_ACCESSOR: &str = "soundstore_client::accessor";

pub mod accessor;
mod client;
mod config;
pub mod endpoints;
mod envelope;
pub mod error;
mod page;
#[doc(hidden)]
pub mod prelude;
pub mod resources;
pub mod session;

#[cfg(test)]
mod tests;

pub use crate::accessor::{FetchTicket, PagedAccessor, PagedQuery};
pub use crate::client::ApiClient;
pub use crate::config::{ApiBuilder, ApiBuilderError, ApiConfig};
pub use crate::envelope::{Envelope, PageValue};
pub use crate::error::{Error, Result};
pub use crate::page::{PageInfo, PageItem, page_items};
pub use crate::session::{GuardState, LoginRequest, SessionManager, User};
