//! Shared frontend utilities: API access, session persistence, configuration,
//! errors, user feedback seams and build metadata.
//!
//! ## Request flow
//!
//! 1. **Login:** `POST /login` with the credentials; the returned token is
//!    written to the session store (`localStorage["token"]`).
//! 2. **Calls:** every later request goes through [`api::ApiClient`], which
//!    attaches `Authorization: Bearer <token>` when a token is stored.
//! 3. **Expiry:** there is no local expiry check. A 401 from the listing is the
//!    first sign of a dead token and sends the user back to `/login`.
//! 4. **Logout:** clears the stored token; nothing else ever clears it.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must not log tokens or
//! passwords.

pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod feedback;
pub(crate) mod nav;
pub(crate) mod session;
pub(crate) mod telemetry;

pub(crate) use api::ApiClient;
pub(crate) use errors::AppError;
pub(crate) use feedback::{Confirm, Notice, NoticeKind, Notifier};
pub(crate) use nav::Destination;
pub(crate) use session::{SessionStore, TokenStorage};
