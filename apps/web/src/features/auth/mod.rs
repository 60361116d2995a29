//! Auth feature: the login call, the login form state and the session context.
//! Token material and passwords pass through here and must never be logged.

pub(crate) mod client;
#[cfg(target_arch = "wasm32")]
mod guards;
pub(crate) mod login;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub(crate) mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::RequireAuth;
