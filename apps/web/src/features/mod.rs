//! Domain-level frontend features (auth, users). Routes import these modules
//! to keep view code focused on rendering; the state and API handling live here
//! and run natively under test.

pub(crate) mod auth;
pub(crate) mod users;
