//! Users feature: listing, search, edit and delete against the users API.

pub(crate) mod client;
pub(crate) mod edit;
pub(crate) mod list;
pub(crate) mod search;
pub(crate) mod types;
