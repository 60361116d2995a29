//! User route group re-exported by the top-level routing module.

mod edit;
mod list;

pub(crate) use edit::EditUserPage;
pub(crate) use list::UsersListPage;
