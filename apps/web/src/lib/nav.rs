//! Screens the view-models can ask to move to. The route layer performs the
//! navigation; feature code only returns a `Destination`.

pub const LOGIN: &str = "/login";
pub const USERS: &str = "/users";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Login,
    Users,
    EditUser(u64),
}

impl Destination {
    pub fn path(&self) -> String {
        match self {
            Destination::Login => LOGIN.to_string(),
            Destination::Users => USERS.to_string(),
            Destination::EditUser(id) => user_edit(*id),
        }
    }
}

pub fn user_edit(id: u64) -> String {
    format!("{USERS}/{id}/edit")
}
