mod login;
mod not_found;
mod users;

pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use users::{EditUserPage, UsersListPage};

use crate::app_lib::nav;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <Redirect path=nav::USERS /> } />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/users") view=UsersListPage />
            <Route path=path!("/users/:id/edit") view=EditUserPage />
        </Routes>
    }
}
