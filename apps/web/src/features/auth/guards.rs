use crate::{app_lib::nav, features::auth::state::use_auth};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Renders `children` only while a token is stored; otherwise sends the user to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !auth.is_authenticated.get() {
            // UX-only guard; the API still rejects bad tokens.
            navigate(nav::LOGIN, Default::default());
        }
    });

    view! {
        <Show when=move || auth.is_authenticated.get()>
            {children()}
        </Show>
    }
}
