//! Shared layout wrapper: header with navigation and sign-out, the toast
//! stack and a build footer. Navigation is client-side only; the API still
//! enforces access.

use crate::{
    app_lib::{Destination, build_info, nav},
    components::ToastStack,
    features::auth::state::use_auth,
};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_navigate};

const NAV_LINK_CLASS: &str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let navigate = use_navigate();
    let redirect = RwSignal::new(None::<Destination>);

    Effect::new(move |_| {
        if let Some(destination) = redirect.get() {
            navigate(&destination.path(), Default::default());
        }
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200 dark:border-gray-700 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A href=nav::USERS {..} class="flex items-center space-x-3 rtl:space-x-reverse">
                        <span class="font-semibold whitespace-nowrap dark:text-white">
                            "Users Admin"
                        </span>
                    </A>
                    <ul class="font-medium flex flex-row items-center space-x-8">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| {
                                view! {
                                    <li>
                                        <A href=nav::LOGIN {..} class=NAV_LINK_CLASS>
                                            "Sign In"
                                        </A>
                                    </li>
                                }
                            }
                        >
                            <li>
                                <A href=nav::USERS {..} class=NAV_LINK_CLASS>
                                    "Users"
                                </A>
                            </li>
                            <li>
                                <button type="button" class=NAV_LINK_CLASS on:click=move |_| redirect.set(Some(auth.sign_out()))>
                                    "Sign Out"
                                </button>
                            </li>
                        </Show>
                    </ul>
                </div>
            </header>
            <ToastStack />
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">{children()}</div>
            </main>
            <footer class="p-4 text-center text-xs text-gray-400">
                {format!("build {}", build_info::build_label())}
            </footer>
        </div>
    }
}
