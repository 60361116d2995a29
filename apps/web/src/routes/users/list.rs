//! Users list route: search over the current page, pagination and delete.
//! Loads go through the list view-model's tickets so a slow response for a
//! page the user already left is dropped.

use crate::{
    app_lib::{Destination, feedback::BrowserConfirm},
    components::{Alert, AlertKind, AppShell, Button, ButtonVariant, Spinner, use_toasts},
    features::{
        auth::{RequireAuth, state::use_auth},
        users::{
            client::UsersApi,
            list::{LoadOutcome, LoadTicket, UsersListViewModel},
        },
    },
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{components::A, hooks::use_navigate};

const TH_CLASS: &str =
    "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireAuth>
                <UsersTable />
            </RequireAuth>
        </AppShell>
    }
}

#[component]
fn UsersTable() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let state = RwSignal::new(UsersListViewModel::new());
    let redirect = RwSignal::new(None::<Destination>);

    Effect::new(move |_| {
        if let Some(destination) = redirect.get() {
            navigate(&destination.path(), Default::default());
        }
    });

    let load = move |ticket: LoadTicket| {
        spawn_local(async move {
            let result = match auth.api_client() {
                Ok(api) => api.list_users(ticket.page).await,
                Err(err) => Err(err),
            };
            let outcome = state.try_update(|state| state.finish_load(ticket, result, &toasts));
            if let Some(LoadOutcome::SessionExpired) = outcome {
                redirect.set(Some(Destination::Login));
            }
        });
    };

    if let Some(ticket) = state.try_update(|state| state.begin_load(1)) {
        load(ticket);
    }

    let previous = Callback::new(move |()| {
        if let Some(ticket) = state.try_update(UsersListViewModel::request_previous).flatten() {
            load(ticket);
        }
    });
    let next = Callback::new(move |()| {
        if let Some(ticket) = state.try_update(UsersListViewModel::request_next).flatten() {
            load(ticket);
        }
    });

    let delete = move |id: u64| {
        let Some(ticket) = state
            .try_update(|state| state.begin_delete(id, &BrowserConfirm))
            .flatten()
        else {
            return;
        };
        spawn_local(async move {
            let result = match auth.api_client() {
                Ok(api) => api.delete_user(ticket.id).await,
                Err(err) => Err(err),
            };
            state.try_update(|state| state.finish_delete(ticket, result, &toasts));
        });
    };

    let rows = move || {
        state.with(|state| {
            state
                .filtered()
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Users"</h1>
                <input
                    type="search"
                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-64 p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                    placeholder="Search users..."
                    prop:value=move || state.with(|state| state.search_term().to_string())
                    on:input=move |event| {
                        state.update(|state| state.set_search_term(event_target_value(&event)))
                    }
                />
            </div>

            {move || {
                state
                    .with(|state| state.last_error().cloned())
                    .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
            }}

            <Show
                when=move || !state.with(UsersListViewModel::is_loading)
                fallback=|| view! { <Spinner label="Loading users..." /> }
            >
                <div class="overflow-hidden bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg">
                    <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                        <thead class="bg-gray-50 dark:bg-gray-900/50">
                            <tr>
                                <th scope="col" class=TH_CLASS>"Avatar"</th>
                                <th scope="col" class=TH_CLASS>"Name"</th>
                                <th scope="col" class=TH_CLASS>"Email"</th>
                                <th scope="col" class=TH_CLASS>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                            <Show
                                when=move || !rows().is_empty()
                                fallback=|| {
                                    view! {
                                        <tr>
                                            <td colspan="4" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                                "No users found."
                                            </td>
                                        </tr>
                                    }
                                }
                            >
                                <For
                                    each=rows
                                    key=|user| user.id
                                    children=move |user| {
                                        let id = user.id;
                                        let name = user.full_name();
                                        let deleting = move || state.with(|state| state.is_deleting(id));
                                        view! {
                                            <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
                                                <td class="px-6 py-4">
                                                    <img class="h-10 w-10 rounded-full" src=user.avatar alt=name.clone() />
                                                </td>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900 dark:text-white">
                                                    {name}
                                                </td>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400">
                                                    {user.email}
                                                </td>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm font-medium space-x-3">
                                                    <A
                                                        href=Destination::EditUser(id).path()
                                                        {..}
                                                        class="text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300"
                                                    >
                                                        "Edit"
                                                    </A>
                                                    <Button
                                                        variant=ButtonVariant::Danger
                                                        disabled=Signal::derive(deleting)
                                                        on_click=Callback::new(move |()| delete(id))
                                                    >
                                                        "Delete"
                                                    </Button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </Show>
                        </tbody>
                    </table>
                </div>
            </Show>

            <div class="flex items-center justify-between">
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=Signal::derive(move || !state.with(UsersListViewModel::can_go_previous))
                    on_click=previous
                >
                    "Previous"
                </Button>
                <span class="text-sm text-gray-700 dark:text-gray-300">
                    {move || state.with(UsersListViewModel::page_label)}
                </span>
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=Signal::derive(move || !state.with(UsersListViewModel::can_go_next))
                    on_click=next
                >
                    "Next"
                </Button>
            </div>
        </div>
    }
}
