use crate::{
    app_lib::Destination,
    components::{Alert, AlertKind, AppShell, Button, ButtonVariant, Spinner, use_toasts},
    features::{
        auth::{RequireAuth, state::use_auth},
        users::{
            client::UsersApi,
            edit::{EditPhase, EditUserViewModel, LOOKUP_PAGE, SubmitOutcome},
        },
    },
};
use leptos::{
    ev::{MouseEvent, SubmitEvent},
    prelude::*,
    task::spawn_local,
};
use leptos_router::{
    hooks::{use_navigate, use_params},
    params::Params,
};

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

#[derive(Params, PartialEq, Clone)]
struct EditParams {
    id: Option<u64>,
}

#[component]
pub fn EditUserPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireAuth>
                <EditUserForm />
            </RequireAuth>
        </AppShell>
    }
}

#[component]
fn EditUserForm() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let params = use_params::<EditParams>();
    let state = RwSignal::new(EditUserViewModel::new());

    // Re-runs when the route id changes; an unparsable id cannot match anyone.
    Effect::new(move |_| {
        let id = params.get().ok().and_then(|params| params.id).unwrap_or(0);
        let Some(ticket) = state.try_update(|state| state.begin_load(id)) else {
            return;
        };
        spawn_local(async move {
            let result = match auth.api_client() {
                Ok(api) => api.list_users(LOOKUP_PAGE).await,
                Err(err) => Err(err),
            };
            state.try_update(|state| state.finish_load(ticket, result, &toasts));
        });
    });

    let redirect = RwSignal::new(None::<Destination>);
    Effect::new(move |_| {
        if let Some(destination) = redirect.get() {
            navigate(&destination.path(), Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let Some(Ok(ticket)) = state.try_update(EditUserViewModel::begin_submit) else {
            return;
        };
        spawn_local(async move {
            let result = match auth.api_client() {
                Ok(api) => api.update_user(ticket.id, &ticket.update).await,
                Err(err) => Err(err),
            };
            let outcome = state.try_update(|state| state.finish_submit(&ticket, result, &toasts));
            if let Some(SubmitOutcome::Saved(destination)) = outcome {
                redirect.set(Some(destination));
            }
        });
    };
    let on_cancel = move |_: MouseEvent| {
        redirect.set(Some(state.with_untracked(EditUserViewModel::cancel)));
    };
    let submitting = Signal::derive(move || state.with(EditUserViewModel::is_submitting));
    // Only a phase change swaps the screen; field edits must not rebuild the form.
    let phase = Memo::new(move |_| state.with(EditUserViewModel::phase));

    view! {
        {move || match phase.get() {
            EditPhase::Idle | EditPhase::Loading => {
                view! { <Spinner label="Loading user..." /> }.into_any()
            }
            EditPhase::NotFound => {
                view! { <Alert kind=AlertKind::Info message="User not found" /> }.into_any()
            }
            EditPhase::Editing => {
                view! {
                    <form class="max-w-lg space-y-5" on:submit=on_submit>
                        <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                            "Edit user"
                        </h1>
                        <div>
                            <label class=LABEL_CLASS for="first_name">"First name"</label>
                            <input
                                id="first_name"
                                type="text"
                                class=INPUT_CLASS
                                required
                                prop:value=move || state.with(|state| state.form().first_name.clone())
                                on:input=move |event| {
                                    state.update(|state| state.set_first_name(event_target_value(&event)))
                                }
                            />
                        </div>
                        <div>
                            <label class=LABEL_CLASS for="last_name">"Last name"</label>
                            <input
                                id="last_name"
                                type="text"
                                class=INPUT_CLASS
                                required
                                prop:value=move || state.with(|state| state.form().last_name.clone())
                                on:input=move |event| {
                                    state.update(|state| state.set_last_name(event_target_value(&event)))
                                }
                            />
                        </div>
                        <div>
                            <label class=LABEL_CLASS for="email">"Email"</label>
                            <input
                                id="email"
                                type="email"
                                class=INPUT_CLASS
                                required
                                prop:value=move || state.with(|state| state.form().email.clone())
                                on:input=move |event| {
                                    state.update(|state| state.set_email(event_target_value(&event)))
                                }
                            />
                        </div>
                        {move || {
                            state
                                .with(|state| state.last_error().cloned())
                                .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
                        }}
                        <div class="flex gap-3">
                            <Button button_type="submit" disabled=submitting>
                                {move || if submitting.get() { "Saving..." } else { "Save" }}
                            </Button>
                            <button
                                type="button"
                                class=ButtonVariant::Secondary.class()
                                on:click=on_cancel
                            >
                                "Cancel"
                            </button>
                        </div>
                    </form>
                }
                    .into_any()
            }
        }}
    }
}
