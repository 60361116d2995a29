use crate::{
    components::{Alert, AlertKind, AppShell, Button, Spinner, use_toasts},
    features::auth::{
        client::AuthApi,
        login::{LoginOutcome, LoginViewModel},
        state::use_auth,
    },
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use secrecy::ExposeSecret;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let form = RwSignal::new(LoginViewModel::new());
    let submitting = Signal::derive(move || form.with(LoginViewModel::is_submitting));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let Some(Ok(attempt)) = form.try_update(LoginViewModel::begin_submit) else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match auth.api_client() {
                Ok(api) => api.login(&attempt.email, &attempt.password).await,
                Err(err) => Err(err),
            };
            let session = auth.session();
            let outcome = form.try_update(|form| form.finish_submit(result, &session, &toasts));
            if let Some(LoginOutcome::SignedIn(destination)) = outcome {
                auth.refresh();
                navigate(&destination.path(), Default::default());
            }
        });
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Sign in"</h1>
                <div>
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="email"
                    >
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        required
                        prop:value=move || form.with(|form| form.email().to_string())
                        on:input=move |event| {
                            form.update(|form| form.set_email(event_target_value(&event)))
                        }
                    />
                </div>
                <div>
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="password"
                    >
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        autocomplete="current-password"
                        required
                        prop:value=move || {
                            form.with(|form| form.password().expose_secret().to_string())
                        }
                        on:input=move |event| {
                            form.update(|form| form.set_password(event_target_value(&event)))
                        }
                    />
                </div>
                <Button button_type="submit" disabled=submitting>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </Button>
                {move || submitting.get().then_some(view! { <Spinner /> })}
                {move || {
                    form.with(|form| form.last_error().cloned())
                        .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
                }}
            </form>
        </AppShell>
    }
}
