//! Auth context shared through Leptos. The token itself stays in
//! `localStorage`; the signal mirrors it so guards and the shell re-render on
//! login and logout.

use crate::{
    app_lib::{
        ApiClient, AppError, Destination, SessionStore, config::AppConfig, session::LocalStorage,
    },
    features::auth::login,
};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub token: RwSignal<Option<String>>,
    pub is_authenticated: Signal<bool>,
    session: SessionStore<LocalStorage>,
}

impl AuthContext {
    fn new(session: SessionStore<LocalStorage>) -> Self {
        let token = RwSignal::new(session.token());
        let is_authenticated = Signal::derive(move || token.get().is_some());
        Self {
            token,
            is_authenticated,
            session,
        }
    }

    pub fn session(&self) -> SessionStore<LocalStorage> {
        self.session
    }

    /// API client over the configured base URL and this session's token.
    pub fn api_client(&self) -> Result<ApiClient<LocalStorage>, AppError> {
        ApiClient::new(&AppConfig::load(), self.session)
    }

    /// Re-reads the stored token, typically right after login.
    pub fn refresh(&self) {
        self.token.set(self.session.token());
    }

    pub fn sign_out(&self) -> Destination {
        let destination = login::logout(&self.session);
        self.token.set(None);
        destination
    }
}

/// Provides the auth context, seeded from whatever token is already stored.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(AuthContext::new(SessionStore::new(LocalStorage)));

    view! { {children()} }
}

/// Returns the current auth context or one built directly over storage.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .unwrap_or_else(|| AuthContext::new(SessionStore::new(LocalStorage)))
}
