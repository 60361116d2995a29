//! Login form state. A successful login writes the token to the session store
//! and asks to move to the users list; a failed one leaves any stored token
//! untouched. Logout is the only other place the token is cleared.

use crate::{
    app_lib::{AppError, Destination, Notice, Notifier, SessionStore, TokenStorage},
    features::auth::client::AuthApi,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

/// Demo account accepted by reqres.
pub const DEMO_EMAIL: &str = "eve.holt@reqres.in";
pub const DEMO_PASSWORD: &str = "cityslicka";
const LOGIN_SUCCEEDED: &str = "Login successful!";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A submit is already running; nothing was sent.
    InProgress,
    Invalid(AppError),
    SignedIn(Destination),
    Failed(AppError),
}

/// Credentials captured when a submit starts.
#[derive(Debug)]
pub struct LoginAttempt {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct LoginViewModel {
    email: String,
    password: SecretString,
    submitting: bool,
    last_error: Option<AppError>,
}

impl Default for LoginViewModel {
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: SecretString::from(DEMO_PASSWORD.to_string()),
            submitting: false,
            last_error: None,
        }
    }
}

impl LoginViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = SecretString::from(value.into());
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Checks required fields and marks the form as submitting.
    ///
    /// # Errors
    ///
    /// Returns the final outcome when nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<LoginAttempt, LoginOutcome> {
        if self.submitting {
            return Err(LoginOutcome::InProgress);
        }
        let email = self.email.trim();
        let missing = if email.is_empty() {
            Some("Email is required.")
        } else if self.password.expose_secret().is_empty() {
            Some("Password is required.")
        } else {
            None
        };
        if let Some(message) = missing {
            let err = AppError::Validation(message.to_string());
            self.last_error = Some(err.clone());
            return Err(LoginOutcome::Invalid(err));
        }

        self.submitting = true;
        self.last_error = None;
        Ok(LoginAttempt {
            email: email.to_string(),
            password: SecretString::from(self.password.expose_secret().to_string()),
        })
    }

    /// Applies the login result. `submitting` is cleared either way.
    pub fn finish_submit<S, N>(
        &mut self,
        result: Result<String, AppError>,
        session: &SessionStore<S>,
        notifier: &N,
    ) -> LoginOutcome
    where
        S: TokenStorage,
        N: Notifier + ?Sized,
    {
        self.submitting = false;

        match result.and_then(|token| session.set_token(&token)) {
            Ok(()) => {
                info!("login succeeded");
                notifier.notify(Notice::success(LOGIN_SUCCEEDED));
                LoginOutcome::SignedIn(Destination::Users)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                notifier.notify(Notice::error(LOGIN_FAILED));
                self.last_error = Some(err.clone());
                LoginOutcome::Failed(err)
            }
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub async fn submit<A, S, N>(
        &mut self,
        api: &A,
        session: &SessionStore<S>,
        notifier: &N,
    ) -> LoginOutcome
    where
        A: AuthApi,
        S: TokenStorage,
        N: Notifier + ?Sized,
    {
        let attempt = match self.begin_submit() {
            Ok(attempt) => attempt,
            Err(outcome) => return outcome,
        };
        let mut guard = SubmittingGuard { model: self };
        let result = api.login(&attempt.email, &attempt.password).await;
        guard.model.finish_submit(result, session, notifier)
    }
}

/// Clears `submitting` if a login future is dropped before it resolves.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
struct SubmittingGuard<'a> {
    model: &'a mut LoginViewModel,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.model.submitting = false;
    }
}

/// Clears the stored token and points back at the login screen.
pub fn logout<S: TokenStorage>(session: &SessionStore<S>) -> Destination {
    session.clear_token();
    info!("signed out");
    Destination::Login
}
