//! Client for the login endpoint. A rejected login surfaces as
//! [`AppError::Authentication`] carrying the server's reason; transport
//! failures keep their own variants. The password is only exposed while the
//! request body is serialized.

use crate::{
    app_lib::{ApiClient, AppError, TokenStorage},
    features::auth::types::{LoginRequest, LoginResponse},
};
use secrecy::{ExposeSecret, SecretString};

pub trait AuthApi {
    /// `POST /login`; returns the session token.
    async fn login(&self, email: &str, password: &SecretString) -> Result<String, AppError>;
}

impl<S: TokenStorage> AuthApi for ApiClient<S> {
    async fn login(&self, email: &str, password: &SecretString) -> Result<String, AppError> {
        let request = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let response: LoginResponse = self
            .post_json_response("/login", &request)
            .await
            .map_err(rejection_to_auth_error)?;
        Ok(response.token)
    }
}

fn rejection_to_auth_error(err: AppError) -> AppError {
    match err {
        AppError::Http { message, .. } => AppError::Authentication(message),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::AuthApi;
    use crate::app_lib::AppError;
    use secrecy::{ExposeSecret, SecretString};
    use std::cell::RefCell;

    /// Answers every login with a fixed result and records the credentials.
    pub struct FakeAuthApi {
        result: Result<String, AppError>,
        pub calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeAuthApi {
        pub fn accepting(token: &str) -> Self {
            Self {
                result: Ok(token.to_string()),
                calls: RefCell::default(),
            }
        }

        pub fn rejecting(error: AppError) -> Self {
            Self {
                result: Err(error),
                calls: RefCell::default(),
            }
        }
    }

    impl AuthApi for FakeAuthApi {
        async fn login(&self, email: &str, password: &SecretString) -> Result<String, AppError> {
            self.calls
                .borrow_mut()
                .push((email.to_string(), password.expose_secret().to_string()));
            self.result.clone()
        }
    }

    /// Never answers; used to abandon a login mid-flight.
    pub struct StalledAuthApi;

    impl AuthApi for StalledAuthApi {
        async fn login(&self, _email: &str, _password: &SecretString) -> Result<String, AppError> {
            std::future::pending().await
        }
    }
}
