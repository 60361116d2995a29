//! HTTP plumbing for the users REST API. Feature clients go through
//! [`ApiClient`] so every request gets the same URL building, session header
//! and error mapping. The stored token is attached when present; a missing
//! token is not checked here and the request is sent anyway, leaving the
//! server to reject it. Never log the token or request bodies.

use super::{
    config::AppConfig,
    errors::AppError,
    session::{SessionStore, TokenStorage},
};
use reqwest::{Client, Method, RequestBuilder, Response, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Shared HTTP client bound to one API base URL and one session store.
#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    session: SessionStore<S>,
    timeout: Duration,
}

impl<S: TokenStorage> ApiClient<S> {
    /// Builds a client from configuration.
    pub fn new(config: &AppConfig, session: SessionStore<S>) -> Result<Self, AppError> {
        let base_url = config.api_base()?;
        let mut client = Self::with_base_url(base_url.as_str(), session);
        client.api_key = config.api_key.clone();
        Ok(client)
    }

    /// Builds a client against an explicit base URL.
    pub fn with_base_url(base_url: &str, session: SessionStore<S>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: None,
            session,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, request).await?;
        handle_json_response(response).await
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post_json_response<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        handle_json_response(response).await
    }

    /// PATCH a JSON body; the response body is ignored.
    pub async fn patch_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self.request(Method::PATCH, path).json(body);
        let response = self.send(Method::PATCH, path, request).await?;
        handle_empty_response(response).await
    }

    /// DELETE a resource; expects 204 or any other success status.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let request = self.request(Method::DELETE, path);
        let response = self.send(Method::DELETE, path, request).await?;
        handle_empty_response(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, build_url_with_base(&self.base_url, path))
            .timeout(self.timeout);

        if let Some(token) = self.session.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.as_str());
        }

        builder
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, AppError> {
        let span = info_span!(
            "users_api.request",
            http.method = method.as_str(),
            path = %path
        );
        let response = request
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;
        debug!(
            status = response.status().as_u16(),
            http.method = method.as_str(),
            path,
            "api response"
        );
        Ok(response)
    }
}

/// Builds a URL from a base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message(&body),
    }
}

/// Prefers the API's `{"error": "..."}` field over the raw body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string));

    sanitize_body(from_json.as_deref().unwrap_or(body))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
