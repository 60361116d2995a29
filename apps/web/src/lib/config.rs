//! Build-time configuration for the users API with an optional runtime
//! override. The runtime config is read from `window.USERS_ADMIN_CONFIG`
//! (if present) so static deployments can point at another API without
//! rebuilding. Configuration values are public; do not store secrets here.

use super::errors::AppError;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Sent as `x-api-key` when present; reqres requires one on some plans.
    pub api_key: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env();

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("USERS_ADMIN_API_BASE_URL")
                .and_then(normalize_runtime_value)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_key: option_env!("USERS_ADMIN_API_KEY").and_then(normalize_runtime_value),
            log_level: option_env!("USERS_ADMIN_LOG_LEVEL")
                .and_then(normalize_runtime_value)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Parses the API base URL, rejecting anything that is not http(s).
    pub fn api_base(&self) -> Result<Url, AppError> {
        let url = Url::parse(self.api_base_url.trim()).map_err(|err| {
            AppError::Config(format!("Invalid API base URL '{}': {err}", self.api_base_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            ))),
        }
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    api_key: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.api_key {
        config.api_key = Some(value);
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("USERS_ADMIN_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        api_key: read_runtime_value(&object, "api_key"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
