//! Users admin console: a Leptos CSR app over the reqres users API. The state
//! behind each screen lives in `features` and builds natively so it can be
//! tested without a browser; rendering is wasm-only.

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
mod app;
#[path = "lib/mod.rs"]
mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
mod features;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
use crate::app::App;
#[cfg(target_arch = "wasm32")]
use crate::app_lib::{build_info, config::AppConfig, telemetry};
#[cfg(target_arch = "wasm32")]
use leptos::prelude::mount_to_body;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    let config = AppConfig::load();
    if let Err(err) = telemetry::init(&config.log_level) {
        web_sys::console::error_1(&format!("Failed to initialize logging: {err}").into());
    }
    tracing::info!(
        build = %build_info::build_label(),
        api = %config.api_base_url,
        "starting users admin"
    );
    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
