//! Backend Connection
//!
//! Resolves the analytics service URL and builds the HTTP client.

use attrition::config::DEFAULT_API_URL;
use attrition::{ApiConfig, HttpApiClient};

/// Local storage key holding a user-chosen backend URL
pub const API_URL_STORAGE_KEY: &str = "attrition_api_url";

/// Backend URL baked in at build time, if any
const BUILD_API_URL: Option<&str> = option_env!("ATTRITION_API_URL");

/// Get the API base URL: local storage, then build-time env, then default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten());

    resolve_api_base(stored.as_deref(), BUILD_API_URL)
}

/// Store the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_STORAGE_KEY, url.trim());
        }
    }
}

/// Forget the stored URL so the build-time or default URL applies again
pub fn clear_api_base() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(API_URL_STORAGE_KEY);
        }
    }
}

fn resolve_api_base(stored: Option<&str>, build: Option<&str>) -> String {
    let url = [stored, build]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL);

    url.trim_end_matches('/').to_string()
}

pub fn client(base_url: &str) -> HttpApiClient {
    HttpApiClient::new(&ApiConfig::new(base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_resolve_prefers_stored_url() {
        assert_eq!(
            resolve_api_base(Some("https://hr.example.com/api/"), Some("http://build:9000")),
            "https://hr.example.com/api"
        );
    }

    #[wasm_bindgen_test]
    fn test_resolve_falls_back() {
        assert_eq!(resolve_api_base(Some("  "), Some("http://build:9000")), "http://build:9000");
        assert_eq!(resolve_api_base(None, None), DEFAULT_API_URL);
    }
}
