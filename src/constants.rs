//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Default base URL of the backend gateway
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the gateway base URL
pub const API_BASE_URL_ENV: &str = "BASINVIEW_API_BASE_URL";

/// Default project folder requested on startup
pub const DEFAULT_PROJECT_FOLDER: &str = "Jenette_Creek_Watershed";

/// Attempts for the initial project listing call
pub const LIST_FILES_ATTEMPTS: u32 = 5;

/// Fixed delay between project listing attempts
pub const LIST_FILES_RETRY_DELAY: Duration = Duration::from_secs(2);

/// HTTP client timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default display duration for a notice
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Tick driving notice expiry in the app actor
pub const NOTICE_TICK: Duration = Duration::from_millis(250);

/// File name of the backend sidecar, without platform suffix
pub const SIDECAR_STEM: &str = "apppy";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Basinview";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve the gateway base URL, honoring the environment override
pub fn api_base_url() -> String {
    std::env::var(API_BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}
