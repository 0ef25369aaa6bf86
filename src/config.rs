/// Extension settings, timings and host page selectors

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Used when no endpoint has been saved
pub const DEFAULT_API_ENDPOINT: &str = "https://twitterhot.vercel.app/api/update";

/// chrome.storage.sync key holding the endpoint
pub const ENDPOINT_STORAGE_KEY: &str = "apiEndpoint";

pub const MENU_RENDER_DELAY_MS: i32 = 100;
pub const NAVIGATION_SETTLE_DELAY_MS: i32 = 1000;
pub const NOTICE_SHOW_DELAY_MS: i32 = 10;
pub const NOTICE_DURATION_MS: i32 = 3000;
pub const NOTICE_FADE_MS: i32 = 300;
pub const STATUS_DURATION_MS: i32 = 3000;

/// Selectors owned by the host page
pub mod selectors {
    pub const POST: &str = r#"article[data-testid="tweet"]"#;
    pub const STATUS_LINK: &str = r#"a[href*="/status/"]"#;
    pub const MORE_BUTTON: &str = r#"[data-testid="caret"]"#;
    pub const MAIN: &str = "main";
    pub const OPEN_MENU: &str = r#"[role="menu"]"#;
    pub const MENU_LIST: &str = r#"[data-testid="Dropdown"]"#;
    pub const MENU_ITEM: &str = r#"[role="menuitem"]"#;
    pub const INJECTED_ITEM: &str = ".hot-content-menu-item";
    pub const NOTIFICATION: &str = ".hot-content-notification";
}

/// Why an endpoint entered in the popup was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Please enter an API endpoint")]
    Empty,
    #[error("Invalid URL format")]
    InvalidUrl,
}

/// Settings as stored in chrome.storage.sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

impl Settings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Settings {
            api_endpoint: Some(endpoint.into()),
        }
    }

    /// What the settings field shows: the saved endpoint, or blank when
    /// nothing was saved so the default is never stored by accident
    pub fn stored_endpoint(&self) -> String {
        self.api_endpoint
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }

    /// The configured endpoint, or the built-in fallback when unset or blank
    pub fn endpoint(&self) -> String {
        self.api_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_API_ENDPOINT)
            .to_string()
    }
}

/// Check an endpoint before saving it. Returns the trimmed value.
pub fn validate_endpoint(input: &str) -> Result<String, SettingsError> {
    let endpoint = input.trim();
    if endpoint.is_empty() {
        return Err(SettingsError::Empty);
    }

    let url = Url::parse(endpoint).map_err(|_| SettingsError::InvalidUrl)?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(SettingsError::InvalidUrl);
    }

    Ok(endpoint.to_string())
}
