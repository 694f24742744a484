//! Application configuration.
//!
//! The defaults are embedded in the bundle; `CATALOG_API_BASE_URL` set at
//! build time overrides the backend address.

use leptos::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Default backend store, sent as `DBServer`
    #[serde(default)]
    pub db_server: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            db_server: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    /// Delay before leaving the wizard after a successful create
    pub success_redirect_ms: u32,
    /// How long transient error messages stay visible
    pub message_timeout_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            success_redirect_ms: 1500,
            message_timeout_ms: 4000,
        }
    }
}

/// Backend stores the user can switch between
pub const DB_SERVERS: &[&str] = &["MongoDB", "CosmosDB"];

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3333"
db_server = "MongoDB"

[ui]
success_redirect_ms = 1500
message_timeout_ms = 4000
"#;

/// Parse the embedded configuration and apply build-time overrides
pub fn load_config() -> Result<AppConfig, toml::de::Error> {
    let config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(apply_overrides(config, option_env!("CATALOG_API_BASE_URL")))
}

fn apply_overrides(mut config: AppConfig, base_url: Option<&str>) -> AppConfig {
    if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    config
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig context not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.db_server.as_deref(), Some("MongoDB"));
        assert_eq!(config.ui.message_timeout_ms, 4000);
    }

    #[test]
    fn test_base_url_override() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        let overridden = apply_overrides(config.clone(), Some("https://api.example.com/"));
        assert_eq!(overridden.api.base_url, "https://api.example.com");

        let untouched = apply_overrides(config, Some("  "));
        assert_eq!(untouched.api.base_url, "http://localhost:3333");
    }

    #[test]
    fn test_ui_section_is_optional() {
        let config: AppConfig = toml::from_str("[api]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.api.db_server, None);
    }
}
