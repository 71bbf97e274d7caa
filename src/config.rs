use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_BASE_URL: &str = "https://airlabs.co/api/v9";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Unset means no client-side timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub default_search: String, // "flight" or "route"
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub directory: String,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: String::new(),
                timeout_seconds: None,
            },
            ui: UiConfig {
                tick_rate_ms: 150,
                default_search: "flight".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory.
    /// If it doesn't exist, creates a default one.
    ///
    /// Runs before logging starts, so any problem is handed back as a
    /// message for the caller to log once a subscriber exists.
    pub fn load() -> (Self, Option<String>) {
        if let Ok(content) = fs::read_to_string(CONFIG_PATH) {
            return match Self::parse(&content) {
                Ok(config) => (config, None),
                Err(e) => (
                    Config::default(),
                    Some(format!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e)),
                ),
            };
        }

        let config = Config::default();
        let problem = config
            .write_default()
            .err()
            .map(|e| format!("Could not write default {} to disk: {}", CONFIG_PATH, e));
        (config, problem)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    // Save default config to disk for the user to edit later
    fn write_default(&self) -> Result<(), String> {
        let text = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(CONFIG_PATH, text).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cfg = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:8080/api/v9"
            api_key = "abc"
            timeout_seconds = 5

            [ui]
            tick_rate_ms = 100
            default_search = "route"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.api_key, "abc");
        assert_eq!(cfg.api.timeout_seconds, Some(5));
        assert_eq!(cfg.ui.default_search, "route");
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn test_timeout_optional() {
        let cfg = Config::parse(
            r#"
            [api]
            base_url = "https://airlabs.co/api/v9"
            api_key = "abc"

            [ui]
            tick_rate_ms = 150
            default_search = "flight"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.timeout_seconds, None);
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = Config::parse("not = [valid").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_missing_section_is_reported() {
        assert!(Config::parse("[ui]\ntick_rate_ms = 10\ndefault_search = \"flight\"\n").is_err());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), Config::default());
    }
}
