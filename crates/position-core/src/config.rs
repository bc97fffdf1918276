//! Client Configuration
//!
//! Where the positions collection lives.

use serde::{Deserialize, Serialize};

use crate::domain::{PositionError, PositionResult};

/// Environment variable overriding the collection base URL
pub const BASE_URL_ENV: &str = "POSITIONS_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_COLLECTION: &str = "positions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the REST server
    pub base_url: String,
    /// Collection name appended to `base_url`
    pub collection: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with `POSITIONS_API_URL` applied when set and non-empty
    pub fn from_env() -> Self {
        Self::default().with_base_url_opt(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Parse a JSON config; missing keys fall back to defaults
    pub fn from_json(text: &str) -> PositionResult<Self> {
        serde_json::from_str(text).map_err(|e| PositionError::InvalidConfig(e.to_string()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the base URL only when `base_url` is present and not blank
    pub fn with_base_url_opt(self, base_url: Option<&str>) -> Self {
        match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => self.with_base_url(url),
            _ => self,
        }
    }

    /// `{base_url}/{collection}`
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.collection.trim_matches('/')
        )
    }

    /// `{base_url}/{collection}/{id}`
    pub fn item_url(&self, id: u32) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.collection_url(), "http://localhost:3000/positions");
        assert_eq!(config.item_url(12), "http://localhost:3000/positions/12");
    }

    #[test]
    fn test_trailing_slashes_are_collapsed() {
        let config = ClientConfig::default().with_base_url("https://hr.example.com/api/");
        assert_eq!(config.collection_url(), "https://hr.example.com/api/positions");
    }

    #[test]
    fn test_optional_base_url() {
        let default = ClientConfig::default();
        assert_eq!(default.clone().with_base_url_opt(None), default);
        assert_eq!(default.clone().with_base_url_opt(Some("")), default);
        assert_eq!(default.clone().with_base_url_opt(Some("  \t")), default);

        let config = default.with_base_url_opt(Some(" http://hr.internal:8080 "));
        assert_eq!(config.base_url, "http://hr.internal:8080");
    }

    // Only test touching POSITIONS_API_URL
    #[test]
    fn test_from_env() {
        std::env::set_var(BASE_URL_ENV, "   ");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());

        std::env::set_var(BASE_URL_ENV, "http://positions.test/api");
        assert_eq!(
            ClientConfig::from_env().collection_url(),
            "http://positions.test/api/positions"
        );

        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ClientConfig::from_json(r#"{"base_url": "http://10.0.0.5:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.collection, "positions");
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ClientConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PositionError::InvalidConfig(_)));
    }
}
