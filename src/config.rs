use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Storefront domain, e.g. `my-shop.myshopify.com`
    #[serde(default)]
    pub shop_domain: Option<String>,

    /// Storefront API access token
    #[serde(default)]
    pub shop_access_token: Option<String>,

    /// Versioned GraphQL API path segment
    #[serde(default = "default_api_version")]
    pub shop_api_version: String,

    /// Full GraphQL endpoint overriding the one derived from domain and version
    #[serde(default)]
    pub shop_api_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a loaded catalog is served before refreshing, in seconds
    #[serde(default = "default_catalog_ttl_secs")]
    pub catalog_ttl_secs: u64,
}

fn default_api_version() -> String {
    "2024-10".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_ttl_secs() -> u64 {
    15 * 60
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Names of required settings that are absent or blank.
    ///
    /// Missing settings do not stop the server; catalog loads fail instead.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.shop_domain) {
            missing.push("SHOP_DOMAIN");
        }
        if is_blank(&self.shop_access_token) {
            missing.push("SHOP_ACCESS_TOKEN");
        }
        missing
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_apply() {
        let config = from_pairs(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.catalog_ttl_secs, 900);
        assert_eq!(config.shop_api_version, "2024-10");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_settings_reported() {
        let config = from_pairs(&[("SHOP_DOMAIN", "  ")]);
        assert_eq!(
            config.missing_settings(),
            vec!["SHOP_DOMAIN", "SHOP_ACCESS_TOKEN"]
        );
    }

    #[test]
    fn test_complete_config_has_nothing_missing() {
        let config = from_pairs(&[
            ("SHOP_DOMAIN", "shop.example.com"),
            ("SHOP_ACCESS_TOKEN", "shpat_123"),
            ("PORT", "8080"),
        ]);
        assert!(config.missing_settings().is_empty());
        assert_eq!(config.port, 8080);
    }
}
