use serde::Deserialize;

use crate::services::{
    engine::DEFAULT_TOP_N, vectorizer::DEFAULT_MAX_FEATURES, EngineOptions,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the JSON catalog (column name -> values)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Vocabulary cap for the tag vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Number of recommendations per query
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,
}

fn default_catalog_path() -> String {
    "data/movies_dict.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

fn default_recommendation_count() -> usize {
    DEFAULT_TOP_N
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_features > 0, "MAX_FEATURES must be greater than zero");
        anyhow::ensure!(
            self.recommendation_count > 0,
            "RECOMMENDATION_COUNT must be greater than zero"
        );
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_features: self.max_features,
            top_n: self.recommendation_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> envy::Result<Config> {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.catalog_path, "data/movies_dict.json");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.engine_options(), EngineOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("CATALOG_PATH", "/srv/movies.json"),
            ("PORT", "8501"),
            ("MAX_FEATURES", "100"),
            ("RECOMMENDATION_COUNT", "3"),
        ])
        .unwrap();

        assert_eq!(config.catalog_path, "/srv/movies.json");
        assert_eq!(config.port, 8501);
        assert_eq!(config.engine_options().max_features, 100);
        assert_eq!(config.engine_options().top_n, 3);
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let config = from_pairs(&[("RECOMMENDATION_COUNT", "0")]).unwrap();
        assert!(config.validate().is_err());
    }
}
