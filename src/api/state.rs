use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::{load_catalog, Engine},
    ui::Pages,
};

/// Shared application state
///
/// Everything in here is built once at startup and only read afterwards,
/// so it is shared across requests without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Creates application state around a built engine
    pub fn new(engine: Engine) -> AppResult<Self> {
        Ok(Self {
            engine: Arc::new(engine),
            pages: Arc::new(Pages::new()?),
        })
    }

    /// Loads the configured catalog and builds the engine on a blocking thread
    ///
    /// Any failure here is fatal: the service must not start without an engine.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let options = config.engine_options();
        let catalog_path = config.catalog_path.clone();

        let engine = tokio::task::spawn_blocking(move || -> AppResult<Engine> {
            let catalog = load_catalog(&catalog_path)?;
            Ok(Engine::build(catalog, options)?)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Engine build task failed: {}", e)))??;

        Self::new(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, EngineError};
    use std::io::Write;

    fn config_for(path: &str) -> Config {
        envy::from_iter([("CATALOG_PATH".to_string(), path.to_string())]).unwrap()
    }

    #[tokio::test]
    async fn test_from_config_builds_engine() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"title": ["Alien", "Aliens"], "tags": ["space horror", "space marines"]}}"#
        )
        .unwrap();

        let state = AppState::from_config(&config_for(file.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(state.engine.catalog().len(), 2);
    }

    #[tokio::test]
    async fn test_from_config_missing_catalog() {
        let result = AppState::from_config(&config_for("/definitely/not/here.json")).await;
        assert!(matches!(
            result,
            Err(AppError::Catalog(CatalogError::Io { .. }))
        ));
    }

    #[tokio::test]
    async fn test_from_config_stop_word_only_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": ["A"], "tags": ["the and of"]}}"#).unwrap();

        let result = AppState::from_config(&config_for(file.path().to_str().unwrap())).await;
        assert!(matches!(
            result,
            Err(AppError::Engine(EngineError::EmptyVocabulary))
        ));
    }
}
