use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::domain::table::TableConfig;

/// Ошибки загрузки конфига стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Разобрать конфиг из JSON. Отсутствующие поля берутся по умолчанию.
pub fn config_from_json(json: &str) -> Result<TableConfig, ConfigError> {
    let config: TableConfig = serde_json::from_str(json)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Прочитать конфиг из файла.
pub fn load_config(path: impl AsRef<Path>) -> Result<TableConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = config_from_json(&raw)?;
    info!("loaded table config from {}", path.display());
    Ok(config)
}

/// Сериализовать конфиг (для сохранения шаблона).
pub fn config_to_json(config: &TableConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}
