use std::fs;
use std::io::ErrorKind;

use crate::io::paths::{ConfigError, StoreConfig};
use crate::model::config::AppConfig;

/// Read `config.toml` from the data directory. A missing file is not an
/// error and yields the defaults.
pub fn read_app_config(store: &StoreConfig) -> Result<AppConfig, ConfigError> {
    let path = store.config_file();
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}
