pub mod config_io;
pub mod export;
pub mod logging;
pub mod paths;
pub mod store;

use std::path::PathBuf;

use crate::model::config::AppConfig;

/// Resolve paths, read `config.toml`, start file logging and open the store.
/// A logger that fails to start is skipped and the app runs without one; the
/// reason is kept on the store.
pub fn open_session(
    data_dir: Option<PathBuf>,
    profile: Option<String>,
) -> Result<(store::Store, AppConfig), paths::ConfigError> {
    let config = paths::StoreConfig::resolve(data_dir, profile)?;
    let app = config_io::read_app_config(&config)?;
    let logged = logging::init_logging(&app.log.level, &config.log_dir());
    let mut store = store::Store::open(config);
    if let Err(reason) = logged {
        store.set_log_error(reason);
    }
    Ok((store, app))
}
