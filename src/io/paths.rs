use std::path::PathBuf;

use thiserror::Error;

/// Environment variable that overrides the default data directory
pub const HOME_ENV: &str = "DAYBOOK_HOME";

const DATA_FILE: &str = "data.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid profile name '{0}' (use letters, digits, '-' or '_')")]
    InvalidProfile(String),
}

/// Where the store lives on disk. Built once at startup and handed to the
/// store, so nothing reads the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub profile: Option<String>,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, profile: Option<String>) -> Result<Self, ConfigError> {
        if let Some(name) = &profile {
            validate_profile(name)?;
        }
        Ok(StoreConfig {
            data_dir: data_dir.into(),
            profile,
        })
    }

    /// Resolve the data directory from `--data-dir`, then `DAYBOOK_HOME`,
    /// then `$HOME/.daybook`.
    pub fn resolve(data_dir: Option<PathBuf>, profile: Option<String>) -> Result<Self, ConfigError> {
        let dir = data_dir
            .or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from))
            .unwrap_or_else(|| home_dir().join(".daybook"));
        StoreConfig::new(dir, profile)
    }

    /// Directory holding this profile's data file and exports
    pub fn profile_dir(&self) -> PathBuf {
        match &self.profile {
            Some(name) => self.data_dir.join("profiles").join(name),
            None => self.data_dir.clone(),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.profile_dir().join(DATA_FILE)
    }

    /// Copy of an unreadable data file is kept here
    pub fn backup_file(&self) -> PathBuf {
        self.profile_dir().join(format!("{DATA_FILE}.bak"))
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.profile_dir().join("exports")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Profile names become directory names, so only `[A-Za-z0-9_-]+` is allowed
pub fn validate_profile(name: &str) -> Result<(), ConfigError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidProfile(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_layout() {
        let cfg = StoreConfig::new("/tmp/db", None).unwrap();
        assert_eq!(cfg.data_file(), PathBuf::from("/tmp/db/data.json"));
        assert_eq!(cfg.backup_file(), PathBuf::from("/tmp/db/data.json.bak"));
        assert_eq!(cfg.exports_dir(), PathBuf::from("/tmp/db/exports"));
        assert_eq!(cfg.log_dir(), PathBuf::from("/tmp/db/logs"));
    }

    #[test]
    fn named_profile_layout() {
        let cfg = StoreConfig::new("/tmp/db", Some("work".into())).unwrap();
        assert_eq!(cfg.data_file(), PathBuf::from("/tmp/db/profiles/work/data.json"));
        assert_eq!(cfg.exports_dir(), PathBuf::from("/tmp/db/profiles/work/exports"));
        assert_eq!(cfg.config_file(), PathBuf::from("/tmp/db/config.toml"));
    }

    #[test]
    fn explicit_dir_wins() {
        let cfg = StoreConfig::resolve(Some("/srv/daybook".into()), None).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/daybook"));
    }

    #[test]
    fn profile_names_are_checked() {
        assert!(validate_profile("side_project-2").is_ok());
        for bad in ["", "../etc", "a b", "x/y"] {
            assert!(matches!(
                validate_profile(bad),
                Err(ConfigError::InvalidProfile(_))
            ));
        }
    }
}
