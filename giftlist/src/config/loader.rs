//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the configuration file looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Loads YAML configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `<data_dir>/config.yaml` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_data_dir(data_dir: &Path) -> Result<Option<Config>> {
        let path = Self::default_path(data_dir);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_file(&path).map(Some)
    }

    /// Path of the configuration file inside `data_dir`.
    #[must_use]
    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }
}

/// Wraps a YAML error with the offending file for nicer messages.
pub(crate) fn describe(path: &Path, err: Error) -> Error {
    match err {
        Error::Configuration(e) => Error::validation(
            &path.display().to_string(),
            format!("invalid YAML: {e}"),
        ),
        other => other,
    }
}
