//! Environment variable handling for configuration overrides.
//!
//! | variable                      | field             |
//! |-------------------------------|-------------------|
//! | `GIFTLIST_PORT`, `PORT`       | `port`            |
//! | `GIFTLIST_BIND_ADDRESS`       | `bind_address`    |
//! | `GIFTLIST_ADMIN_PASSWORD`, `ADMIN_PASSWORD` | `admin_password` |
//! | `GIFTLIST_DATA_DIR`           | `data_dir`        |
//! | `GIFTLIST_DATABASE`           | `database_path`   |
//! | `GIFTLIST_IMAGES_DIR`         | `images_dir`      |
//! | `GIFTLIST_BUSY_TIMEOUT_MS`    | `busy_timeout_ms` |
//!
//! Where two names are listed the `GIFTLIST_` one wins.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or address variable cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(port) = Self::first(&["GIFTLIST_PORT", "PORT"]) {
            config.port = Some(Self::parse("PORT", &port)?);
        }

        if let Ok(addr) = env::var("GIFTLIST_BIND_ADDRESS") {
            config.bind_address = Some(Self::parse("GIFTLIST_BIND_ADDRESS", &addr)?);
        }

        if let Some(password) = Self::first(&["GIFTLIST_ADMIN_PASSWORD", "ADMIN_PASSWORD"]) {
            config.admin_password = Some(password);
        }

        if let Ok(dir) = env::var("GIFTLIST_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(path) = env::var("GIFTLIST_DATABASE") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Ok(dir) = env::var("GIFTLIST_IMAGES_DIR") {
            config.images_dir = Some(PathBuf::from(dir));
        }

        if let Ok(millis) = env::var("GIFTLIST_BUSY_TIMEOUT_MS") {
            config.busy_timeout_ms = Some(Self::parse("GIFTLIST_BUSY_TIMEOUT_MS", &millis)?);
        }

        Ok(())
    }

    /// Returns the value of the first variable that is set and non-empty.
    fn first(names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty())
    }

    fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: name.into(),
            message: format!("cannot parse '{value}'"),
        })
    }
}
