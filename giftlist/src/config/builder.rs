//! Layered configuration resolution.
//!
//! Precedence, highest first: explicit overrides (CLI flags), environment
//! variables, the YAML file, built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::AdminSecret;
use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{self, ConfigLoader};
use crate::config::schema::{
    default_bind_address, Config, ServerConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_PORT,
};
use crate::database::default_data_dir;
use crate::error::{Error, Result};

/// Builder for resolving a [`ServerConfig`].
///
/// # Examples
///
/// ```
/// use giftlist::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_env()
///     .skip_files()
///     .with_config(Config {
///         admin_password: Some("s3cret".into()),
///         data_dir: Some("/tmp/gifts".into()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.port, 3000);
/// assert!(config.database_path.ends_with("db.sqlite"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    overrides: Config,
    config_file: Option<PathBuf>,
    skip_env: bool,
    skip_files: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Layer explicit overrides on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.merge_from(&config);
        self
    }

    /// Read this file instead of `<data_dir>/config.yaml`. The file must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Resolves and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, if the admin
    /// password is missing or empty, or if a numeric setting is zero.
    pub fn build(self) -> Result<ServerConfig> {
        let mut env_layer = Config::default();
        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut env_layer)?;
        }

        let mut merged = Config::default();
        if !self.skip_files {
            let data_dir = match self.overrides.data_dir.as_ref().or(env_layer.data_dir.as_ref()) {
                Some(dir) => dir.clone(),
                None => default_data_dir()?,
            };
            let file_layer = match &self.config_file {
                Some(path) => {
                    Some(ConfigLoader::load_file(path).map_err(|e| loader::describe(path, e))?)
                }
                None => ConfigLoader::load_from_data_dir(&data_dir).map_err(|e| {
                    loader::describe(&ConfigLoader::default_path(&data_dir), e)
                })?,
            };
            if let Some(file_layer) = file_layer {
                merged.merge_from(&file_layer);
            }
        }
        merged.merge_from(&env_layer);
        merged.merge_from(&self.overrides);

        resolve(merged)
    }
}

fn resolve(config: Config) -> Result<ServerConfig> {
    let port = config.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(Error::validation("port", "port must be between 1 and 65535"));
    }

    let busy_timeout_ms = config.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
    if busy_timeout_ms == 0 {
        return Err(Error::validation(
            "busy_timeout_ms",
            "busy timeout must be greater than zero",
        ));
    }

    let password = config.admin_password.ok_or_else(|| {
        Error::validation(
            "admin_password",
            "an admin password is required (set ADMIN_PASSWORD)",
        )
    })?;
    let admin_secret = AdminSecret::new(password)?;

    let data_dir = match config.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let database_path = config
        .database_path
        .unwrap_or_else(|| data_dir.join("db.sqlite"));
    let images_dir = config.images_dir.unwrap_or_else(|| data_dir.join("images"));

    Ok(ServerConfig {
        port,
        bind_address: config.bind_address.unwrap_or_else(default_bind_address),
        admin_secret,
        database_path,
        images_dir,
        busy_timeout: Duration::from_millis(busy_timeout_ms),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            "GIFTLIST_PORT",
            "PORT",
            "GIFTLIST_BIND_ADDRESS",
            "GIFTLIST_ADMIN_PASSWORD",
            "ADMIN_PASSWORD",
            "GIFTLIST_DATA_DIR",
            "GIFTLIST_DATABASE",
            "GIFTLIST_IMAGES_DIR",
            "GIFTLIST_BUSY_TIMEOUT_MS",
        ] {
            env::remove_var(var);
        }
    }

    fn base(dir: &TempDir) -> Config {
        Config {
            admin_password: Some("s3cret".into()),
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .skip_env()
            .skip_files()
            .with_config(base(&dir))
            .build()
            .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address, default_bind_address());
        assert_eq!(config.database_path, dir.path().join("db.sqlite"));
        assert_eq!(config.images_dir, dir.path().join("images"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.admin_secret.verify("s3cret"));
        assert_eq!(config.socket_addr().port(), 3000);
    }

    #[test]
    fn test_missing_password() {
        let err = ConfigBuilder::new()
            .skip_env()
            .skip_files()
            .with_config(Config {
                data_dir: Some("/tmp".into()),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("admin_password"));
    }

    #[test]
    fn test_empty_password_and_zero_values_rejected() {
        let dir = TempDir::new().unwrap();
        for bad in [
            Config {
                admin_password: Some(String::new()),
                ..Default::default()
            },
            Config {
                port: Some(0),
                ..Default::default()
            },
            Config {
                busy_timeout_ms: Some(0),
                ..Default::default()
            },
        ] {
            let result = ConfigBuilder::new()
                .skip_env()
                .skip_files()
                .with_config(base(&dir))
                .with_config(bad)
                .build();
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_file_in_data_dir_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "port: 8080\nadmin_password: from-file\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_config(Config {
                data_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.admin_secret.verify("from-file"));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let result = ConfigBuilder::new()
            .skip_env()
            .with_config(base(&dir))
            .with_config_file(dir.path().join("missing.yaml"))
            .build();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "port: [not a number]\n").unwrap();

        let err = ConfigBuilder::new()
            .skip_env()
            .with_config(base(&dir))
            .with_config_file(&path)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("custom.yaml"));
    }

    #[test]
    #[serial]
    fn test_precedence() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "port: 1111\nbusy_timeout_ms: 10\nadmin_password: file\n",
        )
        .unwrap();
        clear_env();
        env::set_var("GIFTLIST_PORT", "2222");
        env::set_var("GIFTLIST_ADMIN_PASSWORD", "env");

        let config = ConfigBuilder::new()
            .with_config(Config {
                data_dir: Some(dir.path().to_path_buf()),
                admin_password: Some("cli".into()),
                ..Default::default()
            })
            .build();
        env::remove_var("GIFTLIST_PORT");
        env::remove_var("GIFTLIST_ADMIN_PASSWORD");

        let config = config.unwrap();
        // env beats file, cli beats env, file beats defaults
        assert_eq!(config.port, 2222);
        assert!(config.admin_secret.verify("cli"));
        assert_eq!(config.busy_timeout, Duration::from_millis(10));
    }

    #[test]
    #[serial]
    fn test_env_data_dir_locates_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "admin_password: file\n").unwrap();
        clear_env();
        env::set_var("GIFTLIST_DATA_DIR", dir.path());

        let config = ConfigBuilder::new().build();
        env::remove_var("GIFTLIST_DATA_DIR");

        let config = config.unwrap();
        assert!(config.admin_secret.verify("file"));
        assert_eq!(config.database_path, dir.path().join("db.sqlite"));
    }
}
