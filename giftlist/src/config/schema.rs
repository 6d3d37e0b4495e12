//! Configuration schema definitions.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AdminSecret;
use crate::database::DatabaseConfig;

/// Port the server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Default busy timeout for database lock contention.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// One layer of configuration, as read from a file, the environment or CLI
/// flags. Every field is optional; layers are merged with [`Config::merge_from`].
///
/// # Examples
///
/// ```
/// use giftlist::config::Config;
///
/// let config: Config = serde_yaml::from_str("port: 8080\nadmin_password: s3cret\n").unwrap();
/// assert_eq!(config.port, Some(8080));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// TCP port to listen on.
    pub port: Option<u16>,

    /// Address to bind.
    pub bind_address: Option<IpAddr>,

    /// Shared secret for administrative operations.
    pub admin_password: Option<String>,

    /// Directory holding the database, images and config file.
    pub data_dir: Option<PathBuf>,

    /// Database file; defaults to `<data_dir>/db.sqlite`.
    pub database_path: Option<PathBuf>,

    /// Upload directory; defaults to `<data_dir>/images`.
    pub images_dir: Option<PathBuf>,

    /// Maximum time to wait for the database write lock (milliseconds).
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    /// Overwrites every field that is set in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use giftlist::config::Config;
    ///
    /// let mut low = Config { port: Some(1), admin_password: Some("a".into()), ..Default::default() };
    /// let high = Config { port: Some(2), ..Default::default() };
    /// low.merge_from(&high);
    /// assert_eq!(low.port, Some(2));
    /// assert_eq!(low.admin_password.as_deref(), Some("a"));
    /// ```
    pub fn merge_from(&mut self, other: &Self) {
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.bind_address.is_some() {
            self.bind_address = other.bind_address;
        }
        if other.admin_password.is_some() {
            self.admin_password.clone_from(&other.admin_password);
        }
        if other.data_dir.is_some() {
            self.data_dir.clone_from(&other.data_dir);
        }
        if other.database_path.is_some() {
            self.database_path.clone_from(&other.database_path);
        }
        if other.images_dir.is_some() {
            self.images_dir.clone_from(&other.images_dir);
        }
        if other.busy_timeout_ms.is_some() {
            self.busy_timeout_ms = other.busy_timeout_ms;
        }
    }
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Address to bind.
    pub bind_address: IpAddr,
    /// The admin gate's secret.
    pub admin_secret: AdminSecret,
    /// Database file.
    pub database_path: PathBuf,
    /// Upload directory, served under `/images/`.
    pub images_dir: PathBuf,
    /// Maximum time to wait for the database write lock.
    pub busy_timeout: Duration,
}

impl ServerConfig {
    /// The socket address to listen on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Database settings derived from this configuration.
    #[must_use]
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_path).with_busy_timeout(self.busy_timeout)
    }
}

/// Default bind address, all interfaces.
#[must_use]
pub const fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
