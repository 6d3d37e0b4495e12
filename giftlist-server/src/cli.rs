//! Command-line options.
//!
//! Flags override environment variables and the config file; see
//! [`giftlist::config`] for the full precedence.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use giftlist::config::{Config, ConfigBuilder};

/// HTTP server for the gift registry.
#[derive(Debug, Parser)]
#[command(name = "giftlist")]
#[command(version, about = "Serve the gift registry API", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long)]
    pub quiet: bool,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", env = "GIFTLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of <data-dir>/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Directory for uploaded images
    #[arg(long, value_name = "PATH")]
    pub images_dir: Option<PathBuf>,

    /// Database busy timeout (in milliseconds)
    #[arg(long, value_name = "MILLIS")]
    pub busy_timeout: Option<u64>,

    /// Keep gifts in memory instead of a database file
    #[arg(long)]
    pub in_memory: bool,
}

impl Cli {
    /// The settings given as flags, as the highest-precedence config layer.
    #[must_use]
    pub fn overrides(&self) -> Config {
        Config {
            port: self.port,
            bind_address: self.bind,
            admin_password: None,
            data_dir: self.data_dir.clone(),
            database_path: self.database.clone(),
            images_dir: self.images_dir.clone(),
            busy_timeout_ms: self.busy_timeout,
        }
    }

    /// A builder reading every source, with these flags on top.
    #[must_use]
    pub fn config_builder(&self) -> ConfigBuilder {
        let builder = ConfigBuilder::new().with_config(self.overrides());
        match &self.config {
            Some(path) => builder.with_config_file(path),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "giftlist",
            "--port",
            "8080",
            "--data-dir",
            "/srv/gifts",
            "--busy-timeout",
            "250",
        ])
        .unwrap();
        let config = cli.overrides();
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/gifts")));
        assert_eq!(config.busy_timeout_ms, Some(250));
        assert_eq!(config.admin_password, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["giftlist", "--port", "70000"]).is_err());
    }
}
