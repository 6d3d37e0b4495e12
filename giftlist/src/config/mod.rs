//! Server configuration.
//!
//! Settings come from built-in defaults, an optional YAML file, environment
//! variables and explicit overrides, resolved by [`ConfigBuilder`] into a
//! [`ServerConfig`].

mod builder;
mod environment;
mod loader;
mod schema;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
pub use schema::{
    default_bind_address, Config, ServerConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_PORT,
};
