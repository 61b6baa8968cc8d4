//! Configuration management for ragline

mod env_loader;
mod file_loader;
mod loader;
mod logging_config;
mod model;
pub mod timeouts;

pub use env_loader::{apply_env, apply_env_from};
pub use file_loader::load_from_file;
pub use loader::{ConfigLoader, ConfigOverrides, ConfigSource, default_config_path, load_config};
pub use logging_config::LoggingConfig;
pub use model::{ApiConfig, ClientConfig, DefaultsConfig};
