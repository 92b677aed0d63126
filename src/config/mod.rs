//! Configuration loading, validation, and persistence
//!
//! Configuration customizes where searches go and how results are
//! presented. All fields are optional; unspecified fields use defaults
//! matching the embedded `default_config.yml`. Files are discovered as
//! `scout.[toml|yml|yaml|json]` in the working directory or given
//! explicitly via `--config`.

mod color;
#[expect(clippy::module_inception, reason = "Submodule holds the Config type the module is named for")]
mod config;

pub use color::Color;
pub use config::{Config, DEFAULT_CONFIG_YAML};
