//! Application configuration management.
//!
//! Settings are layered from default values, an optional TOML file and
//! environment variables, with the latter taking precedence.

use crate::{CliError, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// How states are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rendering settings shared by all subcommands
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// The rendering used for each state
    pub format: OutputFormat,
    /// Write the state after every update, rather than only the final one
    pub every_step: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Compact,
            every_step: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Only print the final state of a replay
    /// export APP_OUTPUT__EVERY_STEP=false
    ///
    /// # Render states as indented JSON
    /// export APP_OUTPUT__FORMAT=pretty
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path));
            } else {
                return Err(CliError::MissingConfig(path.to_path_buf()).into());
            }
        }

        // This maps APP_OUTPUT__FORMAT to output.format
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/intensity.toml");
        let err = AppConfig::load(Some(path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingConfig(_))
        ));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("intensity-{}.toml", std::process::id()));
        fs::write(&path, "[output]\nformat = \"pretty\"\nevery_step = false\n").unwrap();

        let config = AppConfig::load(Some(&path));
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert!(!config.output.every_step);
    }
}
