//! GameForge configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from gameforge.toml)
//! - User overrides (~/.config/gameforge/gameforge.toml, then ./gameforge.toml)
//!
//! Later sources override earlier ones key by key.

use derive_getters::Getters;
use gameforge_error::{ConfigError, GameforgeError, GameforgeResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Quota settings.
///
/// ```toml
/// [quota]
/// default_daily_limit = 10
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct QuotaConfig {
    /// Daily allowance given to principals seen for the first time
    #[serde(default = "default_daily_limit")]
    #[builder(default = "default_daily_limit()")]
    default_daily_limit: u32,
}

fn default_daily_limit() -> u32 {
    10
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            default_daily_limit: default_daily_limit(),
        }
    }
}

impl QuotaConfig {
    fn validate(&self) -> GameforgeResult<()> {
        if self.default_daily_limit == 0 {
            return Err(ConfigError::new("quota.default_daily_limit must be at least 1").into());
        }
        Ok(())
    }
}

/// Top-level GameForge configuration.
///
/// # Example
///
/// ```no_run
/// use gameforge_quota::GameforgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GameforgeConfig::load()?;
/// println!("daily limit: {}", config.quota().default_daily_limit());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct GameforgeConfig {
    #[serde(default)]
    quota: QuotaConfig,
}

impl GameforgeConfig {
    /// Bundled default configuration.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../../gameforge.toml");

    /// Load configuration from a specific file path, on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GameforgeResult<Self> {
        debug!("Loading configuration from file");

        let builder = config::Config::builder()
            .add_source(config::File::from_str(
                Self::DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(path.as_ref()));

        Self::finish(builder, &path.as_ref().display().to_string())
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or a value is invalid.
    #[instrument]
    pub fn load() -> GameforgeResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            Self::DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/gameforge/gameforge.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("gameforge").required(false));

        Self::finish(builder, "layered sources")
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        origin: &str,
    ) -> GameforgeResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                GameforgeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    origin, e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GameforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration from {}: {}",
                    origin, e
                )))
            })?;

        config.quota.validate()?;
        debug!(
            default_daily_limit = config.quota.default_daily_limit,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_defaults_parse() {
        let config: GameforgeConfig = toml_from_bundled();
        assert_eq!(*config.quota().default_daily_limit(), 10);
    }

    fn toml_from_bundled() -> GameforgeConfig {
        config::Config::builder()
            .add_source(config::File::from_str(
                GameforgeConfig::DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_file_overrides_default_limit() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[quota]\ndefault_daily_limit = 3").unwrap();

        let config = GameforgeConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.quota().default_daily_limit(), 3);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[quota]\ndefault_daily_limit = 0").unwrap();

        let err = GameforgeConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_setters_and_builder() {
        let config = QuotaConfig::default().with_default_daily_limit(25);
        assert_eq!(config.default_daily_limit, 25);

        let built = QuotaConfigBuilder::default().build().unwrap();
        assert_eq!(built, QuotaConfig::default());
    }
}
