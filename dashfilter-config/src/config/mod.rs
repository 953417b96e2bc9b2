//! Configuration file parsing for `dashfilter.toml`.
//!
//! ```toml
//! [codec]
//! param_name = "filters"
//! max_param_length = 6000
//!
//! [logging]
//! level = "${DASHFILTER_LEVEL}"
//! format = "json"
//!
//! [environments.development.logging]
//! level = "trace"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

/// Main configuration structure for `dashfilter.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    /// URL parameter codec settings.
    #[serde(default)]
    pub codec: CodecConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl FiltersConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        let expanded = expand_env_vars(content);

        let config: Self =
            toml::from_str(&expanded).map_err(|e| ConfigError::TomlError { source: e })?;
        config.validate()?;
        tracing::debug!(
            environments = config.environments.len(),
            "loaded dashfilter configuration"
        );
        Ok(config)
    }

    /// Check every setting, including those inside environment overrides.
    pub fn validate(&self) -> ConfigResult<()> {
        self.codec.validate()?;
        self.logging.validate()?;
        for (name, overrides) in &self.environments {
            if let Some(codec) = &overrides.codec {
                codec.validate().map_err(|e| prefix_key(e, name))?;
            }
            if let Some(logging) = &overrides.logging {
                logging.validate().map_err(|e| prefix_key(e, name))?;
            }
        }
        Ok(())
    }

    /// Apply the overrides defined for `env`.
    pub fn with_environment(mut self, env: &str) -> ConfigResult<Self> {
        let overrides = self
            .environments
            .remove(env)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                name: env.to_string(),
            })?;
        if let Some(codec) = overrides.codec {
            self.codec = codec;
        }
        if let Some(logging) = overrides.logging {
            self.logging = logging;
        }
        Ok(self)
    }
}

fn prefix_key(err: ConfigError, env: &str) -> ConfigError {
    match err {
        ConfigError::InvalidValue { key, message } => {
            ConfigError::invalid_value(format!("environments.{}.{}", env, key), message)
        }
        other => other,
    }
}

/// URL parameter codec settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Query parameter carrying the compressed filters.
    #[serde(default = "default_param_name")]
    pub param_name: String,

    /// Maximum length of the encoded JSON, unlimited when absent.
    pub max_param_length: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            param_name: default_param_name(),
            max_param_length: None,
        }
    }
}

impl CodecConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.param_name.trim().is_empty() {
            return Err(ConfigError::invalid_value("codec.param_name", "must not be empty"));
        }
        if self.max_param_length == Some(0) {
            return Err(ConfigError::invalid_value(
                "codec.max_param_length",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn default_param_name() -> String {
    "filters".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json, pretty or compact.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("`{}` is not one of {}", self.level, LOG_LEVELS.join(", ")),
            ));
        }
        if !LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.format",
                format!("`{}` is not one of {}", self.format, LOG_FORMATS.join(", ")),
            ));
        }
        Ok(())
    }
}

fn default_level() -> String { "warn".to_string() }
fn default_format() -> String { "json".to_string() }

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Codec overrides.
    pub codec: Option<CodecConfig>,

    /// Logging overrides.
    pub logging: Option<LoggingConfig>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unset variables are left as written.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
