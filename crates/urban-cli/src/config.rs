use config::{Config as ConfigLoader, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use urban_assistant::{AssistantConfig, DEFAULT_BASE_URL};
use urban_state::SessionConfig;
use urban_types::PointOfInterest;

/// Environment variables that override file settings, with the key they set.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("ASSISTANT_BASE_URL", "assistant.base_url"),
    ("ASSISTANT_HEALTH_TIMEOUT_MS", "assistant.health_timeout_ms"),
    ("ASSISTANT_CHAT_TIMEOUT_MS", "assistant.chat_timeout_ms"),
    ("ASSETS_DIR", "assets.dir"),
    ("ASSETS_BASE_URL", "assets.base_url"),
    ("SESSION_MAX_MESSAGES", "session.max_messages"),
    ("SESSION_POLICY", "session.policy"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Manual points shown before the assistant recommends anything.
    #[serde(default)]
    pub points: Vec<PointOfInterest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub base_url: String,
    pub health_timeout_ms: u64,
    pub chat_timeout_ms: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout_ms: 5_000,
            chat_timeout_ms: 30_000,
        }
    }
}

impl From<&AssistantSettings> for AssistantConfig {
    fn from(settings: &AssistantSettings) -> Self {
        AssistantConfig::new(&settings.base_url)
            .with_health_timeout(Duration::from_millis(settings.health_timeout_ms))
            .with_chat_timeout(Duration::from_millis(settings.chat_timeout_ms))
    }
}

/// Where static assets are read from. A directory wins over a base URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetSettings {
    pub dir: Option<PathBuf>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. ASSISTANT_*, ASSETS_*, SESSION_* and LOG_* environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_with(&env, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup.
    pub fn load_with(
        env: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        for (var, key) in ENV_OVERRIDES {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig::from(&self.assistant)
    }
}
