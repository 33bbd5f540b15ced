//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::messages::Locale;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sketch: SketchConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inference service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the inference service (e.g., "http://127.0.0.1:4200")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the masked-token endpoint
    #[serde(default = "default_llm_path")]
    pub llm_path: String,

    /// Path of the sketch classification endpoint
    #[serde(default = "default_sketch_path")]
    pub sketch_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:4200".to_string()
}

fn default_llm_path() -> String {
    "/api/llm".to_string()
}

fn default_sketch_path() -> String {
    "/api/sketch".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            llm_path: default_llm_path(),
            sketch_path: default_sketch_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Full URL of the masked-token endpoint
    pub fn llm_url(&self) -> String {
        join_url(&self.base_url, &self.llm_path)
    }

    /// Full URL of the sketch endpoint
    pub fn sketch_url(&self) -> String {
        join_url(&self.base_url, &self.sketch_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sketch watch loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SketchConfig {
    /// How often the current sketch is sent while active (ms)
    #[serde(default = "default_send_interval")]
    pub send_interval_ms: u64,

    /// How often the activity flag is cleared (ms)
    #[serde(default = "default_idle_interval")]
    pub idle_interval_ms: u64,

    /// How often the sketch file is checked for changes (ms)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Number of labels to show
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_send_interval() -> u64 {
    1000
}

fn default_idle_interval() -> u64 {
    2000
}

fn default_poll_interval() -> u64 {
    100
}

fn default_top_k() -> usize {
    5
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: default_send_interval(),
            idle_interval_ms: default_idle_interval(),
            poll_interval_ms: default_poll_interval(),
            top_k: default_top_k(),
        }
    }
}

/// Terminal rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Color mode: auto, always, never
    #[serde(default = "default_color")]
    pub color: String,

    /// Width of a full (100%) bar in columns
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Language of user-facing messages
    #[serde(default)]
    pub locale: Locale,

    /// Fixed starting hue for token colors; random per session when unset
    pub palette_seed: Option<f64>,
}

fn default_color() -> String {
    "auto".to_string()
}

fn default_bar_width() -> usize {
    40
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            bar_width: default_bar_width(),
            locale: Locale::default(),
            palette_seed: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tokenlens").join("config.toml")),
            Some(PathBuf::from("./tokenlens.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(url) = var("TOKENLENS_SERVER_URL") {
            self.server.base_url = url;
        }
        if let Some(timeout) = var("TOKENLENS_REQUEST_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.server.request_timeout_secs = t;
            }
        }

        // Display overrides
        if let Some(color) = var("TOKENLENS_COLOR") {
            self.display.color = color;
        }
        if let Some(locale) = var("TOKENLENS_LOCALE") {
            if let Ok(l) = locale.parse() {
                self.display.locale = l;
            }
        }

        // Logging overrides
        if let Some(level) = var("TOKENLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TOKENLENS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tokenlens Configuration
#
# Environment variables override these settings:
# - TOKENLENS_SERVER_URL
# - TOKENLENS_REQUEST_TIMEOUT
# - TOKENLENS_COLOR
# - TOKENLENS_LOCALE
# - TOKENLENS_LOG_LEVEL
# - TOKENLENS_LOG_FORMAT

[server]
# Inference service base URL
base_url = "http://127.0.0.1:4200"

# Masked-token endpoint (text/plain in, {tokens, predictions} out)
llm_path = "/api/llm"

# Sketch endpoint (image in, ranked labels out)
sketch_path = "/api/sketch"

# Request timeout in seconds
request_timeout_secs = 30

[sketch]
# Send the sketch this often while it is being changed (ms)
send_interval_ms = 1000

# Stop sending after this long without changes (ms)
idle_interval_ms = 2000

# Check the sketch file for changes this often (ms)
poll_interval_ms = 100

# Number of labels to show
top_k = 5

[display]
# Color mode: auto, always, never
color = "auto"

# Width of a 100% bar in columns
bar_width = 40

# Message language: it, en
locale = "it"

# Fixed starting hue in [0, 1) for reproducible token colors
# palette_seed = 0.0

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
