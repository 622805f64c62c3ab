use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const APP_DIR_NAME: &str = "cityweather";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and preferences.json
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Translation bundle settings
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Map embed settings
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap access credential
    #[serde(default)]
    pub api_key: String,

    /// Current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Base for `<icon>@2x.png` images
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Bounded wait for one weather request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_icon_base_url() -> String {
    "https://openweathermap.org/img/wn".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            icon_base_url: default_icon_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Where translation bundles are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BundleSourceKind {
    /// Bundles compiled into the binary
    #[default]
    Embedded,
    /// `<directory>/<code>.json`, relative to the config directory
    Directory,
    /// `<base_url>/<code>.json`
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default)]
    pub source: BundleSourceKind,

    #[serde(default = "default_lang_directory")]
    pub directory: String,

    #[serde(default)]
    pub base_url: String,
}

fn default_lang_directory() -> String {
    "lang".to_string()
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            source: BundleSourceKind::Embedded,
            directory: default_lang_directory(),
            base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_embed_base_url")]
    pub embed_base_url: String,

    /// Half-width of the bounding box around the marker, in degrees
    #[serde(default = "default_margin_degrees")]
    pub margin_degrees: f64,
}

fn default_embed_base_url() -> String {
    "https://www.openstreetmap.org/export/embed.html".to_string()
}

fn default_margin_degrees() -> f64 {
    0.1
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            embed_base_url: default_embed_base_url(),
            margin_degrees: default_margin_degrees(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            i18n: I18nConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there on first run
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            config.apply_env();
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.apply_env();

        Ok(config)
    }

    fn apply_env(&mut self) {
        // The key is usually kept out of the file
        if self.weather.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.weather.api_key = key;
            }
        }
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        validate_url(&self.weather.icon_base_url, "weather.icon_base_url", &mut result);
        validate_url(&self.map.embed_base_url, "map.embed_base_url", &mut result);

        if self.weather.api_key.trim().is_empty() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured (set {} or weather.api_key)", API_KEY_ENV),
            );
        }

        if self.weather.timeout_ms == 0 {
            result.add_error("weather.timeout_ms", "Timeout must be greater than 0");
        } else if self.weather.timeout_ms > 60_000 {
            result.add_warning(
                "weather.timeout_ms",
                "Timeout is unusually long (>60 seconds)",
            );
        }

        let margin = self.map.margin_degrees;
        if !(margin > 0.0 && margin <= 10.0) {
            result.add_error(
                "map.margin_degrees",
                "Map margin must be greater than 0 and at most 10 degrees",
            );
        }

        match self.i18n.source {
            BundleSourceKind::Http => {
                validate_url(&self.i18n.base_url, "i18n.base_url", &mut result);
            }
            BundleSourceKind::Directory => {
                let dir = self.lang_directory();
                if !dir.is_dir() {
                    result.add_warning(
                        "i18n.directory",
                        format!("Directory does not exist: {}", dir.display()),
                    );
                }
            }
            BundleSourceKind::Embedded => {}
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Directory of `<code>.json` bundles; relative paths are taken from `config_dir`
    pub fn lang_directory(&self) -> PathBuf {
        let dir = Path::new(&self.i18n.directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.config_dir.join(dir)
        }
    }

    /// Path of the persisted preference file
    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join("preferences.json")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
