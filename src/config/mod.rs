use crate::chat::Mode;
use crate::cli::Args;
use crate::core::error::ClimaError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const CONFIG_PATH_ENV: &str = "CLIMACHAT_CONFIG";

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_SYSTEM_PROMPT: &str = "Eres un asistente amigable y útil.";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl WeatherConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }

    pub fn units(&self) -> &str {
        self.units.as_deref().unwrap_or("metric")
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or("es")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl OpenAIConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_URL)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_mode: Mode,
    pub weather: WeatherConfig,
    pub openai: OpenAIConfig,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolves the config location: explicit path, then `$CLIMACHAT_CONFIG`,
    /// then `~/.climachat/config.yaml`.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        Self::config_dir().join(".climachat").join("config.yaml")
    }

    /// Loads the config file if it exists. A missing file yields defaults;
    /// the file is never created.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ClimaError> {
        let path = Self::config_path(explicit);

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_yaml_str(&contents).map_err(|e| match e {
            ClimaError::Config(msg) => ClimaError::Config(format!("Parse {}: {}", path.display(), msg)),
            other => other,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Config, ClimaError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yml::from_str::<Config>(contents)?)
    }

    /// Applies command-line overrides on top of file values.
    pub fn merge_args(mut self, args: &Args) -> Self {
        if let Some(mode) = args.mode {
            self.default_mode = mode;
        }
        if let Some(model) = &args.model {
            self.openai.model = Some(model.clone());
        }
        if let Some(lang) = &args.lang {
            self.weather.lang = Some(lang.clone());
        }
        if let Some(units) = &args.units {
            self.weather.units = Some(units.clone());
        }
        self
    }
}

/// API keys resolved once at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub weather_key: Option<String>,
    pub openai_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("weather_key", &self.weather_key.as_ref().map(|_| "<set>"))
            .field("openai_key", &self.openai_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

impl Credentials {
    pub fn from_env(config: &Config) -> Self {
        Self::resolve(config, |name| env::var(name).ok())
    }

    /// Environment values win over config file values. Blank keys count as
    /// absent.
    pub fn resolve<F>(config: &Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env_name: &str, file_value: &Option<String>| {
            non_blank(lookup(env_name)).or_else(|| non_blank(file_value.clone()))
        };

        Self {
            weather_key: pick(WEATHER_KEY_ENV, &config.weather.api_key),
            openai_key: pick(OPENAI_KEY_ENV, &config.openai.api_key),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
