//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "latexlite";
const ENV_PREFIX: &str = "LATEXLITE";
pub const DEFAULT_BASE_URL: &str = "https://latexlite.com";
/// Public placeholder used by the examples; not a credential.
pub const DEMO_API_KEY: &str = "<your-api-key>";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 60;
const KEY_PREVIEW_CHARS: usize = 10;

/// Command-line overrides shared by every subcommand.
#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// API base URL, e.g. <https://latexlite.com>
    #[arg(long = "base-url", env = "BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// API key (prefer the environment variable to keep it out of shell history)
    #[arg(
        long = "api-key",
        env = "API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// Path to a file containing the API key (takes precedence over --api-key)
    #[arg(long = "key-file", env = "API_KEY_FILE", value_name = "PATH", global = true)]
    pub key_file: Option<PathBuf>,

    /// Per-request HTTP timeout.
    #[arg(long = "request-timeout-seconds", value_name = "SECONDS", global = true)]
    pub request_timeout_seconds: Option<u64>,

    /// Delay between job status polls.
    #[arg(long = "poll-interval-seconds", value_name = "SECONDS", global = true)]
    pub poll_interval_seconds: Option<u64>,

    /// How long to wait for a job to finish before giving up.
    #[arg(long = "wait-timeout-seconds", value_name = "SECONDS", global = true)]
    pub wait_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub api_key: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub wait_timeout: Duration,
}

impl ApiSettings {
    /// The first few characters of the key, safe to print.
    pub fn key_preview(&self) -> &str {
        match self.api_key.char_indices().nth(KEY_PREVIEW_CHARS) {
            Some((idx, _)) => &self.api_key[..idx],
            None => &self.api_key,
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to read key file {}: {source}", .path.display())]
    KeyFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides)?;

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) -> Result<(), LoadError> {
        if let Some(url) = non_empty(overrides.base_url.as_deref()) {
            self.api.base_url = Some(url);
        }
        if let Some(key) = non_empty(overrides.api_key.as_deref()) {
            self.api.api_key = Some(key);
        }
        if let Some(path) = overrides.key_file.as_ref() {
            let key = fs::read_to_string(path).map_err(|source| LoadError::KeyFile {
                path: path.clone(),
                source,
            })?;
            let key = non_empty(Some(&key)).ok_or_else(|| {
                LoadError::invalid(
                    "api.api_key",
                    format!("key file {} is empty", path.display()),
                )
            })?;
            self.api.api_key = Some(key);
        }
        if let Some(seconds) = overrides.request_timeout_seconds {
            self.api.request_timeout_seconds = Some(seconds);
        }
        if let Some(seconds) = overrides.poll_interval_seconds {
            self.api.poll_interval_seconds = Some(seconds);
        }
        if let Some(seconds) = overrides.wait_timeout_seconds {
            self.api.wait_timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        Ok(())
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { api, logging } = raw;

        let api = build_api_settings(api)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self { api, logging })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let base_url = non_empty(api.base_url.as_deref())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&base_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("failed to parse: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    let api_key = non_empty(api.api_key.as_deref()).unwrap_or_else(|| DEMO_API_KEY.to_string());

    Ok(ApiSettings {
        base_url,
        api_key,
        request_timeout: seconds(
            api.request_timeout_seconds,
            DEFAULT_REQUEST_TIMEOUT_SECS,
            "api.request_timeout_seconds",
        )?,
        poll_interval: seconds(
            api.poll_interval_seconds,
            DEFAULT_POLL_INTERVAL_SECS,
            "api.poll_interval_seconds",
        )?,
        wait_timeout: seconds(
            api.wait_timeout_seconds,
            DEFAULT_WAIT_TIMEOUT_SECS,
            "api.wait_timeout_seconds",
        )?,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match non_empty(logging.level.as_deref()) {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    api_key: Option<String>,
    request_timeout_seconds: Option<u64>,
    poll_interval_seconds: Option<u64>,
    wait_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

/// Empty and whitespace-only values count as unset.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn seconds(value: Option<u64>, default: u64, key: &'static str) -> Result<Duration, LoadError> {
    let value = value.unwrap_or(default);
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests;
