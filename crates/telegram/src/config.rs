//! Startup configuration read from the environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::auth::AllowedUsers;
use crate::constants::{
    DEFAULT_REPLY_CHUNK_LENGTH, DEFAULT_SEND_MAX_BYTES, DEFAULT_SEND_TIMEOUT_SECS,
    TELEGRAM_MESSAGE_LIMIT,
};

const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";
const DEFAULT_ARIA2_CONF: &str = "./aria2.conf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN must be set")]
    MissingToken,
    #[error("ALLOWED_USERS must list at least one user id")]
    NoAllowedUsers,
    #[error("ALLOWED_USERS contains an invalid user id: {0}")]
    InvalidUserId(String),
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Everything the bot reads at startup
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub allowed_users: AllowedUsers,
    pub download_dir: PathBuf,
    pub log_level: LevelFilter,
    pub log_format: LogFormat,
    pub aria2_bin: String,
    pub aria2_conf: Option<PathBuf>,
    pub ffmpeg_bin: String,
    pub reply_chunk_length: usize,
    pub send_timeout: Duration,
    pub send_max_bytes: u64,
}

impl BotConfig {
    /// Load from the process environment
    ///
    /// Call `dotenv::dotenv()` first to merge a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::MissingToken)?;
        let allowed_users = AllowedUsers::parse(&get("ALLOWED_USERS").unwrap_or_default())?;

        let log_format = match get("TG_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "TG_LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let log_level = match get("TG_LOG_LEVEL") {
            None => LevelFilter::INFO,
            Some(name) => parse_log_level(&name).ok_or(ConfigError::InvalidValue {
                name: "TG_LOG_LEVEL",
                value: name,
            })?,
        };

        let aria2_conf = match get("ARIA2_CONF") {
            Some(path) => Some(PathBuf::from(path)),
            None if Path::new(DEFAULT_ARIA2_CONF).is_file() => Some(PathBuf::from(DEFAULT_ARIA2_CONF)),
            None => None,
        };

        let reply_chunk_length = parse_number(
            "REPLY_CHUNK_LENGTH",
            get("REPLY_CHUNK_LENGTH"),
            DEFAULT_REPLY_CHUNK_LENGTH,
        )?;
        if !(1..=TELEGRAM_MESSAGE_LIMIT).contains(&reply_chunk_length) {
            return Err(ConfigError::InvalidValue {
                name: "REPLY_CHUNK_LENGTH",
                value: reply_chunk_length.to_string(),
            });
        }

        let send_timeout_secs = parse_number(
            "SEND_TIMEOUT_SECS",
            get("SEND_TIMEOUT_SECS"),
            DEFAULT_SEND_TIMEOUT_SECS,
        )?;

        Ok(Self {
            token,
            allowed_users,
            download_dir: PathBuf::from(
                get("DOWNLOAD_DIR").unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string()),
            ),
            log_level,
            log_format,
            aria2_bin: get("ARIA2C_BIN").unwrap_or_else(|| "aria2c".to_string()),
            aria2_conf,
            ffmpeg_bin: get("FFMPEG_BIN").unwrap_or_else(|| "ffmpeg".to_string()),
            reply_chunk_length,
            send_timeout: Duration::from_secs(send_timeout_secs),
            send_max_bytes: parse_number("SEND_MAX_BYTES", get("SEND_MAX_BYTES"), DEFAULT_SEND_MAX_BYTES)?,
        })
    }
}

/// Map a log level name to a filter
///
/// Accepts tracing's names plus the logging-module spellings `WARNING`,
/// `CRITICAL` and `FATAL`, in any case.
pub fn parse_log_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(LevelFilter::TRACE),
        "DEBUG" => Some(LevelFilter::DEBUG),
        "INFO" => Some(LevelFilter::INFO),
        "WARN" | "WARNING" => Some(LevelFilter::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Some(LevelFilter::ERROR),
        "OFF" => Some(LevelFilter::OFF),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: v }),
    }
}
