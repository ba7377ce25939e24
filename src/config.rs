//! Site configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Stream cadence and duration are not
//! configurable; see [`crate::stream::BroadcastSettings`].

use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` (or the address derived from `PORT`) is not a socket address.
    #[error("invalid listen address {value:?}: {source}")]
    InvalidListenAddr {
        /// The offending value.
        value: String,
        /// Underlying parse failure.
        source: std::net::AddrParseError,
    },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line (CloudWatch friendly).
    Json,
    /// Human readable multi-field lines.
    Pretty,
}

/// Top-level site configuration.
///
/// Loaded once at startup via [`SiteConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Socket address to bind the HTTP server to in local mode.
    pub listen_addr: SocketAddr,

    /// AWS region used for the SES client.
    pub aws_region: String,

    /// Address that sends and receives contact form inquiries.
    pub contact_inbox: String,

    /// Whether to build the SES mailer at startup.
    pub mail_enabled: bool,

    /// Directory holding `css/`, `img/` and `js/` assets.
    pub public_dir: PathBuf,

    /// Tracing output format.
    pub log_format: LogFormat,

    /// `true` when running inside AWS Lambda.
    pub lambda_mode: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            aws_region: "eu-west-2".to_string(),
            contact_inbox: "joe@stackfoundry.co.uk".to_string(),
            mail_enabled: true,
            public_dir: PathBuf::from("public"),
            log_format: LogFormat::Pretty,
            lambda_mode: false,
        }
    }
}

impl SiteConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`SiteConfig::default`] values when a variable is not
    /// set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidListenAddr`] if `LISTEN_ADDR` (or
    /// `0.0.0.0:$PORT`) cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let raw_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| {
            let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
            format!("0.0.0.0:{port}")
        });
        let listen_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let lambda_mode = std::env::var("AWS_LAMBDA_FUNCTION_NAME")
            .map(|name| !name.is_empty())
            .unwrap_or(false);
        let log_format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| parse_log_format(&v))
            .unwrap_or(if lambda_mode {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            });

        Ok(Self {
            listen_addr,
            aws_region: parse_env("AWS_REGION", defaults.aws_region),
            contact_inbox: parse_env("CONTACT_INBOX", defaults.contact_inbox),
            mail_enabled: parse_env_bool("MAIL_ENABLED", defaults.mail_enabled),
            public_dir: parse_env("PUBLIC_DIR", defaults.public_dir),
            log_format,
            lambda_mode,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" | "text" => Some(LogFormat::Pretty),
        _ => None,
    }
}
