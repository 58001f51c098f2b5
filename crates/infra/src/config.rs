//! Process configuration from environment variables.
//!
//! Every value is read through a lookup function so tests can supply a map
//! instead of mutating the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SITE_TITLE: &str = "St. Padre Pio Leisure Centre";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How STARTTLS is negotiated before authenticating.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Upgrade when the server offers STARTTLS, otherwise stay in plaintext.
    Opportunistic,
    /// Fail the send unless STARTTLS succeeds.
    Required,
    /// Never upgrade. Local relays only.
    None,
}

impl TlsMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "opportunistic" => Some(Self::Opportunistic),
            "required" | "starttls" => Some(Self::Required),
            "none" | "off" => Some(Self::None),
            _ => None,
        }
    }
}

/// Username/password for SMTP AUTH.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub credentials: Option<SmtpCredentials>,
    pub from: String,
    pub tls: TlsMode,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub smtp: SmtpSettings,
    pub recipient: String,
    pub catalog_path: Option<PathBuf>,
    /// Record emails in memory and log them instead of contacting SMTP.
    pub dry_run: bool,
    pub site_title: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Unset and empty are the same thing.
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let host = get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());

        let port = match get("SMTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "SMTP_PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let credentials = match (get("SMTP_USER"), get("SMTP_PASS")) {
            (Some(username), Some(password)) => Some(SmtpCredentials { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("SMTP_PASS")),
            (None, Some(_)) => return Err(ConfigError::Missing("SMTP_USER")),
        };

        let from = get("SMTP_FROM")
            .or_else(|| credentials.as_ref().map(|c| c.username.clone()))
            .ok_or(ConfigError::Missing("SMTP_FROM"))?;

        let tls = match get("SMTP_TLS") {
            Some(raw) => TlsMode::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "SMTP_TLS",
                value: raw.clone(),
                reason: "expected one of: opportunistic, required, none".to_string(),
            })?,
            None => TlsMode::Opportunistic,
        };

        let timeout = match get("SMTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SMTP_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds".to_string(),
                    });
                }
            },
            None => DEFAULT_SMTP_TIMEOUT,
        };

        let recipient = get("REPORT_RECIPIENT").ok_or(ConfigError::Missing("REPORT_RECIPIENT"))?;

        let dry_run = match get("MAIL_DRY_RUN") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "MAIL_DRY_RUN",
                value: raw.clone(),
                reason: "expected true/false".to_string(),
            })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            smtp: SmtpSettings {
                host,
                port,
                credentials,
                from,
                tls,
                timeout,
            },
            recipient,
            catalog_path: get("STOCK_CATALOG_PATH").map(PathBuf::from),
            dry_run,
            site_title: get("SITE_TITLE").unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
