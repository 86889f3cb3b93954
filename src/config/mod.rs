//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment
//! variables override individual keys:
//!
//! | Variable | Key |
//! |---|---|
//! | `VOCAB_HOST` | `server.host` |
//! | `VOCAB_PORT` | `server.port` |
//! | `VOCAB_JWT_SECRET` | `auth.jwt_secret` |
//! | `VOCAB_TOKEN_TTL_SECS` | `auth.token_ttl_secs` |
//! | `VOCAB_ADMIN_EMAILS` | `auth.admin_emails` (comma separated) |
//! | `VOCAB_SEED_LANGUAGES` | `seed.languages` |

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Secret used when nothing else is configured. Fine for local runs only.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-me-before-deploying";

/// Upper bound on token lifetime (one year)
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

const MIN_SECRET_LEN: usize = 32;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `"*"` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,

    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: u64,

    /// Optional `iss` claim; when set, tokens from other issuers are rejected
    pub issuer: Option<String>,

    /// Accounts registered with one of these emails get the admin role
    pub admin_emails: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_secs: 24 * 60 * 60,
            issuer: None,
            admin_emails: Vec::new(),
        }
    }
}

impl AuthConfig {
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|e| e.trim().eq_ignore_ascii_case(email))
    }
}

/// Reference data seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the built-in language list on startup
    pub languages: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { languages: true }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path, e),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `VOCAB_*` environment variables on top of the current values
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("VOCAB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("VOCAB_PORT") {
            self.server.port = parse_value("VOCAB_PORT", &port)?;
        }
        if let Some(secret) = lookup("VOCAB_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("VOCAB_TOKEN_TTL_SECS") {
            self.auth.token_ttl_secs = parse_value("VOCAB_TOKEN_TTL_SECS", &ttl)?;
        }
        if let Some(emails) = lookup("VOCAB_ADMIN_EMAILS") {
            self.auth.admin_emails = emails
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_lowercase)
                .collect();
        }
        if let Some(seed) = lookup("VOCAB_SEED_LANGUAGES") {
            self.seed.languages = parse_value("VOCAB_SEED_LANGUAGES", &seed)?;
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.jwt_secret".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.auth.token_ttl_secs == 0 || self.auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_secs".to_string(),
                message: format!("must be between 1 and {}", MAX_TOKEN_TTL_SECS),
            });
        }

        if self.auth.jwt_secret == DEVELOPMENT_JWT_SECRET {
            tracing::warn!("using the built-in development JWT secret; set VOCAB_JWT_SECRET");
        } else if self.auth.jwt_secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                length = self.auth.jwt_secret.len(),
                "JWT secret is shorter than {} bytes",
                MIN_SECRET_LEN
            );
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: field.to_string(),
        message: e.to_string(),
    })
}
