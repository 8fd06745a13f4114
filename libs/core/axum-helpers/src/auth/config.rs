//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse, env_required};

const MIN_SECRET_LEN: usize = 32;

/// Access tokens live for a day.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 86_400;
/// Refresh tokens live for a week.
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters) signs access tokens
/// - `JWT_REFRESH_SECRET` (required, at least 32 characters, different from
///   `JWT_SECRET`) signs refresh tokens
/// - `JWT_ACCESS_TTL_SECS` (default 86400)
/// - `JWT_REFRESH_TTL_SECS` (default 604800)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    /// Build a config with default lifetimes, validating both secrets.
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_ttls(mut self, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        self.access_ttl_secs = access_ttl_secs;
        self.refresh_ttl_secs = refresh_ttl_secs;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_secret("JWT_SECRET", &self.access_secret)?;
        check_secret("JWT_REFRESH_SECRET", &self.refresh_secret)?;

        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_SECRET".to_string(),
                details: "must differ from JWT_SECRET".to_string(),
            });
        }

        for (key, ttl) in [
            ("JWT_ACCESS_TTL_SECS", self.access_ttl_secs),
            ("JWT_REFRESH_TTL_SECS", self.refresh_ttl_secs),
        ] {
            if ttl <= 0 {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    details: format!("must be positive (got {})", ttl),
                });
            }
        }

        Ok(())
    }
}

fn check_secret(key: &str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: env_required("JWT_SECRET")?,
            refresh_secret: env_required("JWT_REFRESH_SECRET")?,
            access_ttl_secs: env_parse("JWT_ACCESS_TTL_SECS", &DEFAULT_ACCESS_TTL_SECS.to_string())?,
            refresh_ttl_secs: env_parse("JWT_REFRESH_TTL_SECS", &DEFAULT_REFRESH_TTL_SECS.to_string())?,
        };
        config.validate()?;
        Ok(config)
    }
}
