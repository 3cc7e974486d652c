//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::password::{HashParams, PasswordHashError};
use thiserror::Error;
use zeroize::Zeroizing;

/// Access token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Configuration failures. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("invalid password hashing parameters: {0}")]
    Hasher(#[from] PasswordHashError),
}

/// Secret bytes, zeroized on drop and redacted in Debug
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens
    pub jwt_secret: Secret,
    /// Access token lifetime (15 minutes)
    pub token_ttl: Duration,
    /// Argon2id work factor
    pub password_params: HashParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Secret>,
}

impl AuthConfig {
    /// Config with the given signing secret and default everything else
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        Ok(Self {
            jwt_secret: Secret::new(jwt_secret),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_params: HashParams::default(),
            password_pepper: None,
        })
    }

    /// Load from process environment
    ///
    /// - `JWT_SECRET` (required)
    /// - `JWT_TTL_SECS` (default 900)
    /// - `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS`, `ARGON2_PARALLELISM`
    /// - `PASSWORD_PEPPER` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let mut config = Self::new(secret)?;

        if let Some(secs) = parse_var::<u64, _>(&lookup, "JWT_TTL_SECS", "positive integer")? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "JWT_TTL_SECS",
                    expected: "positive integer",
                    value: secs.to_string(),
                });
            }
            config.token_ttl = Duration::from_secs(secs);
        }

        let defaults = HashParams::default();
        config.password_params = HashParams {
            memory_kib: parse_var(&lookup, "ARGON2_MEMORY_KIB", "integer")?
                .unwrap_or(defaults.memory_kib),
            iterations: parse_var(&lookup, "ARGON2_ITERATIONS", "integer")?
                .unwrap_or(defaults.iterations),
            parallelism: parse_var(&lookup, "ARGON2_PARALLELISM", "integer")?
                .unwrap_or(defaults.parallelism),
        };

        config.password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(Secret::new);

        Ok(config)
    }

    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: Secret::new(secret),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_params: HashParams::default(),
            password_pepper: None,
        }
    }

    /// Random secret and the cheapest hashing parameters. Tests only.
    pub fn testing() -> Self {
        Self {
            password_params: HashParams::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_ref().map(Secret::expose)
    }
}

fn parse_var<T, F>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cr3t")])).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(900));
        assert_eq!(config.password_params, HashParams::default());
        assert!(config.pepper().is_none());
        assert_eq!(config.jwt_secret.expose(), b"s3cr3t");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "")])),
            Err(ConfigError::Empty("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cr3t"),
            ("JWT_TTL_SECS", "60"),
            ("ARGON2_MEMORY_KIB", "65536"),
            ("ARGON2_ITERATIONS", "3"),
            ("PASSWORD_PEPPER", "pepper"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.password_params.memory_kib, 65_536);
        assert_eq!(config.password_params.iterations, 3);
        assert_eq!(config.password_params.parallelism, 1);
        assert_eq!(config.pepper(), Some(b"pepper".as_slice()));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "x"), ("JWT_TTL_SECS", "soon")])),
            Err(ConfigError::Invalid { name: "JWT_TTL_SECS", .. })
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "x"), ("JWT_TTL_SECS", "0")])),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = AuthConfig::new("super-secret-key").unwrap();
        config.password_pepper = Some(Secret::new("pepper-value"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("pepper-value"));
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.expose().len(), 32);
        assert_ne!(a.jwt_secret.expose(), b.jwt_secret.expose());
    }
}
