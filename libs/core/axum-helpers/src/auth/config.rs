use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Token lifetime used when `JWT_EXPIRES_IN` is unset.
pub const DEFAULT_EXPIRES_IN: &str = "12h";

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_EXPIRES_IN` (default `12h`) - see [`parse_expires_in`]
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub expires_in_secs: i64,
}

impl JwtConfig {
    /// Create a config with the default lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            expires_in_secs: 12 * 3600,
        }
    }

    pub fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in_secs = seconds;
        self
    }
}

/// Parse a token lifetime such as `45s`, `30m`, `12h`, `7d` or `3600`.
///
/// A bare number is seconds. Zero and negative values are rejected.
pub fn parse_expires_in(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1),
        Some((idx, 'm')) => (&raw[..idx], 60),
        Some((idx, 'h')) => (&raw[..idx], 3600),
        Some((idx, 'd')) => (&raw[..idx], 86_400),
        _ => (raw, 1),
    };

    digits
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|value| *value > 0)
        .and_then(|value| value.checked_mul(multiplier))
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let raw_expiry = env_or_default("JWT_EXPIRES_IN", DEFAULT_EXPIRES_IN);
        let expires_in_secs =
            parse_expires_in(&raw_expiry).ok_or_else(|| ConfigError::ParseError {
                key: "JWT_EXPIRES_IN".to_string(),
                details: format!("`{}` is not a duration like 30m, 12h or 7d", raw_expiry),
            })?;

        Ok(Self {
            secret,
            expires_in_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.expires_in_secs, 43_200);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_parse_expires_in() {
        assert_eq!(parse_expires_in("12h"), Some(43_200));
        assert_eq!(parse_expires_in("30m"), Some(1_800));
        assert_eq!(parse_expires_in("7d"), Some(604_800));
        assert_eq!(parse_expires_in("45s"), Some(45));
        assert_eq!(parse_expires_in("3600"), Some(3_600));
        assert_eq!(parse_expires_in(" 2h "), Some(7_200));
        assert_eq!(parse_expires_in("0"), None);
        assert_eq!(parse_expires_in("-5m"), None);
        assert_eq!(parse_expires_in("h"), None);
        assert_eq!(parse_expires_in("soon"), None);
    }

    #[test]
    fn test_jwt_config_from_env_defaults_expiry() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_EXPIRES_IN", None)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.expires_in_secs, 43_200);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_custom_expiry() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_EXPIRES_IN", Some("1d"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.expires_in_secs, 86_400);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_invalid_expiry() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_EXPIRES_IN", Some("forever"))],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_EXPIRES_IN"));
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }
}
