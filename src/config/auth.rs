//! Session and credential configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Session and credential configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of a session token
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// How often expired sessions are purged
    #[serde(default = "default_sweep_interval")]
    pub session_sweep_interval_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie `Secure; SameSite=None`
    #[serde(default = "default_true")]
    pub secure_cookie: bool,

    /// Accept `X-Auth-Token` and `?token=` credentials
    #[serde(default)]
    pub allow_fallback_token: bool,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours * 3600)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production forbids fallback token channels and insecure cookies.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_ttl_hours == 0 || self.session_ttl_hours > 8760 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.session_sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        let name_ok = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !name_ok {
            return Err(ValidationError::InvalidCookieName);
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidBcryptCost);
        }

        if *environment == Environment::Production {
            if self.allow_fallback_token {
                return Err(ValidationError::FallbackTokenInProduction);
            }
            if !self.secure_cookie {
                return Err(ValidationError::InsecureCookieInProduction);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            session_sweep_interval_secs: default_sweep_interval(),
            cookie_name: default_cookie_name(),
            secure_cookie: true,
            allow_fallback_token: false,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_session_ttl_hours() -> u64 {
    168
}

fn default_sweep_interval() -> u64 {
    600
}

fn default_cookie_name() -> String {
    "imx_token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl(), Duration::from_secs(168 * 3600));
        assert_eq!(config.sweep_interval(), Duration::from_secs(600));
        assert_eq!(config.cookie_name, "imx_token");
        assert!(config.secure_cookie);
        assert!(!config.allow_fallback_token);
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_fallback_token_rejected_in_production() {
        let config = AuthConfig {
            allow_fallback_token: true,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::FallbackTokenInProduction)
        );
    }

    #[test]
    fn test_insecure_cookie_rejected_in_production() {
        let config = AuthConfig {
            secure_cookie: false,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Staging).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::InsecureCookieInProduction)
        );
    }

    #[test]
    fn test_cookie_name_must_be_a_token() {
        let config = AuthConfig {
            cookie_name: "bad name;".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidCookieName)
        );
    }

    #[test]
    fn test_zero_ttl_is_invalid() {
        let config = AuthConfig {
            session_ttl_hours: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidSessionTtl)
        );
    }
}
