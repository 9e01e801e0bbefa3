//! Shared configuration structures.

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use domain::{
    DEFAULT_JWT_AUDIENCE, DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_JWT_ISSUER, SECONDS_PER_MINUTE,
};

use crate::error::{AppError, AppResult};

/// JWT configuration for token issuance and verification.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
}

impl JwtConfig {
    /// Reject configurations no token could be signed with.
    pub fn validate(&self) -> AppResult<()> {
        if self.secret.trim().is_empty() {
            return Err(AppError::configuration("JWT secret key not configured"));
        }
        if self.expiration_minutes <= 0 {
            return Err(AppError::configuration(
                "JWT expiration must be a positive number of minutes",
            ));
        }
        let lifetime = self.lifetime()?;
        self.lifetime_seconds()?;
        if Utc::now().checked_add_signed(lifetime).is_none() {
            return Err(expiration_out_of_range());
        }
        Ok(())
    }

    /// Token lifetime as a time delta.
    pub fn lifetime(&self) -> AppResult<TimeDelta> {
        TimeDelta::try_minutes(self.expiration_minutes).ok_or_else(expiration_out_of_range)
    }

    /// Token lifetime in seconds, as reported in `expires_in`.
    pub fn lifetime_seconds(&self) -> AppResult<i64> {
        self.expiration_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .ok_or_else(expiration_out_of_range)
    }

    /// Get JWT secret as bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

fn expiration_out_of_range() -> AppError {
    AppError::configuration("JWT expiration is out of range")
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: DEFAULT_JWT_ISSUER.to_string(),
            audience: DEFAULT_JWT_AUDIENCE.to_string(),
            expiration_minutes: DEFAULT_JWT_EXPIRATION_MINUTES,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_secret() {
        let config = JwtConfig::default();

        assert_eq!(config.expiration_minutes, 60);
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = JwtConfig {
            secret: "a-signing-key".to_string(),
            ..JwtConfig::default()
        };
        assert!(config.validate().is_ok());

        config.expiration_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expiration_upper_bound() {
        let mut config = JwtConfig {
            secret: "a-signing-key".to_string(),
            expiration_minutes: i64::MAX / 60,
            ..JwtConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
        assert!(config.lifetime_seconds().is_ok());

        config.expiration_minutes = i64::MAX;
        assert!(matches!(config.lifetime(), Err(AppError::Configuration(_))));
        assert!(matches!(config.lifetime_seconds(), Err(AppError::Configuration(_))));

        // Ten years still fits
        config.expiration_minutes = 10 * 365 * 24 * 60;
        assert!(config.validate().is_ok());
        assert_eq!(config.lifetime_seconds().unwrap(), 10 * 365 * 24 * 3600);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig {
            secret: "top-secret-value".to_string(),
            ..JwtConfig::default()
        };
        assert!(!format!("{:?}", config).contains("top-secret-value"));
    }
}
