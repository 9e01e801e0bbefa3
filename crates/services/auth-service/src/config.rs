//! Auth service configuration.

use std::env;

use common::{AppError, AppResult, JwtConfig};
use domain::{DEFAULT_JWT_AUDIENCE, DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_JWT_ISSUER};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Token signing settings
    pub jwt: JwtConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns a configuration error when no signing key is set or the
    /// expiry is not an integer number of minutes.
    pub fn from_env() -> AppResult<Self> {
        let secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("AUTH_SERVICE_JWT_SECRET"))
            .map_err(|_| AppError::configuration("JWT_SECRET must be set"))?;

        let jwt = JwtConfig {
            secret,
            issuer: env::var("JWT_ISSUER")
                .or_else(|_| env::var("AUTH_SERVICE_JWT_ISSUER"))
                .unwrap_or_else(|_| DEFAULT_JWT_ISSUER.to_string()),
            audience: env::var("JWT_AUDIENCE")
                .or_else(|_| env::var("AUTH_SERVICE_JWT_AUDIENCE"))
                .unwrap_or_else(|_| DEFAULT_JWT_AUDIENCE.to_string()),
            expiration_minutes: parse_expiration(
                env::var("JWT_EXPIRATION_MINUTES")
                    .or_else(|_| env::var("AUTH_SERVICE_JWT_EXPIRATION_MINUTES"))
                    .ok(),
            )?,
        };
        jwt.validate()?;

        Ok(Self { jwt })
    }
}

/// Token lifetime from its raw setting, defaulting when unset.
fn parse_expiration(raw: Option<String>) -> AppResult<i64> {
    match raw {
        None => Ok(DEFAULT_JWT_EXPIRATION_MINUTES),
        Some(value) => value.trim().parse().map_err(|_| {
            AppError::configuration("JWT_EXPIRATION_MINUTES must be an integer number of minutes")
        }),
    }
}
