//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs. The payload claims are `sub` (employee id),
//! `email`, `given_name`, `family_name`, `RoleId`, `jti`, `exp`, `iss` and
//! `aud`; other services decode exactly these names.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{Actor, Employee, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    #[serde(rename = "RoleId")]
    pub role_id: String,
    pub jti: String,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// The acting employee this token was issued for.
    pub fn actor(&self) -> AppResult<Actor> {
        let employee_id = self
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized)?;
        let role_id = self
            .role_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(Actor::new(employee_id, role_id))
    }
}

/// Verified identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub employee_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i64,
}

impl From<&Employee> for Identity {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id(),
            email: employee.email().to_string(),
            first_name: employee.first_name().to_string(),
            last_name: employee.last_name().to_string(),
            role_id: employee.role_id(),
        }
    }
}

/// A signed token and its expiry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Expiration instant
    pub expires_at: DateTime<Utc>,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Signs and verifies tokens with one configuration.
#[derive(Clone)]
pub struct TokenIssuer {
    config: JwtConfig,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer.
    ///
    /// # Errors
    /// A missing signing key is a configuration error.
    pub fn new(config: JwtConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Sign a fresh token for `identity`. Every call gets a new `jti`.
    pub fn issue(&self, identity: &Identity) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.config.lifetime()?)
            .ok_or_else(|| AppError::configuration("JWT expiration is out of range"))?;

        let claims = Claims {
            sub: identity.employee_id.to_string(),
            email: identity.email.clone(),
            given_name: identity.first_name.clone(),
            family_name: identity.last_name.clone(),
            role_id: identity.role_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )?;

        info!(
            employee_id = identity.employee_id,
            expires_at = %expires_at,
            "Issued access token"
        );

        Ok(IssuedToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_at,
            expires_in: self.config.lifetime_seconds()?,
        })
    }

    /// Check signature, issuer, audience and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &validation,
        )?;
        debug!(sub = %token_data.claims.sub, "Token verified");

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-signing-key-0123456789".to_string(),
            ..JwtConfig::default()
        }
    }

    fn identity() -> Identity {
        Identity {
            employee_id: 7,
            email: "john@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            role_id: 2,
        }
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let result = TokenIssuer::new(JwtConfig::default());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_expiration_beyond_range_rejected_at_construction() {
        let result = TokenIssuer::new(JwtConfig {
            expiration_minutes: i64::MAX / 60,
            ..config()
        });
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_long_expiration_issues_token() {
        let minutes = 10 * 365 * 24 * 60;
        let issuer = TokenIssuer::new(JwtConfig {
            expiration_minutes: minutes,
            ..config()
        })
        .unwrap();
        let issued = issuer.issue(&identity()).unwrap();

        assert_eq!(issued.expires_in, minutes * 60);
        assert!(issuer.verify(&issued.access_token).is_ok());
    }

    #[test]
    fn test_claims_round_trip() {
        let issuer = TokenIssuer::new(config()).unwrap();
        let issued = issuer.issue(&identity()).unwrap();
        let claims = issuer.verify(&issued.access_token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role_id, "2");
        assert_eq!(claims.email, "john@example.com");
        assert_eq!(claims.given_name, "John");
        assert_eq!(claims.family_name, "Doe");
        assert_eq!(claims.iss, "hr-api");
        assert_eq!(claims.aud, "hr-client");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 3600);
        assert_eq!(claims.actor().unwrap(), Actor::new(7, 2));
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let issuer = TokenIssuer::new(config()).unwrap();
        let first = issuer.verify(&issuer.issue(&identity()).unwrap().access_token).unwrap();
        let second = issuer.verify(&issuer.issue(&identity()).unwrap().access_token).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_wrong_key_or_audience_rejected() {
        let issuer = TokenIssuer::new(config()).unwrap();
        let token = issuer.issue(&identity()).unwrap().access_token;

        let other_key = TokenIssuer::new(JwtConfig {
            secret: "another-signing-key-9876543210".to_string(),
            ..JwtConfig::default()
        })
        .unwrap();
        assert!(matches!(other_key.verify(&token), Err(AppError::Jwt(_))));

        let other_audience = TokenIssuer::new(JwtConfig {
            audience: "someone-else".to_string(),
            ..config()
        })
        .unwrap();
        assert!(other_audience.verify(&token).is_err());
    }

    #[test]
    fn test_payload_claim_names() {
        let issuer = TokenIssuer::new(config()).unwrap();
        let token = issuer.issue(&identity()).unwrap().access_token;

        let mut insecure = Validation::new(Algorithm::HS256);
        insecure.insecure_disable_signature_validation();
        insecure.validate_aud = false;
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &insecure)
            .unwrap()
            .claims;

        let mut keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["RoleId", "aud", "email", "exp", "family_name", "given_name", "iss", "jti", "sub"]
        );
    }

    #[test]
    fn test_malformed_subject_is_unauthorized() {
        let issuer = TokenIssuer::new(config()).unwrap();
        let token = issuer.issue(&identity()).unwrap().access_token;
        let mut claims = issuer.verify(&token).unwrap();
        claims.sub = "not-a-number".to_string();

        assert!(matches!(claims.actor(), Err(AppError::Unauthorized)));
    }
}
