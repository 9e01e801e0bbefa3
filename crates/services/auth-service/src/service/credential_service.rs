//! Credential service - password digests, login and bearer tokens.
//!
//! The service is stateless between calls: the lookup and the token issuer
//! are fixed at construction, everything else arrives per call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, JwtConfig};
use domain::{Employee, Password};

use super::token::{Claims, Identity, IssuedToken, TokenIssuer};
use crate::lookup::EmployeeLookup;

// Compared against when no employee matches, so both failure paths compute a
// digest.
const DUMMY_HASH: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

/// Response returned after a successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed JWT
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    /// The authenticated employee, without the password hash
    pub employee: Employee,
}

/// Credential service trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Digest a plaintext password into its stored form
    fn hash_password(&self, plain_text: &str) -> String;

    /// Check a plaintext password against a stored digest
    fn verify_password(&self, plain_text: &str, stored_hash: &str) -> bool;

    /// Find the employee owning `email` whose password matches.
    ///
    /// An unknown email and a wrong password both yield `None`.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<Employee>>;

    /// Sign a token for an already authenticated employee
    fn issue_token(&self, employee: &Employee) -> AppResult<IssuedToken>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Authenticate and issue a token in one step
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse>;
}

/// Credential service backed by an [`EmployeeLookup`].
pub struct Authenticator {
    lookup: Arc<dyn EmployeeLookup>,
    issuer: TokenIssuer,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// A missing signing key is a configuration error.
    pub fn new(lookup: Arc<dyn EmployeeLookup>, config: JwtConfig) -> AppResult<Self> {
        Ok(Self {
            lookup,
            issuer: TokenIssuer::new(config)?,
        })
    }
}

#[async_trait]
impl CredentialService for Authenticator {
    fn hash_password(&self, plain_text: &str) -> String {
        debug!("Hashing password");
        Password::hash(plain_text).into_string()
    }

    fn verify_password(&self, plain_text: &str, stored_hash: &str) -> bool {
        Password::from_hash(stored_hash).verify(plain_text)
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<Employee>> {
        let email = email.trim().to_lowercase();
        let employee = self.lookup.find_by_email(&email).await?;

        let stored_hash = employee
            .as_ref()
            .map_or(DUMMY_HASH, |employee| employee.password());
        let password_valid = self.verify_password(password, stored_hash);

        match employee {
            Some(employee) if password_valid => Ok(Some(employee)),
            _ => {
                warn!("Authentication failed");
                Ok(None)
            }
        }
    }

    fn issue_token(&self, employee: &Employee) -> AppResult<IssuedToken> {
        self.issuer.issue(&Identity::from(employee))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.issuer.verify(token)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let employee = self
            .authenticate(email, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let issued = self.issue_token(&employee)?;
        info!(employee_id = employee.id(), "Employee logged in");

        Ok(LoginResponse {
            token: issued.access_token,
            token_type: issued.token_type,
            expires_at: issued.expires_at,
            employee,
        })
    }
}
