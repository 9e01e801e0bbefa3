//! Auth Service Library
//!
//! Credential handling for employees: password digests, login against an
//! employee lookup, and signed bearer token issuance and verification.

pub mod config;
pub mod lookup;
pub mod service;

pub use config::AuthServiceConfig;
pub use lookup::EmployeeLookup;
pub use service::{
    Authenticator, Claims, CredentialService, Identity, IssuedToken, LoginResponse, TokenIssuer,
};
