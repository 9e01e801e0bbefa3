//! Credential service business logic.

mod credential_service;
mod token;

pub use credential_service::{Authenticator, CredentialService, LoginResponse};
pub use token::{Claims, Identity, IssuedToken, TokenIssuer};
