//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Identity
// =============================================================================

/// Id carried by entities that have not been persisted yet
pub const UNASSIGNED_ID: i64 = 0;

// =============================================================================
// Employee
// =============================================================================

/// Minimum length of first and last names
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of first and last names
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length of a normalized document number
pub const MAX_DOC_NUMBER_LENGTH: usize = 25;

/// Digit count of a CPF (individual taxpayer id)
pub const CPF_DIGITS: usize = 11;

/// Digit count of a CNPJ (corporate taxpayer id)
pub const CNPJ_DIGITS: usize = 14;

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 180;

/// Maximum length of a stored password (plaintext or hash)
pub const MAX_PASSWORD_LENGTH: usize = 520;

/// Employees must be at least this old
pub const MIN_EMPLOYEE_AGE: u32 = 18;

/// Birthdays implying an older age are rejected
pub const MAX_EMPLOYEE_AGE: u32 = 120;

// =============================================================================
// Roles
// =============================================================================

/// Maximum length of a role name
pub const MAX_ROLE_NAME_LENGTH: usize = 80;

/// Lowest role level
pub const MIN_ROLE_LEVEL: i32 = 1;

/// Highest role level
pub const MAX_ROLE_LEVEL: i32 = 100;

// =============================================================================
// Phones
// =============================================================================

/// Minimum length of a trimmed phone number
pub const MIN_PHONE_LENGTH: usize = 8;

/// Maximum length of a trimmed phone number
pub const MAX_PHONE_LENGTH: usize = 25;

/// Digit count of a mobile number (area code + 9-prefixed subscriber)
pub const MOBILE_DIGITS: usize = 11;

/// Digit count of a landline number (area code + subscriber)
pub const LANDLINE_DIGITS: usize = 10;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in minutes
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;

/// Default issuer written into issued tokens
pub const DEFAULT_JWT_ISSUER: &str = "hr-api";

/// Default audience written into issued tokens
pub const DEFAULT_JWT_AUDIENCE: &str = "hr-client";

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
