//! Employee phone entity.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    LANDLINE_DIGITS, MAX_PHONE_LENGTH, MIN_PHONE_LENGTH, MOBILE_DIGITS, UNASSIGNED_ID,
};
use crate::error::{DomainError, DomainResult};

// Digits, whitespace, parentheses, hyphen and plus.
static PHONE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d\s()\-+]+$")
        .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
});

/// A phone number owned by one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PhoneRecord", into = "PhoneRecord")]
pub struct EmployeePhone {
    id: i64,
    employee_id: i64,
    phone: String,
}

impl EmployeePhone {
    /// Create a new, not yet persisted phone for `employee_id`
    pub fn new(employee_id: i64, phone: &str) -> DomainResult<Self> {
        Self::build(UNASSIGNED_ID, employee_id, phone)
    }

    /// Rebuild a phone loaded from storage
    pub fn load(id: i64, employee_id: i64, phone: &str) -> DomainResult<Self> {
        Self::build(id, employee_id, phone)
    }

    fn build(id: i64, employee_id: i64, phone: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            employee_id,
            phone: normalize(phone)?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    /// The normalized (trimmed) number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Replace the number
    pub fn update_phone(&mut self, phone: &str) -> DomainResult<()> {
        self.phone = normalize(phone)?;
        Ok(())
    }

    /// The number with every non-digit removed
    pub fn digits_only(&self) -> String {
        self.phone.chars().filter(char::is_ascii_digit).collect()
    }

    /// Brazilian mobile: 11 digits with a `9` after the area code.
    pub fn is_mobile(&self) -> bool {
        let digits = self.digits_only();
        digits.len() == MOBILE_DIGITS && digits.as_bytes()[2] == b'9'
    }

    /// Brazilian landline: 10 digits.
    pub fn is_landline(&self) -> bool {
        self.digits_only().len() == LANDLINE_DIGITS
    }
}

/// Validate `raw` and return its stored form.
fn normalize(raw: &str) -> DomainResult<String> {
    if raw.trim().is_empty() {
        return Err(DomainError::validation("phone", "Phone number cannot be empty"));
    }

    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length > MAX_PHONE_LENGTH {
        return Err(DomainError::validation(
            "phone",
            format!("Phone number cannot exceed {} characters", MAX_PHONE_LENGTH),
        ));
    }
    if length < MIN_PHONE_LENGTH {
        return Err(DomainError::validation(
            "phone",
            format!("Phone number must have at least {} characters", MIN_PHONE_LENGTH),
        ));
    }
    if !PHONE_CHARS.is_match(raw) {
        return Err(DomainError::validation(
            "phone",
            "Phone number contains invalid characters",
        ));
    }

    Ok(trimmed.to_string())
}

impl PartialEq for EmployeePhone {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EmployeePhone {}

impl std::hash::Hash for EmployeePhone {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for EmployeePhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.phone)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhoneRecord {
    #[serde(default)]
    phone_id: i64,
    #[serde(default)]
    employee_id: i64,
    phone: String,
}

impl TryFrom<PhoneRecord> for EmployeePhone {
    type Error = DomainError;

    fn try_from(record: PhoneRecord) -> Result<Self, Self::Error> {
        Self::load(record.phone_id, record.employee_id, &record.phone)
    }
}

impl From<EmployeePhone> for PhoneRecord {
    fn from(phone: EmployeePhone) -> Self {
        Self {
            phone_id: phone.id,
            employee_id: phone.employee_id,
            phone: phone.phone,
        }
    }
}
