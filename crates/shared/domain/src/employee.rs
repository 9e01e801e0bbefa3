//! Employee domain entity.
//!
//! An [`Employee`] can only be obtained through [`Employee::new`] or
//! [`Employee::load`], and only changed through its `update_*` methods, so an
//! instance is never observable in an invalid state. Each mutator validates the
//! one field it touches before writing it.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CNPJ_DIGITS, CPF_DIGITS, MAX_DOC_NUMBER_LENGTH, MAX_EMAIL_LENGTH, MAX_EMPLOYEE_AGE,
    MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_EMPLOYEE_AGE, MIN_NAME_LENGTH, UNASSIGNED_ID,
};
use crate::error::{DomainError, DomainResult};
use crate::phone::EmployeePhone;
use crate::role::EmployeeRole;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
});

/// Summary of an employee's manager, resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerRef {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl ManagerRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Employee> for ManagerRef {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
        }
    }
}

/// Raw field values an employee is built from.
///
/// `role` and `manager` optionally carry the already resolved relations; when
/// present their ids must match `role_id` / `manager_id`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeData {
    pub first_name: String,
    pub last_name: String,
    pub doc_number: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub birthday: NaiveDate,
    pub role_id: i64,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub role: Option<EmployeeRole>,
    #[serde(default)]
    pub manager: Option<ManagerRef>,
}

// Don't expose the password in debug output (security)
impl std::fmt::Debug for EmployeeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeData")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("doc_number", &self.doc_number)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("birthday", &self.birthday)
            .field("role_id", &self.role_id)
            .field("manager_id", &self.manager_id)
            .finish()
    }
}

impl From<&Employee> for EmployeeData {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            doc_number: employee.doc_number.clone(),
            email: employee.email.clone(),
            password: employee.password.clone(),
            birthday: employee.birthday,
            role_id: employee.role_id,
            manager_id: employee.manager_id,
            role: employee.role.clone(),
            manager: employee.manager.clone(),
        }
    }
}

/// Employee domain entity
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "employeeId")]
    id: i64,
    first_name: String,
    last_name: String,
    doc_number: String,
    email: String,
    #[serde(skip_serializing)]
    password: String,
    birthday: NaiveDate,
    role_id: i64,
    manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<EmployeeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manager: Option<ManagerRef>,
    phones: Vec<EmployeePhone>,
}

impl Employee {
    /// Create a new, not yet persisted employee
    pub fn new(data: EmployeeData) -> DomainResult<Self> {
        Self::build(UNASSIGNED_ID, data)
    }

    /// Rebuild an employee loaded from storage
    pub fn load(id: i64, data: EmployeeData) -> DomainResult<Self> {
        Self::build(id, data)
    }

    fn build(id: i64, data: EmployeeData) -> DomainResult<Self> {
        let EmployeeData {
            first_name,
            last_name,
            doc_number,
            email,
            password,
            birthday,
            role_id,
            manager_id,
            role,
            manager,
        } = data;

        validate_name("first_name", "First name", &first_name)?;
        validate_name("last_name", "Last name", &last_name)?;
        let doc_number = normalize_doc_number(&doc_number)?;
        let email = normalize_email(&email)?;
        validate_password(&password)?;
        validate_birthday(birthday, today())?;
        validate_role_id(role_id)?;
        validate_manager_id(id, manager_id)?;

        if let Some(role) = &role {
            if role.id() != role_id {
                return Err(DomainError::validation(
                    "role",
                    format!("Role {} does not match role id {}", role.id(), role_id),
                ));
            }
        }
        if let Some(manager) = &manager {
            if Some(manager.employee_id) != manager_id {
                return Err(DomainError::validation(
                    "manager",
                    "Manager does not match manager id",
                ));
            }
        }

        Ok(Self {
            id,
            first_name,
            last_name,
            doc_number,
            email,
            password,
            birthday,
            role_id,
            manager_id,
            role,
            manager,
            phones: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn doc_number(&self) -> &str {
        &self.doc_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password: plaintext before the credential boundary, hash after.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn role_id(&self) -> i64 {
        self.role_id
    }

    pub fn manager_id(&self) -> Option<i64> {
        self.manager_id
    }

    /// Resolved role, when the loader supplied it
    pub fn role(&self) -> Option<&EmployeeRole> {
        self.role.as_ref()
    }

    /// Resolved manager, when the loader supplied it
    pub fn manager(&self) -> Option<&ManagerRef> {
        self.manager.as_ref()
    }

    pub fn phones(&self) -> &[EmployeePhone] {
        &self.phones
    }

    // -------------------------------------------------------------------------
    // Updates
    // -------------------------------------------------------------------------

    pub fn update_first_name(&mut self, first_name: impl Into<String>) -> DomainResult<()> {
        let first_name = first_name.into();
        validate_name("first_name", "First name", &first_name)?;
        self.first_name = first_name;
        Ok(())
    }

    pub fn update_last_name(&mut self, last_name: impl Into<String>) -> DomainResult<()> {
        let last_name = last_name.into();
        validate_name("last_name", "Last name", &last_name)?;
        self.last_name = last_name;
        Ok(())
    }

    pub fn update_doc_number(&mut self, doc_number: &str) -> DomainResult<()> {
        self.doc_number = normalize_doc_number(doc_number)?;
        Ok(())
    }

    pub fn update_email(&mut self, email: &str) -> DomainResult<()> {
        self.email = normalize_email(email)?;
        Ok(())
    }

    pub fn update_password(&mut self, password: impl Into<String>) -> DomainResult<()> {
        let password = password.into();
        validate_password(&password)?;
        self.password = password;
        Ok(())
    }

    pub fn update_birthday(&mut self, birthday: NaiveDate) -> DomainResult<()> {
        validate_birthday(birthday, today())?;
        self.birthday = birthday;
        Ok(())
    }

    /// Move the employee to another role. A resolved role for a different id
    /// is dropped.
    pub fn update_role(&mut self, role_id: i64) -> DomainResult<()> {
        validate_role_id(role_id)?;
        if self.role.as_ref().is_some_and(|role| role.id() != role_id) {
            self.role = None;
        }
        self.role_id = role_id;
        Ok(())
    }

    /// Set or clear the manager. A resolved manager for a different id is
    /// dropped.
    pub fn assign_manager(&mut self, manager_id: Option<i64>) -> DomainResult<()> {
        validate_manager_id(self.id, manager_id)?;
        if self
            .manager
            .as_ref()
            .is_some_and(|manager| Some(manager.employee_id) != manager_id)
        {
            self.manager = None;
        }
        self.manager_id = manager_id;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Phones
    // -------------------------------------------------------------------------

    /// Attach a phone. It must belong to this employee (any owner is accepted
    /// while the employee is unpersisted) and its number must not already be
    /// registered.
    pub fn add_phone(&mut self, phone: EmployeePhone) -> DomainResult<()> {
        if phone.employee_id() != self.id && self.id != UNASSIGNED_ID {
            return Err(DomainError::validation(
                "phones",
                "Phone does not belong to this employee",
            ));
        }
        if self.has_phone_number(phone.phone()) {
            return Err(DomainError::validation(
                "phones",
                format!("Phone number {} is already registered for this employee", phone),
            ));
        }

        self.phones.push(phone);
        Ok(())
    }

    /// Build a new phone owned by this employee and attach it.
    pub fn add_phone_number(&mut self, number: &str) -> DomainResult<()> {
        let phone = EmployeePhone::new(self.id, number)?;
        self.add_phone(phone)
    }

    /// Detach a phone. Persisted phones match by id, unpersisted ones by number.
    pub fn remove_phone(&mut self, phone: &EmployeePhone) -> Option<EmployeePhone> {
        let position = self.phones.iter().position(|existing| {
            if phone.id() == UNASSIGNED_ID {
                existing.id() == UNASSIGNED_ID && existing.phone() == phone.phone()
            } else {
                existing == phone
            }
        })?;
        Some(self.phones.remove(position))
    }

    /// Whether `number` (after normalization) is already registered.
    pub fn has_phone_number(&self, number: &str) -> bool {
        let number = number.trim();
        self.phones.iter().any(|existing| existing.phone() == number)
    }

    // -------------------------------------------------------------------------
    // Business queries
    // -------------------------------------------------------------------------

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years today
    pub fn age(&self) -> i32 {
        self.age_on(today())
    }

    /// Age in whole years on `date`
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        years_between(self.birthday, date)
    }

    pub fn is_adult(&self) -> bool {
        self.age() >= MIN_EMPLOYEE_AGE as i32
    }

    pub fn is_minor(&self) -> bool {
        !self.is_adult()
    }

    pub fn has_manager(&self) -> bool {
        self.manager_id.is_some()
    }
}

// =============================================================================
// Validation
// =============================================================================

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn years_between(birthday: NaiveDate, date: NaiveDate) -> i32 {
    let mut years = date.year() - birthday.year();
    if (date.month(), date.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years
}

fn validate_name(field: &'static str, label: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, format!("{} cannot be empty", label)));
    }

    let length = value.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(DomainError::validation(
            field,
            format!("{} cannot exceed {} characters", label, MAX_NAME_LENGTH),
        ));
    }
    if length < MIN_NAME_LENGTH {
        return Err(DomainError::validation(
            field,
            format!("{} must have at least {} characters", label, MIN_NAME_LENGTH),
        ));
    }
    Ok(())
}

/// Keeps digits, `.`, `-` and `/`, then checks the CPF/CNPJ shape.
fn normalize_doc_number(raw: &str) -> DomainResult<String> {
    const FIELD: &str = "doc_number";

    if raw.trim().is_empty() {
        return Err(DomainError::validation(FIELD, "Document number cannot be empty"));
    }

    let normalized: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/'))
        .collect();

    if normalized.chars().count() > MAX_DOC_NUMBER_LENGTH {
        return Err(DomainError::validation(
            FIELD,
            format!("Document number cannot exceed {} characters", MAX_DOC_NUMBER_LENGTH),
        ));
    }

    let digits: Vec<u8> = normalized.bytes().filter(u8::is_ascii_digit).collect();
    if digits.len() != CPF_DIGITS && digits.len() != CNPJ_DIGITS {
        return Err(DomainError::validation(
            FIELD,
            format!(
                "Document number must be a valid CPF ({} digits) or CNPJ ({} digits)",
                CPF_DIGITS, CNPJ_DIGITS
            ),
        ));
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(DomainError::validation(
            FIELD,
            "Document number cannot have all digits the same",
        ));
    }

    Ok(normalized)
}

/// Trims and lower-cases, then checks length and `local@domain.tld` shape.
fn normalize_email(raw: &str) -> DomainResult<String> {
    const FIELD: &str = "email";

    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::validation(FIELD, "Email cannot be empty"));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(DomainError::validation(
            FIELD,
            format!("Email cannot exceed {} characters", MAX_EMAIL_LENGTH),
        ));
    }
    if !EMAIL_SHAPE.is_match(&email) {
        return Err(DomainError::validation(FIELD, "Email format is invalid"));
    }

    Ok(email)
}

// Emptiness is not enforced here: an empty password is accepted at entity level.
fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(DomainError::validation(
            "password",
            format!("Password cannot exceed {} characters", MAX_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    const FIELD: &str = "birthday";

    if birthday >= today {
        return Err(DomainError::validation(FIELD, "Birthday must be in the past"));
    }

    let age = years_between(birthday, today);
    if age > MAX_EMPLOYEE_AGE as i32 {
        return Err(DomainError::validation(
            FIELD,
            format!("Birthday indicates an age greater than {} years", MAX_EMPLOYEE_AGE),
        ));
    }
    if age < MIN_EMPLOYEE_AGE as i32 {
        return Err(DomainError::validation(
            FIELD,
            format!(
                "Employee cannot be underage. Must be at least {} years old",
                MIN_EMPLOYEE_AGE
            ),
        ));
    }
    Ok(())
}

fn validate_role_id(role_id: i64) -> DomainResult<()> {
    if role_id <= 0 {
        return Err(DomainError::validation(
            "role_id",
            "Role ID must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_manager_id(id: i64, manager_id: Option<i64>) -> DomainResult<()> {
    if manager_id == Some(id) {
        return Err(DomainError::validation(
            "manager_id",
            "Employee cannot be their own manager",
        ));
    }
    Ok(())
}

// =============================================================================
// Identity
// =============================================================================

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl std::hash::Hash for Employee {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

// Don't expose the password in debug output (security)
impl std::fmt::Debug for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("doc_number", &self.doc_number)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("birthday", &self.birthday)
            .field("role_id", &self.role_id)
            .field("manager_id", &self.manager_id)
            .field("phones", &self.phones)
            .finish()
    }
}
