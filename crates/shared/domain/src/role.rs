//! Employee role entity.
//!
//! Roles are totally ordered by `level`: a higher level is more senior.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ROLE_LEVEL, MAX_ROLE_NAME_LENGTH, MIN_ROLE_LEVEL, UNASSIGNED_ID};
use crate::error::{DomainError, DomainResult};

/// Employee role entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RoleRecord", into = "RoleRecord")]
pub struct EmployeeRole {
    id: i64,
    name: String,
    level: i32,
}

impl EmployeeRole {
    /// Create a new, not yet persisted role
    pub fn new(name: impl Into<String>, level: i32) -> DomainResult<Self> {
        Self::build(UNASSIGNED_ID, name.into(), level)
    }

    /// Rebuild a role loaded from storage
    pub fn load(id: i64, name: impl Into<String>, level: i32) -> DomainResult<Self> {
        Self::build(id, name.into(), level)
    }

    fn build(id: i64, name: String, level: i32) -> DomainResult<Self> {
        validate_name(&name)?;
        validate_level(level)?;

        Ok(Self { id, name, level })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Rename the role
    pub fn update_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Move the role to another level
    pub fn update_level(&mut self, level: i32) -> DomainResult<()> {
        validate_level(level)?;
        self.level = level;
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "Role name cannot be empty"));
    }
    if name.chars().count() > MAX_ROLE_NAME_LENGTH {
        return Err(DomainError::validation(
            "name",
            format!("Role name cannot exceed {} characters", MAX_ROLE_NAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_level(level: i32) -> DomainResult<()> {
    if level < MIN_ROLE_LEVEL {
        return Err(DomainError::validation(
            "level",
            format!("Role level must be at least {}", MIN_ROLE_LEVEL),
        ));
    }
    if level > MAX_ROLE_LEVEL {
        return Err(DomainError::validation(
            "level",
            format!("Role level cannot exceed {}", MAX_ROLE_LEVEL),
        ));
    }
    Ok(())
}

impl PartialEq for EmployeeRole {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EmployeeRole {}

impl std::hash::Hash for EmployeeRole {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Level {})", self.name, self.level)
    }
}

/// Wire shape of a role; deserialization goes through validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleRecord {
    #[serde(default)]
    role_id: i64,
    name: String,
    level: i32,
}

impl TryFrom<RoleRecord> for EmployeeRole {
    type Error = DomainError;

    fn try_from(record: RoleRecord) -> Result<Self, Self::Error> {
        Self::load(record.role_id, record.name, record.level)
    }
}

impl From<EmployeeRole> for RoleRecord {
    fn from(role: EmployeeRole) -> Self {
        Self {
            role_id: role.id,
            name: role.name,
            level: role.level,
        }
    }
}
