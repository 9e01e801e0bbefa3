//! Role hierarchy decision.
//!
//! An employee may manage (create, view, modify) another employee only when the
//! target role is not more senior than their own. Equal levels are permitted.

use crate::error::{DomainError, DomainResult};
use crate::role::EmployeeRole;

/// Outcome of comparing an acting role against a target role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

impl Decision {
    pub fn is_permit(self) -> bool {
        matches!(self, Decision::Permit)
    }
}

/// Compare two role levels.
pub fn decide(acting_level: i32, target_level: i32) -> Decision {
    if target_level > acting_level {
        Decision::Deny
    } else {
        Decision::Permit
    }
}

/// Resolve both roles in `roles` and check that `acting` may manage `target`.
///
/// An id missing from `roles` is a consistency error, not a denial.
pub fn check(
    roles: &[EmployeeRole],
    acting_role_id: i64,
    target_role_id: i64,
) -> DomainResult<()> {
    let acting = find(roles, acting_role_id, "Acting employee")?;
    let target = find(roles, target_role_id, "Target")?;

    if decide(acting.level(), target.level()).is_permit() {
        return Ok(());
    }

    Err(DomainError::forbidden(format!(
        "You do not have permission to manage an employee with role '{}' (Level {}). \
         Your role '{}' (Level {}) does not allow managing higher-level positions",
        target.name(),
        target.level(),
        acting.name(),
        acting.level()
    )))
}

fn find<'a>(
    roles: &'a [EmployeeRole],
    role_id: i64,
    who: &str,
) -> DomainResult<&'a EmployeeRole> {
    roles
        .iter()
        .find(|role| role.id() == role_id)
        .ok_or_else(|| {
            DomainError::consistency(format!("{} role with ID {} not found", who, role_id))
        })
}
