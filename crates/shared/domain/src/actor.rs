//! The employee on whose behalf an operation runs.

use serde::{Deserialize, Serialize};

use crate::employee::Employee;

/// Acting employee, as known from an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub employee_id: i64,
    pub role_id: i64,
}

impl Actor {
    pub fn new(employee_id: i64, role_id: i64) -> Self {
        Self {
            employee_id,
            role_id,
        }
    }
}

impl From<&Employee> for Actor {
    fn from(employee: &Employee) -> Self {
        Self::new(employee.id(), employee.role_id())
    }
}
