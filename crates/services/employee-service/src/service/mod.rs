//! Employee service business logic.

mod employee_service;
mod role_hierarchy;
mod role_service;

pub use employee_service::{EmployeeInput, EmployeeManager, EmployeeService};
pub use role_hierarchy::RoleHierarchy;
pub use role_service::{RoleCatalog, RoleService};
