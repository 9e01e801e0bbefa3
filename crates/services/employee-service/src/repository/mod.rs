//! Repository layer for data access.

mod employee_repository;
mod role_repository;

pub use employee_repository::EmployeeRepository;
pub use role_repository::RoleRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
