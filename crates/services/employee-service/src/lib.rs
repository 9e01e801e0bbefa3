//! Employee Service Library
//!
//! Employee and role use cases. Writes are gated by the role hierarchy: an
//! acting employee can never create or edit someone in a more senior role.
//! Storage is reached only through the repository traits.

pub mod repository;
pub mod service;

pub use repository::{EmployeeRepository, RoleRepository};
pub use service::{
    EmployeeInput, EmployeeManager, EmployeeService, RoleCatalog, RoleHierarchy, RoleService,
};
