//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! self-validating employees, roles and phones, the role hierarchy decision
//! and the stored password digest.

pub mod actor;
pub mod constants;
pub mod employee;
pub mod error;
pub mod hierarchy;
pub mod password;
pub mod phone;
pub mod role;

pub use actor::Actor;
pub use constants::*;
pub use employee::{Employee, EmployeeData, ManagerRef};
pub use error::{DomainError, DomainResult};
pub use hierarchy::Decision;
pub use password::Password;
pub use phone::EmployeePhone;
pub use role::EmployeeRole;
