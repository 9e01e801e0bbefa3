//! Collaborators the credential service reads identities from.

mod employee_lookup;

pub use employee_lookup::EmployeeLookup;

#[cfg(any(test, feature = "test-utils"))]
pub use employee_lookup::MockEmployeeLookup;
