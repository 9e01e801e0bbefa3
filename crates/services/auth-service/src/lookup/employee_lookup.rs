//! Employee lookup by email.

use async_trait::async_trait;

use common::AppResult;
use domain::Employee;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity source used during authentication.
///
/// Implemented by whatever persistence layer stores employees. The returned
/// employee carries the stored password hash.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    /// Find an employee by normalized (trimmed, lower-cased) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;
}
