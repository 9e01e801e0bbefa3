//! Employee repository seam.

use async_trait::async_trait;

use common::AppResult;
use domain::Employee;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
///
/// Implementations persist the employee together with its phones; phones are
/// never stored or deleted on their own.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by ID, with its phones
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Employee>>;

    /// List all employees
    async fn list_all(&self) -> AppResult<Vec<Employee>>;

    /// Persist a new employee and return its assigned ID
    async fn add(&self, employee: &Employee) -> AppResult<i64>;

    /// Replace a stored employee and its phone set
    async fn update(&self, employee: &Employee) -> AppResult<()>;

    /// Delete an employee and its phones
    async fn delete(&self, id: i64) -> AppResult<()>;
}
