//! Role repository seam.

use async_trait::async_trait;

use common::AppResult;
use domain::EmployeeRole;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the role catalogue.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Every role, unfiltered and unpaginated
    async fn list_all(&self) -> AppResult<Vec<EmployeeRole>>;
}
