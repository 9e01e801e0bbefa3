//! Role service - read access to the role catalogue.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::AppResult;
use domain::EmployeeRole;

use crate::repository::RoleRepository;

/// Role service trait for dependency injection.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// List every role
    async fn list_roles(&self) -> AppResult<Vec<EmployeeRole>>;
}

/// Concrete implementation of RoleService using repository.
pub struct RoleCatalog {
    repo: Arc<dyn RoleRepository>,
}

impl RoleCatalog {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RoleService for RoleCatalog {
    async fn list_roles(&self) -> AppResult<Vec<EmployeeRole>> {
        let roles = self.repo.list_all().await?;
        info!(count = roles.len(), "Retrieved employee roles");
        Ok(roles)
    }
}
