//! Role hierarchy authorization.
//!
//! The role list is fetched from the repository on every check, so a decision
//! always reflects the roles as they are stored right now.

use std::sync::Arc;

use tracing::{debug, error, warn};

use common::{AppError, AppResult};
use domain::{hierarchy, Actor, DomainError};

use crate::repository::RoleRepository;

/// Gates employee writes on the acting employee's role level.
pub struct RoleHierarchy {
    roles: Arc<dyn RoleRepository>,
}

impl RoleHierarchy {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// Check that `actor` may manage an employee holding `target_role_id`.
    ///
    /// # Errors
    /// - `Forbidden` when the target role is more senior than the actor's
    /// - `Consistency` when either role id is not in the catalogue
    pub async fn authorize(&self, actor: &Actor, target_role_id: i64) -> AppResult<()> {
        debug!(
            actor_role_id = actor.role_id,
            target_role_id, "Validating role hierarchy"
        );

        let roles = self.roles.list_all().await?;

        hierarchy::check(&roles, actor.role_id, target_role_id).map_err(|err| {
            match &err {
                DomainError::Forbidden(_) => warn!(
                    employee_id = actor.employee_id,
                    actor_role_id = actor.role_id,
                    target_role_id,
                    "Role hierarchy violation"
                ),
                _ => error!(error = %err, "Role hierarchy could not be evaluated"),
            }
            AppError::from(err)
        })
    }

    /// Check both the role an employee holds today and the one requested.
    pub async fn authorize_change(
        &self,
        actor: &Actor,
        current_role_id: i64,
        requested_role_id: i64,
    ) -> AppResult<()> {
        self.authorize(actor, current_role_id).await?;
        self.authorize(actor, requested_role_id).await
    }
}
