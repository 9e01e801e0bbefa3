//! Employee service - Handles employee-related business logic.
//!
//! Writes require an acting employee and pass the role hierarchy before any
//! entity is built. Plaintext passwords are digested here, so the entity and
//! the repository only ever see the stored hash.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{Actor, Employee, EmployeeData, EmployeePhone, Password};

use super::role_hierarchy::RoleHierarchy;
use crate::repository::{EmployeeRepository, RoleRepository};

/// Field values for creating or replacing an employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(flatten)]
    pub data: EmployeeData,
    /// Phone numbers as typed; normalized by the entity
    #[serde(default)]
    pub phones: Vec<String>,
}

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Create an employee on behalf of `actor` and return its ID
    async fn add(&self, input: EmployeeInput, actor: Option<&Actor>) -> AppResult<i64>;

    /// Replace every field of employee `id` on behalf of `actor`.
    ///
    /// An empty password keeps the stored one.
    async fn update(
        &self,
        id: i64,
        input: EmployeeInput,
        actor: Option<&Actor>,
    ) -> AppResult<Employee>;

    /// Get employee by ID
    async fn get(&self, id: i64) -> AppResult<Employee>;

    /// List all employees
    async fn list(&self) -> AppResult<Vec<Employee>>;

    /// Delete employee by ID together with its phones
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of EmployeeService using repositories.
pub struct EmployeeManager {
    employees: Arc<dyn EmployeeRepository>,
    hierarchy: RoleHierarchy,
}

impl EmployeeManager {
    pub fn new(employees: Arc<dyn EmployeeRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self {
            employees,
            hierarchy: RoleHierarchy::new(roles),
        }
    }

    async fn find(&self, id: i64) -> AppResult<Employee> {
        self.employees
            .get_by_id(id)
            .await?
            .ok_or_not_found(format!("Employee with ID {} not found", id))
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn add(&self, input: EmployeeInput, actor: Option<&Actor>) -> AppResult<i64> {
        let actor = require_actor(actor)?;
        let EmployeeInput { mut data, phones } = input;

        info!(
            role_id = data.role_id,
            requested_by = actor.employee_id,
            "Adding new employee"
        );
        self.hierarchy.authorize(actor, data.role_id).await?;

        if !data.password.is_empty() {
            debug!("Hashing password for new employee");
            data.password = Password::hash(&data.password).into_string();
        }

        let mut employee = Employee::new(data)?;
        for number in &phones {
            employee.add_phone_number(number)?;
        }

        let id = self.employees.add(&employee).await?;
        info!(employee_id = id, "Employee added");

        Ok(id)
    }

    async fn update(
        &self,
        id: i64,
        input: EmployeeInput,
        actor: Option<&Actor>,
    ) -> AppResult<Employee> {
        let actor = require_actor(actor)?;
        ensure_id(id)?;

        info!(
            employee_id = id,
            requested_by = actor.employee_id,
            "Updating employee"
        );
        let mut employee = self.find(id).await?;

        self.hierarchy
            .authorize_change(actor, employee.role_id(), input.data.role_id)
            .await?;

        apply(&mut employee, input)?;
        self.employees.update(&employee).await?;
        info!(employee_id = id, "Employee updated");

        Ok(employee)
    }

    async fn get(&self, id: i64) -> AppResult<Employee> {
        ensure_id(id)?;
        debug!(employee_id = id, "Getting employee");
        self.find(id).await
    }

    async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = self.employees.list_all().await?;
        info!(count = employees.len(), "Retrieved employees");
        Ok(employees)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        ensure_id(id)?;

        self.find(id).await?;
        self.employees.delete(id).await?;
        info!(employee_id = id, "Employee deleted");

        Ok(())
    }
}

fn require_actor(actor: Option<&Actor>) -> AppResult<&Actor> {
    actor.ok_or_else(|| AppError::missing_argument("current_employee"))
}

fn ensure_id(id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation(
            "employee_id",
            "Employee ID must be greater than zero",
        ));
    }
    Ok(())
}

/// Write every field of `input` through the entity's update methods.
fn apply(employee: &mut Employee, input: EmployeeInput) -> AppResult<()> {
    let EmployeeInput { data, phones } = input;

    employee.update_first_name(data.first_name)?;
    employee.update_last_name(data.last_name)?;
    employee.update_doc_number(&data.doc_number)?;
    employee.update_email(&data.email)?;
    if !data.password.is_empty() {
        debug!(employee_id = employee.id(), "Hashing new password");
        employee.update_password(Password::hash(&data.password).into_string())?;
    }
    employee.update_birthday(data.birthday)?;
    employee.update_role(data.role_id)?;
    employee.assign_manager(data.manager_id)?;

    sync_phones(employee, &phones)
}

/// Make the phone set match `numbers`: drop the ones no longer listed, add
/// the new ones. Numbers already stored keep their phone IDs.
fn sync_phones(employee: &mut Employee, numbers: &[String]) -> AppResult<()> {
    let wanted: Vec<&str> = numbers.iter().map(|number| number.trim()).collect();

    let stale: Vec<EmployeePhone> = employee
        .phones()
        .iter()
        .filter(|phone| !wanted.contains(&phone.phone()))
        .cloned()
        .collect();
    for phone in &stale {
        employee.remove_phone(phone);
    }

    let kept: Vec<String> = employee
        .phones()
        .iter()
        .map(|phone| phone.phone().to_string())
        .collect();
    for number in wanted {
        if !kept.iter().any(|existing| existing == number) {
            employee.add_phone_number(number)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockEmployeeRepository, MockRoleRepository};
    use chrono::{Months, NaiveDate, Utc};
    use domain::EmployeeRole;

    const JUNIOR: i64 = 1;
    const SENIOR: i64 = 2;
    const DIRECTOR: i64 = 3;

    fn role_repo() -> MockRoleRepository {
        let mut repo = MockRoleRepository::new();
        repo.expect_list_all().returning(|| {
            Ok(vec![
                EmployeeRole::load(JUNIOR, "Junior", 1).unwrap(),
                EmployeeRole::load(SENIOR, "Senior", 3).unwrap(),
                EmployeeRole::load(DIRECTOR, "Director", 6).unwrap(),
            ])
        });
        repo
    }

    fn birthday() -> NaiveDate {
        Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(28 * 12))
            .unwrap()
    }

    fn input(role_id: i64, password: &str, phones: &[&str]) -> EmployeeInput {
        EmployeeInput {
            data: EmployeeData {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                doc_number: "123.456.789-01".to_string(),
                email: "John@Example.com".to_string(),
                password: password.to_string(),
                birthday: birthday(),
                role_id,
                manager_id: None,
                role: None,
                manager: None,
            },
            phones: phones.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn stored(id: i64, role_id: i64) -> Employee {
        let mut data = input(role_id, "", &[]).data;
        data.password = Password::hash("old-secret").into_string();

        let mut employee = Employee::load(id, data).unwrap();
        employee
            .add_phone(EmployeePhone::load(100, id, "(11) 98765-4321").unwrap())
            .unwrap();
        employee
            .add_phone(EmployeePhone::load(101, id, "(11) 3456-7890").unwrap())
            .unwrap();
        employee
    }

    fn manager(employees: MockEmployeeRepository) -> EmployeeManager {
        EmployeeManager::new(Arc::new(employees), Arc::new(role_repo()))
    }

    fn senior() -> Actor {
        Actor::new(50, SENIOR)
    }

    #[tokio::test]
    async fn test_add_requires_actor() {
        let service = EmployeeManager::new(
            Arc::new(MockEmployeeRepository::new()),
            Arc::new(MockRoleRepository::new()),
        );

        let result = service.add(input(JUNIOR, "secret", &[]), None).await;
        assert!(matches!(result, Err(AppError::MissingArgument(arg)) if arg == "current_employee"));
    }

    #[tokio::test]
    async fn test_add_hashes_password_and_persists() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_add()
            .withf(|employee| {
                employee.password() == Password::hash("secret").as_str()
                    && employee.email() == "john@example.com"
                    && employee.phones().len() == 1
            })
            .times(1)
            .returning(|_| Ok(42));

        let id = manager(employees)
            .add(input(JUNIOR, "secret", &["(11) 98765-4321"]), Some(&senior()))
            .await
            .unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_add_keeps_empty_password_empty() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_add()
            .withf(|employee| employee.password().is_empty())
            .returning(|_| Ok(1));

        let result = manager(employees)
            .add(input(SENIOR, "", &[]), Some(&senior()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_more_senior_role_forbidden() {
        let mut employees = MockEmployeeRepository::new();
        employees.expect_add().times(0);

        let result = manager(employees)
            .add(input(DIRECTOR, "secret", &[]), Some(&senior()))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_phone() {
        let mut employees = MockEmployeeRepository::new();
        employees.expect_add().times(0);

        let result = manager(employees)
            .add(
                input(JUNIOR, "secret", &["(11) 98765-4321", " (11) 98765-4321 "]),
                Some(&senior()),
            )
            .await;
        assert_eq!(result.unwrap_err().field(), Some("phones"));
    }

    #[tokio::test]
    async fn test_add_invalid_entity_not_persisted() {
        let mut employees = MockEmployeeRepository::new();
        employees.expect_add().times(0);

        let mut bad = input(JUNIOR, "secret", &[]);
        bad.data.doc_number = "111.111.111-11".to_string();

        let result = manager(employees).add(bad, Some(&senior())).await;
        assert_eq!(result.unwrap_err().field(), Some("doc_number"));
    }

    #[tokio::test]
    async fn test_update_validates_id_and_actor() {
        let service = manager(MockEmployeeRepository::new());

        let no_actor = service.update(5, input(JUNIOR, "", &[]), None).await;
        assert!(matches!(no_actor, Err(AppError::MissingArgument(_))));

        let bad_id = service
            .update(0, input(JUNIOR, "", &[]), Some(&senior()))
            .await;
        assert_eq!(bad_id.unwrap_err().field(), Some("employee_id"));
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut employees = MockEmployeeRepository::new();
        employees.expect_get_by_id().returning(|_| Ok(None));

        let result = manager(employees)
            .update(9, input(JUNIOR, "", &[]), Some(&senior()))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_password_and_syncs_phones() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_get_by_id()
            .withf(|id| *id == 5)
            .returning(|id| Ok(Some(stored(id, JUNIOR))));
        employees.expect_update().times(1).returning(|_| Ok(()));

        let mut changes = input(SENIOR, "", &["(11) 98765-4321", "(21) 99999-0000"]);
        changes.data.first_name = "Johnny".to_string();

        let updated = manager(employees)
            .update(5, changes, Some(&senior()))
            .await
            .unwrap();

        assert_eq!(updated.first_name(), "Johnny");
        assert_eq!(updated.role_id(), SENIOR);
        assert_eq!(updated.password(), Password::hash("old-secret").as_str());

        let numbers: Vec<(i64, &str)> = updated
            .phones()
            .iter()
            .map(|phone| (phone.id(), phone.phone()))
            .collect();
        assert_eq!(numbers, [(100, "(11) 98765-4321"), (0, "(21) 99999-0000")]);
    }

    #[tokio::test]
    async fn test_update_replaces_password_when_given() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored(id, JUNIOR))));
        employees
            .expect_update()
            .withf(|employee| employee.password() == Password::hash("new-secret").as_str())
            .times(1)
            .returning(|_| Ok(()));

        let result = manager(employees)
            .update(5, input(JUNIOR, "new-secret", &[]), Some(&senior()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_checks_stored_role() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored(id, DIRECTOR))));
        employees.expect_update().times(0);

        // Demoting a director is still managing a director
        let result = manager(employees)
            .update(5, input(JUNIOR, "", &[]), Some(&senior()))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_invalid_field_not_persisted() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored(id, JUNIOR))));
        employees.expect_update().times(0);

        let mut changes = input(JUNIOR, "", &[]);
        changes.data.email = "not-an-email".to_string();

        let result = manager(employees)
            .update(5, changes, Some(&senior()))
            .await;
        assert_eq!(result.unwrap_err().field(), Some("email"));
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_get_by_id()
            .withf(|id| *id == 5)
            .returning(|id| Ok(Some(stored(id, JUNIOR))));
        employees
            .expect_get_by_id()
            .withf(|id| *id == 6)
            .returning(|_| Ok(None));
        employees
            .expect_delete()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let service = manager(employees);

        assert_eq!(service.get(5).await.unwrap().id(), 5);
        assert!(matches!(service.get(6).await, Err(AppError::NotFound(_))));
        assert_eq!(service.get(-1).await.unwrap_err().field(), Some("employee_id"));

        assert!(service.delete(5).await.is_ok());
        assert!(matches!(service.delete(6).await, Err(AppError::NotFound(_))));
        assert!(service.delete(0).await.is_err());
    }

    #[tokio::test]
    async fn test_list() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_list_all()
            .returning(|| Ok(vec![stored(1, JUNIOR), stored(2, SENIOR)]));

        let all = manager(employees).list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_input_deserializes_flat() {
        let input: EmployeeInput = serde_json::from_str(
            r#"{
                "firstName": "Maria",
                "lastName": "Silva",
                "docNumber": "12.345.678/0001-90",
                "email": "maria@example.com",
                "password": "secret",
                "birthday": "1985-03-10",
                "roleId": 2,
                "phones": ["(11) 98765-4321"]
            }"#,
        )
        .unwrap();

        assert_eq!(input.data.role_id, 2);
        assert_eq!(input.data.manager_id, None);
        assert_eq!(input.phones, ["(11) 98765-4321"]);
    }
}
