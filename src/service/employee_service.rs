use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use crate::model::employee::{Employee, NewEmployee};
use crate::repository::employee_repo::EmployeeRepository;

/// What the HTTP handlers depend on, so they never see storage details.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn get_all_employees(&self) -> AppResult<Vec<Employee>>;
    async fn get_employee_by_id(&self, id: i64) -> AppResult<Employee>;
    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee>;
    async fn update_employee(&self, id: i64, employee: NewEmployee) -> AppResult<Employee>;
    async fn delete_employee(&self, id: i64) -> AppResult<()>;
}

pub struct EmployeeServiceImpl {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeServiceImpl {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn get_all_employees(&self) -> AppResult<Vec<Employee>> {
        self.repo.find_all().await
    }

    async fn get_employee_by_id(&self, id: i64) -> AppResult<Employee> {
        self.repo.find_by_id(id).await
    }

    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee> {
        self.repo.create(employee).await
    }

    async fn update_employee(&self, id: i64, employee: NewEmployee) -> AppResult<Employee> {
        self.repo.update(id, employee).await
    }

    async fn delete_employee(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
