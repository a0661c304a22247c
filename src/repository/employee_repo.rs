use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DeleteMode;
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, NewEmployee};

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All non-deleted employees in id order. An empty table is not an error.
    async fn find_all(&self) -> AppResult<Vec<Employee>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Employee>;
    async fn create(&self, employee: NewEmployee) -> AppResult<Employee>;
    /// Overwrites name, email, position, salary and join date (when given).
    async fn update(&self, id: i64, employee: NewEmployee) -> AppResult<Employee>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

const SELECT_ACTIVE: &str = r#"
    SELECT id, name, email, position, salary, join_date, created_at, updated_at, deleted_at
    FROM employees
    WHERE deleted_at IS NULL
"#;

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
    delete_mode: DeleteMode,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool, delete_mode: DeleteMode) -> Self {
        Self { pool, delete_mode }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let sql = format!("{SELECT_ACTIVE} ORDER BY id");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Employee> {
        let sql = format!("{SELECT_ACTIVE} AND id = ?");
        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, employee: NewEmployee) -> AppResult<Employee> {
        let now = Utc::now();
        let join_date = employee.join_date.unwrap_or(now);

        let id = sqlx::query(
            r#"
            INSERT INTO employees
            (name, email, position, salary, join_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(join_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(employee_id = id, "Employee created");

        Ok(Employee {
            id,
            name: employee.name,
            email: employee.email,
            position: employee.position,
            salary: employee.salary,
            join_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn update(&self, id: i64, employee: NewEmployee) -> AppResult<Employee> {
        let mut existing = self.find_by_id(id).await?;

        existing.name = employee.name;
        existing.email = employee.email;
        existing.position = employee.position;
        existing.salary = employee.salary;
        if let Some(join_date) = employee.join_date {
            existing.join_date = join_date;
        }
        existing.updated_at = Utc::now();

        let affected = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, email = ?, position = ?, salary = ?, join_date = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&existing.name)
        .bind(&existing.email)
        .bind(&existing.position)
        .bind(existing.salary)
        .bind(existing.join_date)
        .bind(existing.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        // deleted between the read and the write
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        info!(employee_id = id, "Employee updated");
        Ok(existing)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find_by_id(id).await?;

        let result = match self.delete_mode {
            DeleteMode::Soft => {
                let now = Utc::now();
                sqlx::query(
                    "UPDATE employees SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
                )
                .bind(now)
                .bind(now)
                .bind(existing.id)
                .execute(&self.pool)
                .await?
            }
            DeleteMode::Hard => {
                sqlx::query("DELETE FROM employees WHERE id = ?")
                    .bind(existing.id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        info!(employee_id = id, mode = ?self.delete_mode, "Employee deleted");
        Ok(())
    }
}
