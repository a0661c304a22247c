use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::model::employee::NewEmployee;

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL,
        position    TEXT NOT NULL,
        salary      REAL NOT NULL,
        join_date   TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        deleted_at  TEXT
    )
"#;

const CREATE_DELETED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_employees_deleted_at ON employees (deleted_at)";

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the pool and makes sure the `employees` table exists.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // each connection to an in-memory database gets its own empty database,
    // so the pool must hold exactly one connection for its whole life
    let pool_options = if is_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    migrate(&pool).await?;

    info!(database_url, "Database connected and migrated");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EMPLOYEES).execute(pool).await?;
    sqlx::query(CREATE_DELETED_AT_INDEX).execute(pool).await?;
    Ok(())
}

fn demo_employees() -> Vec<NewEmployee> {
    [
        ("Alice Smith", "alice@example.com", "Developer", 70000.0),
        ("Bob Johnson", "bob@example.com", "Designer", 65000.0),
        ("Charlie Lee", "charlie@example.com", "Manager", 90000.0),
        ("Diana King", "diana@example.com", "QA Engineer", 60000.0),
        ("Ethan Brown", "ethan@example.com", "DevOps", 75000.0),
    ]
    .into_iter()
    .map(|(name, email, position, salary)| NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        position: position.to_string(),
        salary,
        join_date: None,
    })
    .collect()
}

/// Inserts the five demo employees in one transaction, only into an empty table.
/// Returns how many rows were written.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        info!(existing, "Skipping demo seed, employees table is not empty");
        return Ok(0);
    }

    let now = chrono::Utc::now();
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for employee in demo_employees() {
        inserted += sqlx::query(
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
        .bind(employee.join_date.unwrap_or(now))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    info!(inserted, "Seeded demo employees");
    Ok(inserted)
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:", 1).await.unwrap()
}
