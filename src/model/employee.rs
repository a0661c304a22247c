use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice Smith",
        "email": "alice@example.com",
        "position": "Developer",
        "salary": 70000.0,
        "join_date": "2024-01-01T00:00:00Z",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "deleted_at": null
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Alice Smith")]
    pub name: String,

    #[schema(example = "alice@example.com", format = "email")]
    pub email: String,

    #[schema(example = "Developer")]
    pub position: String,

    #[schema(example = 70000.0)]
    pub salary: f64,

    #[schema(value_type = String, format = "date-time")]
    pub join_date: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,

    /// Set only on soft-deleted rows, which reads never return.
    #[schema(nullable = true)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The writable fields of an employee, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: f64,
    pub join_date: Option<DateTime<Utc>>,
}
