//! One `Dao` implementation per table
//!
//! Each repository follows these patterns:
//! - Parameterized queries only
//! - Audit columns are stamped by the database (`current_timestamp()`, author "script")
//! - `create` reads the row back by `LAST_INSERT_ID()`; `update` reads it back by id
//! - Failures are logged here and surface as `SchedulerError::Storage`

pub mod appointments;
pub mod contacts;
pub mod countries;
pub mod customers;
pub mod divisions;
pub mod users;

pub use appointments::AppointmentRepo;
pub use contacts::ContactRepo;
pub use countries::CountryRepo;
pub use customers::CustomerRepo;
pub use divisions::DivisionRepo;
pub use users::UserRepo;

use std::sync::Arc;

use chrono::NaiveDateTime;
use scheduler_core::model::Audit;
use scheduler_core::store::Daos;
use scheduler_core::SchedulerError;
use sqlx::MySqlPool;

/// Every repository over one shared pool
pub fn daos(pool: &MySqlPool) -> Daos {
    Daos {
        appointments: Arc::new(AppointmentRepo::new(pool.clone())),
        contacts: Arc::new(ContactRepo::new(pool.clone())),
        countries: Arc::new(CountryRepo::new(pool.clone())),
        customers: Arc::new(CustomerRepo::new(pool.clone())),
        divisions: Arc::new(DivisionRepo::new(pool.clone())),
        users: Arc::new(UserRepo::new(pool.clone())),
    }
}

/// Log a failed query and wrap it for the caller.
pub(crate) fn failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> SchedulerError {
    move |e| {
        tracing::error!(operation, error = %e, "query failed");
        SchedulerError::storage(operation, e)
    }
}

/// The four audit columns as read from a row; any of them may be NULL in
/// legacy data.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AuditColumns {
    #[sqlx(rename = "Create_Date")]
    pub create_date: Option<NaiveDateTime>,
    #[sqlx(rename = "Created_By")]
    pub created_by: Option<String>,
    #[sqlx(rename = "Last_Update")]
    pub last_update: Option<NaiveDateTime>,
    #[sqlx(rename = "Last_Updated_By")]
    pub last_updated_by: Option<String>,
}

impl From<AuditColumns> for Audit {
    fn from(cols: AuditColumns) -> Self {
        Audit {
            created_at: cols.create_date.unwrap_or_default().and_utc(),
            created_by: cols.created_by.unwrap_or_default(),
            updated_at: cols.last_update.unwrap_or_default().and_utc(),
            updated_by: cols.last_updated_by.unwrap_or_default(),
        }
    }
}

/// Id assigned by the last INSERT, as the tables' INT key
pub(crate) fn inserted_id(last_insert_id: u64, operation: &'static str) -> Result<i32, SchedulerError> {
    i32::try_from(last_insert_id).map_err(|e| failed_conversion(operation, e))
}

fn failed_conversion(operation: &'static str, e: std::num::TryFromIntError) -> SchedulerError {
    tracing::error!(operation, error = %e, "insert id out of range");
    SchedulerError::storage(operation, e)
}
