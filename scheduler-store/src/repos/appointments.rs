//! `appointments` table

use async_trait::async_trait;
use chrono::NaiveDateTime;
use scheduler_core::model::{AppointmentRecord, NewAppointment};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id, AuditColumns};

#[derive(Debug, FromRow)]
struct AppointmentRow {
    #[sqlx(rename = "Appointment_ID")]
    id: i32,
    #[sqlx(rename = "Title")]
    title: Option<String>,
    #[sqlx(rename = "Description")]
    description: Option<String>,
    #[sqlx(rename = "Location")]
    location: Option<String>,
    #[sqlx(rename = "Type")]
    kind: Option<String>,
    #[sqlx(rename = "Start")]
    start: NaiveDateTime,
    #[sqlx(rename = "End")]
    end: NaiveDateTime,
    #[sqlx(flatten)]
    audit: AuditColumns,
    #[sqlx(rename = "Customer_ID")]
    customer_id: i32,
    #[sqlx(rename = "User_ID")]
    user_id: i32,
    #[sqlx(rename = "Contact_ID")]
    contact_id: i32,
}

impl From<AppointmentRow> for AppointmentRecord {
    fn from(row: AppointmentRow) -> Self {
        AppointmentRecord {
            id: row.id,
            title: row.title.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            kind: row.kind.unwrap_or_default(),
            start: row.start.and_utc(),
            end: row.end.and_utc(),
            customer_id: row.customer_id,
            user_id: row.user_id,
            contact_id: row.contact_id,
            audit: row.audit.into(),
        }
    }
}

/// Appointment repository. `Start`/`End` are stored as UTC wall time.
pub struct AppointmentRepo {
    pool: MySqlPool,
}

impl AppointmentRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for AppointmentRepo {
    type Record = AppointmentRecord;
    type Draft = NewAppointment;

    async fn read(&self, id: i32) -> Result<Option<AppointmentRecord>> {
        let row: Option<AppointmentRow> =
            sqlx::query_as("SELECT * FROM appointments WHERE Appointment_ID = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read appointment"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, title: &str) -> Result<Option<AppointmentRecord>> {
        let row: Option<AppointmentRow> =
            sqlx::query_as("SELECT * FROM appointments WHERE Title = ? LIMIT 1")
                .bind(title)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read appointment by title"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<AppointmentRecord>> {
        let rows: Vec<AppointmentRow> = sqlx::query_as("SELECT * FROM appointments ORDER BY Appointment_ID")
            .fetch_all(&self.pool)
            .await
            .map_err(failed("read appointments"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewAppointment) -> Result<AppointmentRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (Title, Description, Location, Type, Start, End,
                Create_Date, Created_By, Last_Update, Last_Updated_By,
                Customer_ID, User_ID, Contact_ID)
            VALUES (?, ?, ?, ?, ?, ?,
                current_timestamp(), 'script', current_timestamp(), 'script',
                ?, ?, ?)
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .bind(&draft.kind)
        .bind(draft.start.naive_utc())
        .bind(draft.end.naive_utc())
        .bind(draft.customer_id)
        .bind(draft.user_id)
        .bind(draft.contact_id)
        .execute(&self.pool)
        .await
        .map_err(failed("create appointment"))?;

        let id = inserted_id(result.last_insert_id(), "create appointment")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("appointment", id))
    }

    async fn update(&self, id: i32, draft: &NewAppointment) -> Result<Option<AppointmentRecord>> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET Title = ?, Description = ?, Location = ?, Type = ?, Start = ?, End = ?,
                Last_Update = current_timestamp(), Last_Updated_By = 'script',
                Customer_ID = ?, User_ID = ?, Contact_ID = ?
            WHERE Appointment_ID = ?
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .bind(&draft.kind)
        .bind(draft.start.naive_utc())
        .bind(draft.end.naive_utc())
        .bind(draft.customer_id)
        .bind(draft.user_id)
        .bind(draft.contact_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed("update appointment"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE Appointment_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete appointment"))?;
        Ok(result.rows_affected() > 0)
    }
}
