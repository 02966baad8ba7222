//! `contacts` table (no audit columns)

use async_trait::async_trait;
use scheduler_core::model::{Contact, NewContact};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id};

#[derive(Debug, FromRow)]
struct ContactRow {
    #[sqlx(rename = "Contact_ID")]
    id: i32,
    #[sqlx(rename = "Contact_Name")]
    name: Option<String>,
    #[sqlx(rename = "Email")]
    email: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
        }
    }
}

pub struct ContactRepo {
    pool: MySqlPool,
}

impl ContactRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for ContactRepo {
    type Record = Contact;
    type Draft = NewContact;

    async fn read(&self, id: i32) -> Result<Option<Contact>> {
        let row: Option<ContactRow> = sqlx::query_as("SELECT * FROM contacts WHERE Contact_ID = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed("read contact"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let row: Option<ContactRow> =
            sqlx::query_as("SELECT * FROM contacts WHERE Contact_Name = ? LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read contact by name"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as("SELECT * FROM contacts ORDER BY Contact_ID")
            .fetch_all(&self.pool)
            .await
            .map_err(failed("read contacts"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewContact) -> Result<Contact> {
        let result = sqlx::query("INSERT INTO contacts (Contact_Name, Email) VALUES (?, ?)")
            .bind(&draft.name)
            .bind(&draft.email)
            .execute(&self.pool)
            .await
            .map_err(failed("create contact"))?;

        let id = inserted_id(result.last_insert_id(), "create contact")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("contact", id))
    }

    async fn update(&self, id: i32, draft: &NewContact) -> Result<Option<Contact>> {
        sqlx::query("UPDATE contacts SET Contact_Name = ?, Email = ? WHERE Contact_ID = ?")
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("update contact"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE Contact_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete contact"))?;
        Ok(result.rows_affected() > 0)
    }
}
