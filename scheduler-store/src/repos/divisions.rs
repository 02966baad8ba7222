//! `first_level_divisions` table

use async_trait::async_trait;
use scheduler_core::model::{Division, NewDivision};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id, AuditColumns};

#[derive(Debug, FromRow)]
struct DivisionRow {
    #[sqlx(rename = "Division_ID")]
    id: i32,
    #[sqlx(rename = "Division")]
    name: Option<String>,
    #[sqlx(flatten)]
    audit: AuditColumns,
    #[sqlx(rename = "Country_ID")]
    country_id: i32,
}

impl From<DivisionRow> for Division {
    fn from(row: DivisionRow) -> Self {
        Division {
            id: row.id,
            name: row.name.unwrap_or_default(),
            country_id: row.country_id,
            audit: row.audit.into(),
        }
    }
}

pub struct DivisionRepo {
    pool: MySqlPool,
}

impl DivisionRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for DivisionRepo {
    type Record = Division;
    type Draft = NewDivision;

    async fn read(&self, id: i32) -> Result<Option<Division>> {
        let row: Option<DivisionRow> =
            sqlx::query_as("SELECT * FROM first_level_divisions WHERE Division_ID = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read division"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, name: &str) -> Result<Option<Division>> {
        let row: Option<DivisionRow> =
            sqlx::query_as("SELECT * FROM first_level_divisions WHERE Division = ? LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read division by name"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<Division>> {
        let rows: Vec<DivisionRow> =
            sqlx::query_as("SELECT * FROM first_level_divisions ORDER BY Division_ID")
                .fetch_all(&self.pool)
                .await
                .map_err(failed("read divisions"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewDivision) -> Result<Division> {
        let result = sqlx::query(
            r#"
            INSERT INTO first_level_divisions (Division, Create_Date, Created_By,
                Last_Update, Last_Updated_By, Country_ID)
            VALUES (?, current_timestamp(), 'script', current_timestamp(), 'script', ?)
            "#,
        )
        .bind(&draft.name)
        .bind(draft.country_id)
        .execute(&self.pool)
        .await
        .map_err(failed("create division"))?;

        let id = inserted_id(result.last_insert_id(), "create division")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("division", id))
    }

    async fn update(&self, id: i32, draft: &NewDivision) -> Result<Option<Division>> {
        sqlx::query(
            r#"
            UPDATE first_level_divisions
            SET Division = ?, Country_ID = ?,
                Last_Update = current_timestamp(), Last_Updated_By = 'script'
            WHERE Division_ID = ?
            "#,
        )
        .bind(&draft.name)
        .bind(draft.country_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed("update division"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM first_level_divisions WHERE Division_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete division"))?;
        Ok(result.rows_affected() > 0)
    }
}
