//! `countries` table

use async_trait::async_trait;
use scheduler_core::model::{Country, NewCountry};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id, AuditColumns};

#[derive(Debug, FromRow)]
struct CountryRow {
    #[sqlx(rename = "Country_ID")]
    id: i32,
    #[sqlx(rename = "Country")]
    name: Option<String>,
    #[sqlx(flatten)]
    audit: AuditColumns,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country {
            id: row.id,
            name: row.name.unwrap_or_default(),
            audit: row.audit.into(),
        }
    }
}

pub struct CountryRepo {
    pool: MySqlPool,
}

impl CountryRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for CountryRepo {
    type Record = Country;
    type Draft = NewCountry;

    async fn read(&self, id: i32) -> Result<Option<Country>> {
        let row: Option<CountryRow> = sqlx::query_as("SELECT * FROM countries WHERE Country_ID = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed("read country"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, name: &str) -> Result<Option<Country>> {
        let row: Option<CountryRow> =
            sqlx::query_as("SELECT * FROM countries WHERE Country = ? LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read country by name"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<Country>> {
        let rows: Vec<CountryRow> = sqlx::query_as("SELECT * FROM countries ORDER BY Country_ID")
            .fetch_all(&self.pool)
            .await
            .map_err(failed("read countries"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewCountry) -> Result<Country> {
        let result = sqlx::query(
            r#"
            INSERT INTO countries (Country, Create_Date, Created_By, Last_Update, Last_Updated_By)
            VALUES (?, current_timestamp(), 'script', current_timestamp(), 'script')
            "#,
        )
        .bind(&draft.name)
        .execute(&self.pool)
        .await
        .map_err(failed("create country"))?;

        let id = inserted_id(result.last_insert_id(), "create country")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("country", id))
    }

    async fn update(&self, id: i32, draft: &NewCountry) -> Result<Option<Country>> {
        sqlx::query(
            r#"
            UPDATE countries
            SET Country = ?, Last_Update = current_timestamp(), Last_Updated_By = 'script'
            WHERE Country_ID = ?
            "#,
        )
        .bind(&draft.name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed("update country"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE Country_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete country"))?;
        Ok(result.rows_affected() > 0)
    }
}
