//! `users` table

use async_trait::async_trait;
use scheduler_core::model::{NewUser, User};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id, AuditColumns};

#[derive(Debug, FromRow)]
struct UserRow {
    #[sqlx(rename = "User_ID")]
    id: i32,
    #[sqlx(rename = "User_Name")]
    username: Option<String>,
    #[sqlx(rename = "Password")]
    password: Option<String>,
    #[sqlx(flatten)]
    audit: AuditColumns,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username.unwrap_or_default(),
            password: row.password.unwrap_or_default(),
            audit: row.audit.into(),
        }
    }
}

pub struct UserRepo {
    pool: MySqlPool,
}

impl UserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for UserRepo {
    type Record = User;
    type Draft = NewUser;

    async fn read(&self, id: i32) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE User_ID = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed("read user"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE User_Name = ? LIMIT 1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed("read user by name"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY User_ID")
            .fetch_all(&self.pool)
            .await
            .map_err(failed("read users"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewUser) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (User_Name, Password, Create_Date, Created_By, Last_Update, Last_Updated_By)
            VALUES (?, ?, current_timestamp(), 'script', current_timestamp(), 'script')
            "#,
        )
        .bind(&draft.username)
        .bind(&draft.password)
        .execute(&self.pool)
        .await
        .map_err(failed("create user"))?;

        let id = inserted_id(result.last_insert_id(), "create user")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("user", id))
    }

    async fn update(&self, id: i32, draft: &NewUser) -> Result<Option<User>> {
        sqlx::query(
            r#"
            UPDATE users
            SET User_Name = ?, Password = ?,
                Last_Update = current_timestamp(), Last_Updated_By = 'script'
            WHERE User_ID = ?
            "#,
        )
        .bind(&draft.username)
        .bind(&draft.password)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed("update user"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE User_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
