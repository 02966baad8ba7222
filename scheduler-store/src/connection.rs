//! MySQL connection pool for the `client_schedule` database
//!
//! Host and database name are fixed; port and credentials come from the
//! environment (a `.env` file is loaded by the binary before this runs).

use std::env;

use scheduler_core::{Result, SchedulerError};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

pub const DB_HOST: &str = "localhost";
pub const DB_NAME: &str = "client_schedule";

pub const PORT_VAR: &str = "MYSQL_SCHEDULER_DB_PORT";
pub const USERNAME_VAR: &str = "MYSQL_SCHEDULER_DB_USERNAME";
pub const PASSWORD_VAR: &str = "MYSQL_SCHEDULER_DB_PASSWORD";

/// One long-lived connection; the app is single-user and sequential.
const MAX_CONNECTIONS: u32 = 1;

#[derive(Clone)]
pub struct DbCredentials {
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCredentials")
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| SchedulerError::config(format!("{} is not set", key)))
        };

        let port_raw = require(PORT_VAR)?;
        let port = port_raw.trim().parse::<u16>().map_err(|_| {
            SchedulerError::config(format!("{} is not a port number: {}", PORT_VAR, port_raw))
        })?;

        Ok(Self {
            port,
            username: require(USERNAME_VAR)?,
            password: require(PASSWORD_VAR)?,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(DB_HOST)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(DB_NAME)
    }
}

/// Open the pool and verify one connection can be acquired.
pub async fn connect(credentials: &DbCredentials) -> Result<MySqlPool> {
    tracing::debug!(host = DB_HOST, port = credentials.port, database = DB_NAME, "connecting");

    MySqlPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(credentials.connect_options())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "database connection failed");
            SchedulerError::storage("connect", e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn reads_all_three_variables() {
        let creds = DbCredentials::from_lookup(lookup(&[
            (PORT_VAR, "3306"),
            (USERNAME_VAR, "sqlUser"),
            (PASSWORD_VAR, "Passw0rd!"),
        ]))
        .unwrap();

        assert_eq!(creds.port, 3306);
        assert_eq!(creds.username, "sqlUser");
        assert!(!format!("{:?}", creds).contains("Passw0rd!"));
    }

    #[test]
    fn missing_variable_is_named() {
        let err = DbCredentials::from_lookup(lookup(&[(PORT_VAR, "3306")])).unwrap_err();
        assert!(err.to_string().contains(USERNAME_VAR));
    }

    #[test]
    fn port_must_be_numeric() {
        let err = DbCredentials::from_lookup(lookup(&[
            (PORT_VAR, "db"),
            (USERNAME_VAR, "u"),
            (PASSWORD_VAR, "p"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SchedulerError::Config { .. }));
    }

    // Run with: MYSQL_SCHEDULER_DB_* set, cargo test -p scheduler-store -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let creds = DbCredentials::from_env().expect("MYSQL_SCHEDULER_DB_* required");
        let pool = connect(&creds).await.expect("pool creation failed");

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
