//! Schema bootstrap for the six scheduling tables

use scheduler_core::Result;
use sqlx::MySqlPool;

use crate::repos::failed;

const TABLES: &[(&str, &str)] = &[
    (
        "countries",
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            Country_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            Country VARCHAR(50),
            Create_Date DATETIME,
            Created_By VARCHAR(50),
            Last_Update TIMESTAMP,
            Last_Updated_By VARCHAR(50)
        )
        "#,
    ),
    (
        "first_level_divisions",
        r#"
        CREATE TABLE IF NOT EXISTS first_level_divisions (
            Division_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            Division VARCHAR(50),
            Create_Date DATETIME,
            Created_By VARCHAR(50),
            Last_Update TIMESTAMP,
            Last_Updated_By VARCHAR(50),
            Country_ID INT NOT NULL,
            CONSTRAINT fk_division_country FOREIGN KEY (Country_ID)
                REFERENCES countries (Country_ID)
        )
        "#,
    ),
    (
        "customers",
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            Customer_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            Customer_Name VARCHAR(50),
            Address VARCHAR(100),
            Postal_Code VARCHAR(50),
            Phone VARCHAR(50),
            Create_Date DATETIME,
            Created_By VARCHAR(50),
            Last_Update TIMESTAMP,
            Last_Updated_By VARCHAR(50),
            Division_ID INT NOT NULL,
            CONSTRAINT fk_customer_division FOREIGN KEY (Division_ID)
                REFERENCES first_level_divisions (Division_ID)
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            User_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            User_Name VARCHAR(50) UNIQUE,
            Password TEXT,
            Create_Date DATETIME,
            Created_By VARCHAR(50),
            Last_Update TIMESTAMP,
            Last_Updated_By VARCHAR(50)
        )
        "#,
    ),
    (
        "contacts",
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            Contact_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            Contact_Name VARCHAR(50),
            Email VARCHAR(50)
        )
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            Appointment_ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            Title VARCHAR(50),
            Description VARCHAR(50),
            Location VARCHAR(50),
            Type VARCHAR(50),
            Start DATETIME NOT NULL,
            End DATETIME NOT NULL,
            Create_Date DATETIME,
            Created_By VARCHAR(50),
            Last_Update TIMESTAMP,
            Last_Updated_By VARCHAR(50),
            Customer_ID INT NOT NULL,
            User_ID INT NOT NULL,
            Contact_ID INT NOT NULL,
            CONSTRAINT fk_appointment_customer FOREIGN KEY (Customer_ID)
                REFERENCES customers (Customer_ID),
            CONSTRAINT fk_appointment_user FOREIGN KEY (User_ID)
                REFERENCES users (User_ID),
            CONSTRAINT fk_appointment_contact FOREIGN KEY (Contact_ID)
                REFERENCES contacts (Contact_ID)
        )
        "#,
    ),
];

/// Create any missing tables, parents before children
pub async fn run(pool: &MySqlPool) -> Result<()> {
    tracing::info!("Running schema bootstrap...");

    for (table, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(failed("create table"))?;
        tracing::debug!(table, "table ready");
    }

    Ok(())
}

/// Reference rows for an empty database: countries, a few divisions, the
/// three contacts and a `test` login.
pub async fn seed(pool: &MySqlPool) -> Result<bool> {
    let (countries,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM countries")
        .fetch_one(pool)
        .await
        .map_err(failed("count countries"))?;
    if countries > 0 {
        tracing::info!("reference data already present, skipping seed");
        return Ok(false);
    }

    let statements = [
        r#"INSERT INTO countries (Country_ID, Country, Create_Date, Created_By, Last_Update, Last_Updated_By)
           VALUES (1, 'U.S', NOW(), 'script', NOW(), 'script'),
                  (2, 'UK', NOW(), 'script', NOW(), 'script'),
                  (3, 'Canada', NOW(), 'script', NOW(), 'script')"#,
        r#"INSERT INTO first_level_divisions (Division_ID, Division, Create_Date, Created_By, Last_Update, Last_Updated_By, Country_ID)
           VALUES (29, 'New York', NOW(), 'script', NOW(), 'script', 1),
                  (36, 'Ohio', NOW(), 'script', NOW(), 'script', 1),
                  (54, 'Texas', NOW(), 'script', NOW(), 'script', 1),
                  (68, 'Ontario', NOW(), 'script', NOW(), 'script', 3),
                  (72, 'Québec', NOW(), 'script', NOW(), 'script', 3),
                  (101, 'England', NOW(), 'script', NOW(), 'script', 2),
                  (103, 'Scotland', NOW(), 'script', NOW(), 'script', 2)"#,
        r#"INSERT INTO contacts (Contact_ID, Contact_Name, Email)
           VALUES (1, 'Anika Costa', 'acoste@company.com'),
                  (2, 'Daniel Garcia', 'dgarcia@company.com'),
                  (3, 'Li Lee', 'llee@company.com')"#,
        r#"INSERT INTO users (User_Name, Password, Create_Date, Created_By, Last_Update, Last_Updated_By)
           VALUES ('test', 'test', NOW(), 'script', NOW(), 'script')"#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(failed("seed reference data"))?;
    }

    tracing::info!("reference data seeded");
    Ok(true)
}
