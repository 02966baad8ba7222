//! `customers` table

use async_trait::async_trait;
use scheduler_core::model::{Customer, NewCustomer};
use scheduler_core::store::Dao;
use scheduler_core::{Result, SchedulerError};
use sqlx::{FromRow, MySqlPool};

use super::{failed, inserted_id, AuditColumns};

#[derive(Debug, FromRow)]
struct CustomerRow {
    #[sqlx(rename = "Customer_ID")]
    id: i32,
    #[sqlx(rename = "Customer_Name")]
    name: Option<String>,
    #[sqlx(rename = "Address")]
    address: Option<String>,
    #[sqlx(rename = "Postal_Code")]
    postal_code: Option<String>,
    #[sqlx(rename = "Phone")]
    phone: Option<String>,
    #[sqlx(flatten)]
    audit: AuditColumns,
    #[sqlx(rename = "Division_ID")]
    division_id: i32,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            postal_code: row.postal_code.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            division_id: row.division_id,
            audit: row.audit.into(),
            extended_address: None,
        }
    }
}

pub struct CustomerRepo {
    pool: MySqlPool,
}

impl CustomerRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dao for CustomerRepo {
    type Record = Customer;
    type Draft = NewCustomer;

    async fn read(&self, id: i32) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as("SELECT * FROM customers WHERE Customer_ID = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed("read customer"))?;
        Ok(row.map(Into::into))
    }

    async fn read_by_name(&self, name: &str) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as("SELECT * FROM customers WHERE Customer_Name = ? LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(failed("read customer by name"))?;
        Ok(row.map(Into::into))
    }

    async fn read_all(&self) -> Result<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as("SELECT * FROM customers ORDER BY Customer_ID")
            .fetch_all(&self.pool)
            .await
            .map_err(failed("read customers"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: &NewCustomer) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (Customer_Name, Address, Postal_Code, Phone,
                Create_Date, Created_By, Last_Update, Last_Updated_By, Division_ID)
            VALUES (?, ?, ?, ?, current_timestamp(), 'script', current_timestamp(), 'script', ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.postal_code)
        .bind(&draft.phone)
        .bind(draft.division_id)
        .execute(&self.pool)
        .await
        .map_err(failed("create customer"))?;

        let id = inserted_id(result.last_insert_id(), "create customer")?;
        self.read(id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("customer", id))
    }

    async fn update(&self, id: i32, draft: &NewCustomer) -> Result<Option<Customer>> {
        sqlx::query(
            r#"
            UPDATE customers
            SET Customer_Name = ?, Address = ?, Postal_Code = ?, Phone = ?, Division_ID = ?,
                Last_Update = current_timestamp(), Last_Updated_By = 'script'
            WHERE Customer_ID = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.postal_code)
        .bind(&draft.phone)
        .bind(draft.division_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed("update customer"))?;

        self.read(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE Customer_ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete customer"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_text_columns_read_as_empty() {
        let row = CustomerRow {
            id: 3,
            name: Some("Harbor Supply".into()),
            address: None,
            postal_code: None,
            phone: None,
            audit: AuditColumns {
                create_date: None,
                created_by: Some("script".into()),
                last_update: None,
                last_updated_by: None,
            },
            division_id: 29,
        };

        let customer = Customer::from(row);
        assert_eq!(customer.name, "Harbor Supply");
        assert_eq!(customer.address, "");
        assert_eq!(customer.postal_code, "");
        assert_eq!(customer.phone, "");
        assert_eq!(customer.audit.created_by, "script");
        assert!(customer.extended_address.is_none());
    }
}
