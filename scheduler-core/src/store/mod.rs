//! Storage seam between the services and a database
//!
//! One `Dao` per table. Implementations log their own failures and return
//! `SchedulerError::Storage`; "no such row" is `Ok(None)` / `Ok(false)`.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    AppointmentRecord, Contact, Country, Customer, Division, NewAppointment, NewContact,
    NewCountry, NewCustomer, NewDivision, NewUser, User,
};

/// CRUD over one table, keyed by numeric id and by a unique name column.
#[async_trait]
pub trait Dao: Send + Sync {
    type Record: Send;
    type Draft: Sync;

    async fn read(&self, id: i32) -> Result<Option<Self::Record>>;

    async fn read_by_name(&self, name: &str) -> Result<Option<Self::Record>>;

    async fn read_all(&self) -> Result<Vec<Self::Record>>;

    /// Insert and return the stored row (with its id and audit stamp).
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Record>;

    /// Overwrite row `id`; `None` when no row matched.
    async fn update(&self, id: i32, draft: &Self::Draft) -> Result<Option<Self::Record>>;

    /// `true` when a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

pub type SharedDao<R, D> = Arc<dyn Dao<Record = R, Draft = D>>;

pub type AppointmentDao = SharedDao<AppointmentRecord, NewAppointment>;
pub type ContactDao = SharedDao<Contact, NewContact>;
pub type CountryDao = SharedDao<Country, NewCountry>;
pub type CustomerDao = SharedDao<Customer, NewCustomer>;
pub type DivisionDao = SharedDao<Division, NewDivision>;
pub type UserDao = SharedDao<User, NewUser>;

/// One DAO per table, handed to `Services::load`
#[derive(Clone)]
pub struct Daos {
    pub appointments: AppointmentDao,
    pub contacts: ContactDao,
    pub countries: CountryDao,
    pub customers: CustomerDao,
    pub divisions: DivisionDao,
    pub users: UserDao,
}
