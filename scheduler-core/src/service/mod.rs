//! Cached services over the scheduling tables
//!
//! Reference data (contacts, countries, divisions, users) is read-only once
//! loaded and shared by `Arc`; customers and appointments are owned by the
//! bundle and mutated through it.

mod appointments;
mod contacts;
mod countries;
mod customers;
mod divisions;
mod users;

pub use appointments::{AppointmentService, TimeSpan};
pub use contacts::ContactService;
pub use countries::CountryService;
pub use customers::CustomerService;
pub use divisions::DivisionService;
pub use users::UserService;

use std::sync::Arc;

use chrono_tz::Tz;

use crate::error::{Result, SchedulerError};
use crate::model::Customer;
use crate::store::Daos;

/// Every service the front end works with, loaded once per process
pub struct Services {
    pub contacts: Arc<ContactService>,
    pub countries: Arc<CountryService>,
    pub divisions: Arc<DivisionService>,
    pub users: Arc<UserService>,
    pub customers: CustomerService,
    pub appointments: AppointmentService,
}

impl Services {
    /// Read every table and build the caches. `zone` is the display zone.
    pub async fn load(daos: Daos, zone: Tz) -> Result<Self> {
        let contacts = Arc::new(ContactService::load(&daos.contacts).await?);
        let countries = Arc::new(CountryService::load(&daos.countries).await?);
        let divisions = Arc::new(DivisionService::load(&daos.divisions).await?);
        let users = Arc::new(UserService::load(&daos.users).await?);

        let customers =
            CustomerService::load(daos.customers, divisions.clone(), countries.clone()).await?;
        let appointments =
            AppointmentService::load(daos.appointments, contacts.clone(), zone).await?;

        tracing::info!(
            customers = customers.all().len(),
            appointments = appointments.all().len(),
            zone = %zone,
            "services loaded"
        );

        Ok(Self {
            contacts,
            countries,
            divisions,
            users,
            customers,
            appointments,
        })
    }

    /// Delete a customer together with its appointments.
    ///
    /// The customer row is only removed once every appointment is gone;
    /// otherwise `DeletionFailed` reports how many remain.
    pub async fn delete_customer(&mut self, customer_id: i32) -> Result<Option<Customer>> {
        let (deleted, not_deleted) = self.appointments.delete_for_customer(customer_id).await?;
        if !not_deleted.is_empty() {
            tracing::warn!(
                customer_id,
                deleted = deleted.len(),
                remaining = not_deleted.len(),
                "customer appointments not fully deleted"
            );
            return Err(SchedulerError::DeletionFailed {
                remaining: not_deleted.len(),
            });
        }
        self.customers.delete(customer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppointmentRecord, Audit, Contact, Country, Division, User};
    use crate::store::memory::{MemorySeed, MemoryStore};
    use chrono::{Duration, TimeZone, Utc};

    fn seed() -> MemorySeed {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap();
        let audit = Audit::stamped(now);
        let appointment = |id: i32| AppointmentRecord {
            id,
            title: format!("Visit {}", id),
            description: "Site visit".into(),
            location: "Lobby".into(),
            kind: "De-Briefing".into(),
            start: now + Duration::days(id as i64),
            end: now + Duration::days(id as i64) + Duration::hours(1),
            customer_id: 1,
            user_id: 1,
            contact_id: 1,
            audit: audit.clone(),
        };
        MemorySeed {
            appointments: vec![appointment(1), appointment(2)],
            contacts: vec![Contact { id: 1, name: "Li Lee".into(), email: "llee@company.com".into() }],
            countries: vec![Country { id: 1, name: "U.S".into(), audit: audit.clone() }],
            divisions: vec![Division { id: 29, name: "Ohio".into(), country_id: 1, audit: audit.clone() }],
            customers: vec![Customer {
                id: 1,
                name: "Dudley Do-Right".into(),
                address: "48 Horse Manor".into(),
                postal_code: "28198".into(),
                phone: "874-916-2671".into(),
                division_id: 29,
                audit: audit.clone(),
                extended_address: None,
            }],
            users: vec![User { id: 1, username: "test".into(), password: "test".into(), audit }],
        }
    }

    #[tokio::test]
    async fn load_builds_every_cache() {
        let store = MemoryStore::seeded(seed());
        let services = Services::load(store.daos(), chrono_tz::America::New_York).await.unwrap();

        assert_eq!(services.users.usernames(), vec!["test"]);
        assert_eq!(services.appointments.all().len(), 2);
        assert_eq!(services.appointments.all()[0].contact_name, "Li Lee");
        assert!(services.customers.by_id(1).unwrap().extended_address.is_some());
    }

    #[tokio::test]
    async fn delete_customer_removes_appointments_first() {
        let store = MemoryStore::seeded(seed());
        let mut services = Services::load(store.daos(), chrono_tz::UTC).await.unwrap();

        let removed = services.delete_customer(1).await.unwrap();

        assert!(removed.is_some());
        assert!(services.appointments.all().is_empty());
        assert!(store.customers.is_empty().await);
    }

    #[tokio::test]
    async fn delete_customer_keeps_row_when_an_appointment_sticks() {
        let store = MemoryStore::seeded(seed());
        store.appointments.reject_delete(2).await;
        let mut services = Services::load(store.daos(), chrono_tz::UTC).await.unwrap();

        let err = services.delete_customer(1).await.unwrap_err();

        assert!(matches!(err, SchedulerError::DeletionFailed { remaining: 1 }));
        assert_eq!(store.customers.len().await, 1);
        assert_eq!(services.appointments.all().len(), 1);
    }
}
