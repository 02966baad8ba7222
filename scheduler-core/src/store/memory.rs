//! In-process table implementing `Dao`
//!
//! Backs the service tests and lets the services run without a database.
//! Ids are assigned sequentially from one past the highest seeded id.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Dao, Daos};
use crate::error::Result;
use crate::model::{
    AppointmentRecord, Audit, Contact, Country, Customer, Division, Keyed, NewAppointment,
    NewContact, NewCountry, NewCustomer, NewDivision, NewUser, User,
};

/// Row type that can be built from its draft
pub trait MemoryRow: Keyed + Clone + Send + Sync + 'static {
    type Draft: Send + Sync + 'static;

    /// Build row `id` from `draft`. `previous` is the row being overwritten, if any.
    fn materialize(id: i32, draft: &Self::Draft, now: DateTime<Utc>, previous: Option<&Self>)
        -> Self;
}

fn audit_for(now: DateTime<Utc>, previous: Option<&Audit>) -> Audit {
    match previous {
        Some(audit) => audit.touched(now),
        None => Audit::stamped(now),
    }
}

struct Inner<R> {
    rows: Vec<R>,
    next_id: i32,
    rejected_deletes: HashSet<i32>,
}

pub struct MemoryTable<R: MemoryRow> {
    inner: RwLock<Inner<R>>,
}

impl<R: MemoryRow> MemoryTable<R> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<R>) -> Self {
        let next_id = rows.iter().map(Keyed::id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner {
                rows,
                next_id,
                rejected_deletes: HashSet::new(),
            }),
        }
    }

    /// Make `delete(id)` report failure, as a database refusing the row would.
    pub async fn reject_delete(&self, id: i32) {
        self.inner.write().await.rejected_deletes.insert(id);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R: MemoryRow> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: MemoryRow> Dao for MemoryTable<R> {
    type Record = R;
    type Draft = R::Draft;

    async fn read(&self, id: i32) -> Result<Option<R>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|r| r.id() == id).cloned())
    }

    async fn read_by_name(&self, name: &str) -> Result<Option<R>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|r| r.name() == name).cloned())
    }

    async fn read_all(&self) -> Result<Vec<R>> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn create(&self, draft: &R::Draft) -> Result<R> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let row = R::materialize(id, draft, Utc::now(), None);
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, draft: &R::Draft) -> Result<Option<R>> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        let row = R::materialize(id, draft, Utc::now(), Some(&*slot));
        *slot = row.clone();
        Ok(Some(row))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.rejected_deletes.contains(&id) {
            return Ok(false);
        }
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id() != id);
        Ok(inner.rows.len() < before)
    }
}

impl MemoryRow for AppointmentRecord {
    type Draft = NewAppointment;

    fn materialize(id: i32, d: &NewAppointment, now: DateTime<Utc>, previous: Option<&Self>) -> Self {
        Self {
            id,
            title: d.title.clone(),
            description: d.description.clone(),
            location: d.location.clone(),
            kind: d.kind.clone(),
            start: d.start,
            end: d.end,
            customer_id: d.customer_id,
            user_id: d.user_id,
            contact_id: d.contact_id,
            audit: audit_for(now, previous.map(|p| &p.audit)),
        }
    }
}

impl MemoryRow for Contact {
    type Draft = NewContact;

    fn materialize(id: i32, d: &NewContact, _now: DateTime<Utc>, _previous: Option<&Self>) -> Self {
        Self {
            id,
            name: d.name.clone(),
            email: d.email.clone(),
        }
    }
}

impl MemoryRow for Country {
    type Draft = NewCountry;

    fn materialize(id: i32, d: &NewCountry, now: DateTime<Utc>, previous: Option<&Self>) -> Self {
        Self {
            id,
            name: d.name.clone(),
            audit: audit_for(now, previous.map(|p| &p.audit)),
        }
    }
}

impl MemoryRow for Customer {
    type Draft = NewCustomer;

    fn materialize(id: i32, d: &NewCustomer, now: DateTime<Utc>, previous: Option<&Self>) -> Self {
        Self {
            id,
            name: d.name.clone(),
            address: d.address.clone(),
            postal_code: d.postal_code.clone(),
            phone: d.phone.clone(),
            division_id: d.division_id,
            audit: audit_for(now, previous.map(|p| &p.audit)),
            extended_address: None,
        }
    }
}

impl MemoryRow for Division {
    type Draft = NewDivision;

    fn materialize(id: i32, d: &NewDivision, now: DateTime<Utc>, previous: Option<&Self>) -> Self {
        Self {
            id,
            name: d.name.clone(),
            country_id: d.country_id,
            audit: audit_for(now, previous.map(|p| &p.audit)),
        }
    }
}

impl MemoryRow for User {
    type Draft = NewUser;

    fn materialize(id: i32, d: &NewUser, now: DateTime<Utc>, previous: Option<&Self>) -> Self {
        Self {
            id,
            username: d.username.clone(),
            password: d.password.clone(),
            audit: audit_for(now, previous.map(|p| &p.audit)),
        }
    }
}

/// Seed rows for every table
#[derive(Debug, Clone, Default)]
pub struct MemorySeed {
    pub appointments: Vec<AppointmentRecord>,
    pub contacts: Vec<Contact>,
    pub countries: Vec<Country>,
    pub customers: Vec<Customer>,
    pub divisions: Vec<Division>,
    pub users: Vec<User>,
}

/// Typed handles to the in-memory tables alongside the `Daos` view of them
pub struct MemoryStore {
    pub appointments: Arc<MemoryTable<AppointmentRecord>>,
    pub contacts: Arc<MemoryTable<Contact>>,
    pub countries: Arc<MemoryTable<Country>>,
    pub customers: Arc<MemoryTable<Customer>>,
    pub divisions: Arc<MemoryTable<Division>>,
    pub users: Arc<MemoryTable<User>>,
}

impl MemoryStore {
    pub fn seeded(seed: MemorySeed) -> Self {
        Self {
            appointments: Arc::new(MemoryTable::with_rows(seed.appointments)),
            contacts: Arc::new(MemoryTable::with_rows(seed.contacts)),
            countries: Arc::new(MemoryTable::with_rows(seed.countries)),
            customers: Arc::new(MemoryTable::with_rows(seed.customers)),
            divisions: Arc::new(MemoryTable::with_rows(seed.divisions)),
            users: Arc::new(MemoryTable::with_rows(seed.users)),
        }
    }

    pub fn daos(&self) -> Daos {
        Daos {
            appointments: self.appointments.clone(),
            contacts: self.contacts.clone(),
            countries: self.countries.clone(),
            customers: self.customers.clone(),
            divisions: self.divisions.clone(),
            users: self.users.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn create_then_read_back_by_name() {
        let table = MemoryTable::<Contact>::new();

        let created = table.create(&draft("Anika")).await.unwrap();
        let read = table.read_by_name("Anika").await.unwrap().unwrap();

        assert_eq!(created, read);
        assert_eq!(read.id, 1);
    }

    #[tokio::test]
    async fn ids_continue_after_seeded_rows() {
        let seeded = Contact {
            id: 7,
            name: "Seeded".into(),
            email: "s@example.com".into(),
        };
        let table = MemoryTable::with_rows(vec![seeded]);

        let created = table.create(&draft("Next")).await.unwrap();
        assert_eq!(created.id, 8);
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let table = MemoryTable::<Contact>::new();
        assert!(table.update(99, &draft("Ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let table = MemoryTable::<Contact>::new();
        let created = table.create(&draft("Temp")).await.unwrap();

        assert!(!table.delete(created.id + 1).await.unwrap());
        assert!(table.delete(created.id).await.unwrap());
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn rejected_delete_keeps_the_row() {
        let table = MemoryTable::<Contact>::new();
        let created = table.create(&draft("Sticky")).await.unwrap();
        table.reject_delete(created.id).await;

        assert!(!table.delete(created.id).await.unwrap());
        assert_eq!(table.len().await, 1);
    }
}
