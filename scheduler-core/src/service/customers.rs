//! Cached customers with their derived display address

use std::sync::Arc;

use super::{CountryService, DivisionService};
use crate::error::{Result, SchedulerError};
use crate::model::{Customer, NewCustomer};
use crate::store::CustomerDao;

pub struct CustomerService {
    dao: CustomerDao,
    divisions: Arc<DivisionService>,
    countries: Arc<CountryService>,
    customers: Vec<Customer>,
}

impl CustomerService {
    pub async fn load(
        dao: CustomerDao,
        divisions: Arc<DivisionService>,
        countries: Arc<CountryService>,
    ) -> Result<Self> {
        let rows = dao.read_all().await?;
        tracing::debug!(count = rows.len(), "loaded customers");

        let mut service = Self {
            dao,
            divisions,
            countries,
            customers: Vec::new(),
        };
        let customers: Vec<Customer> = rows
            .into_iter()
            .map(|row| match service.extended_address(&row) {
                Ok(extended) => row.with_extended_address(extended),
                Err(e) => {
                    tracing::warn!(customer_id = row.id, error = %e, "no display address");
                    row
                }
            })
            .collect();
        service.customers = customers;
        Ok(service)
    }

    /// Display address for a customer, via its division and that division's country
    fn extended_address(&self, customer: &Customer) -> Result<String> {
        let division = self
            .divisions
            .by_id(customer.division_id)
            .ok_or_else(|| SchedulerError::not_found("division", customer.division_id))?;
        let country = self
            .countries
            .by_id(division.country_id)
            .ok_or_else(|| SchedulerError::not_found("country", division.country_id))?;
        Ok(Customer::describe_address(&customer.address, division, country))
    }

    fn check_draft(&self, draft: &NewCustomer) -> Result<()> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(SchedulerError::required(missing));
        }
        let division = self
            .divisions
            .by_id(draft.division_id)
            .ok_or_else(|| SchedulerError::not_found("division", draft.division_id))?;
        if self.countries.by_id(division.country_id).is_none() {
            return Err(SchedulerError::not_found("country", division.country_id));
        }
        Ok(())
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn by_id(&self, id: i32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Customers whose division belongs to the named country
    pub fn by_country_name(&self, country_name: &str) -> Vec<&Customer> {
        let Some(country) = self.countries.by_name(country_name) else {
            return Vec::new();
        };
        self.customers
            .iter()
            .filter(|c| {
                self.divisions
                    .by_id(c.division_id)
                    .is_some_and(|d| d.country_id == country.id)
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.customers.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn id_by_name(&self, name: &str) -> Option<i32> {
        self.customers.iter().find(|c| c.name == name).map(|c| c.id)
    }

    pub fn name_by_id(&self, id: i32) -> Option<&str> {
        self.by_id(id).map(|c| c.name.as_str())
    }

    pub async fn create(&mut self, draft: &NewCustomer) -> Result<Customer> {
        self.check_draft(draft)?;
        let row = self.dao.create(draft).await?;
        let extended = self.extended_address(&row)?;
        let customer = row.with_extended_address(extended);
        tracing::info!(id = customer.id, name = %customer.name, "customer created");

        self.customers.push(customer.clone());
        Ok(customer)
    }

    /// `None` when no customer with `id` exists.
    pub async fn update(&mut self, id: i32, draft: &NewCustomer) -> Result<Option<Customer>> {
        self.check_draft(draft)?;
        let Some(row) = self.dao.update(id, draft).await? else {
            return Ok(None);
        };
        let extended = self.extended_address(&row)?;
        let customer = row.with_extended_address(extended);
        tracing::info!(id, "customer updated");

        match self.customers.iter_mut().find(|c| c.id == id) {
            Some(slot) => *slot = customer.clone(),
            None => self.customers.push(customer.clone()),
        }
        Ok(Some(customer))
    }

    /// Removes customer `id`; its appointments must already be gone.
    pub async fn delete(&mut self, id: i32) -> Result<Option<Customer>> {
        if !self.dao.delete(id).await? {
            tracing::debug!(id, "no customer deleted");
            return Ok(None);
        }
        tracing::info!(id, "customer deleted");

        let index = self.customers.iter().position(|c| c.id == id);
        Ok(index.map(|i| self.customers.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Audit, Country, Division};
    use crate::store::memory::{MemorySeed, MemoryStore};
    use chrono::Utc;

    fn seed() -> MemorySeed {
        let audit = Audit::stamped(Utc::now());
        MemorySeed {
            countries: vec![
                Country { id: 1, name: "U.S".into(), audit: audit.clone() },
                Country { id: 3, name: "Canada".into(), audit: audit.clone() },
            ],
            divisions: vec![
                Division { id: 29, name: "Ohio".into(), country_id: 1, audit: audit.clone() },
                Division { id: 68, name: "Ontario".into(), country_id: 3, audit: audit.clone() },
            ],
            customers: vec![Customer {
                id: 1,
                name: "Daddy Warbucks".into(),
                address: "1919 Boardwalk".into(),
                postal_code: "01291".into(),
                phone: "869-908-1875".into(),
                division_id: 29,
                audit,
                extended_address: None,
            }],
            ..MemorySeed::default()
        }
    }

    async fn service(store: &MemoryStore) -> CustomerService {
        let daos = store.daos();
        let divisions = Arc::new(DivisionService::load(&daos.divisions).await.unwrap());
        let countries = Arc::new(CountryService::load(&daos.countries).await.unwrap());
        CustomerService::load(daos.customers, divisions, countries)
            .await
            .unwrap()
    }

    fn draft(name: &str, division_id: i32) -> NewCustomer {
        NewCustomer {
            name: name.into(),
            address: "77 Elm St".into(),
            postal_code: "M5V".into(),
            phone: "416-555-0100".into(),
            division_id,
        }
    }

    #[tokio::test]
    async fn load_derives_extended_address() {
        let store = MemoryStore::seeded(seed());
        let svc = service(&store).await;

        assert_eq!(
            svc.by_id(1).unwrap().extended_address.as_deref(),
            Some("U.S address: 1919 Boardwalk, Ohio")
        );
    }

    #[tokio::test]
    async fn create_with_canadian_division() {
        let store = MemoryStore::seeded(seed());
        let mut svc = service(&store).await;

        let created = svc.create(&draft("Lady Maple", 68)).await.unwrap();

        assert_eq!(
            created.extended_address.as_deref(),
            Some("Canadian address: 77 Elm St, Ontario")
        );
        assert_eq!(svc.id_by_name("Lady Maple"), Some(created.id));
    }

    #[tokio::test]
    async fn unknown_division_is_rejected_before_writing() {
        let store = MemoryStore::seeded(seed());
        let mut svc = service(&store).await;

        let err = svc.create(&draft("Nowhere", 999)).await.unwrap_err();

        assert!(matches!(err, SchedulerError::NotFound { resource: "division", .. }));
        assert_eq!(store.customers.len().await, 1);
    }

    #[tokio::test]
    async fn filters_by_country_name() {
        let store = MemoryStore::seeded(seed());
        let mut svc = service(&store).await;
        svc.create(&draft("Lady Maple", 68)).await.unwrap();

        let names: Vec<&str> = svc.by_country_name("Canada").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Lady Maple"]);
        assert!(svc.by_country_name("Atlantis").is_empty());
    }

    #[tokio::test]
    async fn update_refreshes_address() {
        let store = MemoryStore::seeded(seed());
        let mut svc = service(&store).await;

        let updated = svc.update(1, &draft("Daddy Warbucks", 68)).await.unwrap().unwrap();

        assert_eq!(updated.division_id, 68);
        assert_eq!(svc.all()[0].extended_address, updated.extended_address);
    }

    #[tokio::test]
    async fn delete_missing_customer_is_none() {
        let store = MemoryStore::seeded(seed());
        let mut svc = service(&store).await;

        assert!(svc.delete(5).await.unwrap().is_none());
        assert!(svc.delete(1).await.unwrap().is_some());
        assert!(svc.all().is_empty());
    }
}
