use crate::error::Result;
use crate::model::Country;
use crate::store::CountryDao;

/// Cached country list; read-only after load
pub struct CountryService {
    countries: Vec<Country>,
}

impl CountryService {
    pub async fn load(dao: &CountryDao) -> Result<Self> {
        let countries = dao.read_all().await?;
        tracing::debug!(count = countries.len(), "loaded countries");
        Ok(Self::from_rows(countries))
    }

    pub fn from_rows(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    pub fn by_id(&self, id: i32) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.name.as_str()).collect()
    }
}
