use crate::error::Result;
use crate::model::{Country, Division};
use crate::store::DivisionDao;

/// Cached first-level divisions; read-only after load
pub struct DivisionService {
    divisions: Vec<Division>,
}

impl DivisionService {
    pub async fn load(dao: &DivisionDao) -> Result<Self> {
        let divisions = dao.read_all().await?;
        tracing::debug!(count = divisions.len(), "loaded divisions");
        Ok(Self::from_rows(divisions))
    }

    pub fn from_rows(divisions: Vec<Division>) -> Self {
        Self { divisions }
    }

    pub fn by_id(&self, id: i32) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.name == name)
    }

    pub fn by_country(&self, country: &Country) -> Vec<&Division> {
        self.divisions
            .iter()
            .filter(|d| d.country_id == country.id)
            .collect()
    }

    pub fn names_by_country(&self, country: &Country) -> Vec<&str> {
        self.by_country(country)
            .into_iter()
            .map(|d| d.name.as_str())
            .collect()
    }
}
