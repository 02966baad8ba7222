use crate::error::Result;
use crate::model::Contact;
use crate::store::ContactDao;

/// Cached contact list; read-only after load
pub struct ContactService {
    contacts: Vec<Contact>,
}

impl ContactService {
    pub async fn load(dao: &ContactDao) -> Result<Self> {
        let contacts = dao.read_all().await?;
        tracing::debug!(count = contacts.len(), "loaded contacts");
        Ok(Self::from_rows(contacts))
    }

    pub fn from_rows(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn names(&self) -> Vec<&str> {
        self.contacts.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn id_by_name(&self, name: &str) -> Option<i32> {
        self.contacts.iter().find(|c| c.name == name).map(|c| c.id)
    }

    pub fn name_by_id(&self, id: i32) -> Option<&str> {
        self.contacts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}
