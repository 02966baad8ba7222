use crate::error::Result;
use crate::model::User;
use crate::store::UserDao;

/// Cached user accounts; read-only after load
pub struct UserService {
    users: Vec<User>,
}

impl UserService {
    pub async fn load(dao: &UserDao) -> Result<Self> {
        let users = dao.read_all().await?;
        tracing::debug!(count = users.len(), "loaded users");
        Ok(Self::from_rows(users))
    }

    pub fn from_rows(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn usernames(&self) -> Vec<&str> {
        self.users.iter().map(|u| u.username.as_str()).collect()
    }

    pub fn id_by_username(&self, username: &str) -> Option<i32> {
        self.by_username(username).map(|u| u.id)
    }

    pub fn username_by_id(&self, id: i32) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.as_str())
    }
}
