use serde::{Deserialize, Serialize};

use super::{Audit, Keyed};

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl Keyed for User {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.username
    }
}
