use serde::{Deserialize, Serialize};

use super::{Audit, Keyed};

/// First-level division (state, province, region) of a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: i32,
    pub name: String,
    pub country_id: i32,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDivision {
    pub name: String,
    pub country_id: i32,
}

impl Keyed for Division {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
