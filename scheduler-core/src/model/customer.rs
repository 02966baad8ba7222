use serde::{Deserialize, Serialize};

use super::{Audit, Country, Division, Keyed};

/// Row of the `customers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: i32,
    pub audit: Audit,
    /// Display address, derived from the division/country chain after load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_address: Option<String>,
}

/// Form data for creating or updating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: i32,
}

impl Customer {
    /// Builds e.g. `"U.S address: 123 Main, Ohio"`; Canada reads "Canadian".
    pub fn describe_address(address: &str, division: &Division, country: &Country) -> String {
        let country_name = if country.name == "Canada" {
            "Canadian"
        } else {
            country.name.as_str()
        };
        format!("{} address: {}, {}", country_name, address, division.name)
    }

    pub fn with_extended_address(mut self, extended: String) -> Self {
        self.extended_address = Some(extended);
        self
    }

    /// Form values currently held by this customer
    pub fn to_draft(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.clone(),
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            phone: self.phone.clone(),
            division_id: self.division_id,
        }
    }
}

impl NewCustomer {
    /// Names of the fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.postal_code.trim().is_empty() {
            missing.push("postal code");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

impl Keyed for Customer {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
