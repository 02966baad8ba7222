//! Value records for the scheduling tables
//!
//! Every table carries the same four audit columns; they are filled in by the
//! database on insert/update and never written by drafts.

mod appointment;
mod contact;
mod country;
mod customer;
mod division;
mod user;

pub use appointment::{Appointment, AppointmentRecord, NewAppointment};
pub use contact::{Contact, NewContact};
pub use country::{Country, NewCountry};
pub use customer::{Customer, NewCustomer};
pub use division::{Division, NewDivision};
pub use user::{NewUser, User};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded in the audit columns for every write from this tool
pub const AUDIT_AUTHOR: &str = "script";

/// Create/update bookkeeping shared by every table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl Audit {
    /// Audit stamp for a row written at `now`
    pub fn stamped(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            created_by: AUDIT_AUTHOR.to_string(),
            updated_at: now,
            updated_by: AUDIT_AUTHOR.to_string(),
        }
    }

    /// Same record, touched again at `now`
    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            updated_by: AUDIT_AUTHOR.to_string(),
            ..self.clone()
        }
    }
}

/// Records addressable by a numeric id and a unique display name
pub trait Keyed {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
}
