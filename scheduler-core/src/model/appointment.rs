use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::{Audit, Keyed};
use crate::rules::TimeRange;

/// Row of the `appointments` table; `start`/`end` are stored as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub customer_id: i32,
    pub user_id: i32,
    pub contact_id: i32,
    pub audit: Audit,
}

/// Form data for creating or updating an appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub customer_id: i32,
    pub user_id: i32,
    pub contact_id: i32,
}

/// An appointment as the front end sees it: localized to the display zone
/// with the contact's name filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    #[serde(flatten)]
    pub record: AppointmentRecord,
    pub local_start: DateTime<Tz>,
    pub local_end: DateTime<Tz>,
    pub contact_name: String,
}

impl AppointmentRecord {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn localize(self, zone: Tz, contact_name: impl Into<String>) -> Appointment {
        Appointment {
            local_start: self.start.with_timezone(&zone),
            local_end: self.end.with_timezone(&zone),
            contact_name: contact_name.into(),
            record: self,
        }
    }

    pub fn to_draft(&self) -> NewAppointment {
        NewAppointment {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            kind: self.kind.clone(),
            start: self.start,
            end: self.end,
            customer_id: self.customer_id,
            user_id: self.user_id,
            contact_id: self.contact_id,
        }
    }
}

impl Appointment {
    pub fn id(&self) -> i32 {
        self.record.id
    }

    pub fn customer_id(&self) -> i32 {
        self.record.customer_id
    }

    pub fn range(&self) -> TimeRange {
        self.record.range()
    }
}

impl NewAppointment {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// Names of the text fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
            ("type", &self.kind),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

impl Keyed for AppointmentRecord {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn record() -> AppointmentRecord {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap();
        AppointmentRecord {
            id: 1,
            title: "Kickoff".into(),
            description: "Project kickoff".into(),
            location: "Room 4".into(),
            kind: "Planning".into(),
            start,
            end: start + chrono::Duration::hours(1),
            customer_id: 1,
            user_id: 1,
            contact_id: 2,
            audit: Audit::stamped(start),
        }
    }

    #[test]
    fn localize_keeps_the_instant() {
        let appt = record().localize(chrono_tz::America::Phoenix, "Li Lee");

        assert_eq!(appt.local_start.hour(), 7);
        assert_eq!(appt.local_start, appt.record.start);
        assert_eq!(appt.contact_name, "Li Lee");
    }

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["type"], "Planning");
    }

    #[test]
    fn missing_text_fields() {
        let mut draft = record().to_draft();
        draft.title.clear();
        draft.kind = "  ".into();
        assert_eq!(draft.missing_fields(), vec!["title", "type"]);
    }
}
