//! Read-only reports over the cached appointments
//!
//! Each report is computed once from the lists it is given and holds nothing
//! but its rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::format;
use crate::model::{Appointment, Contact, Customer};

/// Appointment count for one (month, type) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTypeRow {
    pub month: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthTypeReport {
    pub rows: Vec<MonthTypeRow>,
}

impl MonthTypeReport {
    /// Group by the month of the local start, then by type. Rows come out
    /// in calendar order (January first), types alphabetical within a month.
    pub fn build(appointments: &[Appointment]) -> Self {
        let mut counts: BTreeMap<(u32, String), (String, usize)> = BTreeMap::new();
        for appointment in appointments {
            let start = &appointment.local_start;
            let entry = counts
                .entry((start.month(), appointment.record.kind.clone()))
                .or_insert_with(|| (format::month_name(start), 0));
            entry.1 += 1;
        }

        let rows = counts
            .into_iter()
            .map(|((_, kind), (month, total))| MonthTypeRow { month, kind, total })
            .collect();
        Self { rows }
    }
}

/// One appointment line in a contact's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactScheduleItem {
    pub contact_name: String,
    pub appointment_id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub customer_id: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactScheduleReport {
    pub items: Vec<ContactScheduleItem>,
}

impl ContactScheduleReport {
    /// Contacts in the given order, each followed by its appointments sorted by start.
    pub fn build(contacts: &[Contact], appointments: &[Appointment], now: DateTime<Tz>) -> Self {
        let items = contacts
            .iter()
            .flat_map(|contact| {
                sorted_by_start(appointments, |a| a.record.contact_id == contact.id)
                    .into_iter()
                    .map(|a| ContactScheduleItem {
                        contact_name: contact.name.clone(),
                        appointment_id: a.id(),
                        title: a.record.title.clone(),
                        kind: a.record.kind.clone(),
                        description: a.record.description.clone(),
                        start: format::to_display(&a.local_start, &now),
                        end: format::to_display(&a.local_end, &now),
                        customer_id: a.customer_id(),
                    })
            })
            .collect();
        Self { items }
    }
}

/// One appointment line in a customer's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerScheduleItem {
    pub customer_name: String,
    pub appointment_id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub contact_id: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerScheduleReport {
    pub items: Vec<CustomerScheduleItem>,
}

impl CustomerScheduleReport {
    pub fn build(customers: &[Customer], appointments: &[Appointment], now: DateTime<Tz>) -> Self {
        let items = customers
            .iter()
            .flat_map(|customer| {
                sorted_by_start(appointments, |a| a.customer_id() == customer.id)
                    .into_iter()
                    .map(|a| CustomerScheduleItem {
                        customer_name: customer.name.clone(),
                        appointment_id: a.id(),
                        title: a.record.title.clone(),
                        kind: a.record.kind.clone(),
                        description: a.record.description.clone(),
                        start: format::to_display(&a.local_start, &now),
                        end: format::to_display(&a.local_end, &now),
                        contact_id: a.record.contact_id,
                    })
            })
            .collect();
        Self { items }
    }
}

fn sorted_by_start<F>(appointments: &[Appointment], keep: F) -> Vec<&Appointment>
where
    F: Fn(&Appointment) -> bool,
{
    let mut matching: Vec<&Appointment> = appointments.iter().filter(|a| keep(a)).collect();
    matching.sort_by_key(|a| a.record.start);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppointmentRecord, Audit};
    use chrono::{Duration, TimeZone, Utc};

    fn appointment(id: i32, kind: &str, start: DateTime<Utc>, customer_id: i32, contact_id: i32) -> Appointment {
        AppointmentRecord {
            id,
            title: format!("Appt {}", id),
            description: "desc".into(),
            location: "here".into(),
            kind: kind.into(),
            start,
            end: start + Duration::minutes(30),
            customer_id,
            user_id: 1,
            contact_id,
            audit: Audit::stamped(start),
        }
        .localize(chrono_tz::UTC, "someone")
    }

    fn utc(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn month_type_counts_in_calendar_order() {
        let appointments = vec![
            appointment(1, "Planning", utc(3, 4, 14), 1, 1),
            appointment(2, "Debrief", utc(1, 9, 14), 1, 1),
            appointment(3, "Planning", utc(3, 20, 14), 1, 1),
            appointment(4, "Debrief", utc(3, 21, 14), 1, 1),
        ];

        let report = MonthTypeReport::build(&appointments);

        let rows: Vec<(&str, &str, usize)> = report
            .rows
            .iter()
            .map(|r| (r.month.as_str(), r.kind.as_str(), r.total))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("January", "Debrief", 1),
                ("March", "Debrief", 1),
                ("March", "Planning", 2),
            ]
        );
    }

    #[test]
    fn month_comes_from_the_local_start() {
        // 02:00 UTC on Feb 1 is still January 31 in New York
        let appt = AppointmentRecord {
            id: 1,
            title: "Late".into(),
            description: "d".into(),
            location: "l".into(),
            kind: "Call".into(),
            start: utc(2, 1, 2),
            end: utc(2, 1, 3),
            customer_id: 1,
            user_id: 1,
            contact_id: 1,
            audit: Audit::stamped(utc(1, 1, 0)),
        }
        .localize(chrono_tz::America::New_York, "x");

        let report = MonthTypeReport::build(&[appt]);
        assert_eq!(report.rows[0].month, "January");
    }

    #[test]
    fn contact_schedule_groups_by_contact_sorted_by_start() {
        let contacts = vec![
            Contact { id: 2, name: "Daniel Garcia".into(), email: "d@x".into() },
            Contact { id: 1, name: "Anika Costa".into(), email: "a@x".into() },
        ];
        let appointments = vec![
            appointment(1, "Call", utc(5, 10, 14), 7, 1),
            appointment(2, "Call", utc(5, 2, 14), 8, 1),
            appointment(3, "Call", utc(5, 3, 14), 7, 2),
        ];
        let now = utc(1, 1, 0).with_timezone(&chrono_tz::UTC);

        let report = ContactScheduleReport::build(&contacts, &appointments, now);

        let order: Vec<(&str, i32)> = report
            .items
            .iter()
            .map(|i| (i.contact_name.as_str(), i.appointment_id))
            .collect();
        assert_eq!(order, vec![("Daniel Garcia", 3), ("Anika Costa", 2), ("Anika Costa", 1)]);
        assert_eq!(report.items[0].start, "03/05/24 - 2:00 PM");
        assert_eq!(report.items[0].customer_id, 7);
    }

    #[test]
    fn customer_schedule_carries_contact_ids() {
        let customer = Customer {
            id: 7,
            name: "Acme".into(),
            address: "1 Road".into(),
            postal_code: "00000".into(),
            phone: "555".into(),
            division_id: 1,
            audit: Audit::stamped(utc(1, 1, 0)),
            extended_address: None,
        };
        let appointments = vec![
            appointment(1, "Call", utc(5, 10, 14), 7, 3),
            appointment(2, "Call", utc(5, 2, 14), 8, 1),
        ];
        let now = utc(5, 10, 9).with_timezone(&chrono_tz::UTC);

        let report = CustomerScheduleReport::build(&[customer], &appointments, now);

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].contact_id, 3);
        assert_eq!(report.items[0].start, "Today - 2:00 PM");
    }
}
