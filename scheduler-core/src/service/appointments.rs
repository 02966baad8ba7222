//! Cached, localized view of the appointments table
//!
//! The cache is filled once at load and kept in step with every successful
//! write; storage is never re-read afterwards.

use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::ContactService;
use crate::error::{Result, SchedulerError};
use crate::model::{Appointment, AppointmentRecord, NewAppointment};
use crate::rules::{self, Overrides, TimeRange};
use crate::store::AppointmentDao;

/// Window for the upcoming-appointments views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSpan {
    Week,
    Month,
    All,
}

pub struct AppointmentService {
    dao: AppointmentDao,
    contacts: Arc<ContactService>,
    zone: Tz,
    appointments: Vec<Appointment>,
}

impl AppointmentService {
    pub async fn load(dao: AppointmentDao, contacts: Arc<ContactService>, zone: Tz) -> Result<Self> {
        let records = dao.read_all().await?;
        tracing::debug!(count = records.len(), zone = %zone, "loaded appointments");

        let mut service = Self {
            dao,
            contacts,
            zone,
            appointments: Vec::with_capacity(records.len()),
        };
        let appointments: Vec<Appointment> =
            records.into_iter().map(|r| service.localize(r)).collect();
        service.appointments = appointments;
        Ok(service)
    }

    fn localize(&self, record: AppointmentRecord) -> Appointment {
        let contact_name = match self.contacts.name_by_id(record.contact_id) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!(
                    appointment_id = record.id,
                    contact_id = record.contact_id,
                    "appointment references an unknown contact"
                );
                String::new()
            }
        };
        record.localize(self.zone, contact_name)
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn by_id(&self, id: i32) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    pub fn by_customer(&self, customer_id: i32) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.customer_id() == customer_id)
            .collect()
    }

    /// Appointments starting strictly inside `(now, now + span)`
    pub fn by_span(&self, span: TimeSpan, now: DateTime<Utc>) -> Vec<&Appointment> {
        let local_now = now.with_timezone(&self.zone);
        let horizon = match span {
            TimeSpan::All => return self.appointments.iter().collect(),
            TimeSpan::Week => local_now + Duration::weeks(1),
            TimeSpan::Month => match local_now.checked_add_months(Months::new(1)) {
                Some(horizon) => horizon,
                None => return Vec::new(),
            },
        };
        self.starting_between(now, horizon.with_timezone(&Utc))
    }

    /// Appointments starting within the next `minutes`, for the post-login alert
    /// A window that cannot be represented yields nothing.
    pub fn starting_within(&self, minutes: i64, now: DateTime<Utc>) -> Vec<&Appointment> {
        match Duration::try_minutes(minutes).and_then(|window| now.checked_add_signed(window)) {
            Some(until) => self.starting_between(now, until),
            None => {
                tracing::warn!(minutes, "upcoming window out of range");
                Vec::new()
            }
        }
    }

    fn starting_between(&self, after: DateTime<Utc>, before: DateTime<Utc>) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.record.start > after && a.record.start < before)
            .collect()
    }

    /// First of the customer's appointments overlapping `range`, other than `exclude`
    pub fn has_conflict(
        &self,
        range: TimeRange,
        customer_id: i32,
        exclude: Option<i32>,
    ) -> Option<&Appointment> {
        self.appointments.iter().find(|a| {
            a.customer_id() == customer_id && Some(a.id()) != exclude && a.range().overlaps(&range)
        })
    }

    /// Full pre-write check for a draft: required fields first, then the schedule rules.
    pub fn validate(
        &self,
        draft: &NewAppointment,
        editing: Option<i32>,
        overrides: Overrides,
    ) -> Result<()> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(SchedulerError::required(missing));
        }

        let existing = self
            .by_customer(draft.customer_id)
            .into_iter()
            .map(|a| (a.id(), a.range()));
        rules::check_schedule(draft.range(), existing, editing, overrides)
    }

    pub async fn create(&mut self, draft: &NewAppointment) -> Result<Appointment> {
        let record = self.dao.create(draft).await?;
        let appointment = self.localize(record);
        tracing::info!(id = appointment.id(), title = %appointment.record.title, "appointment created");

        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// `None` when no row with `id` exists; the cache is left alone in that case.
    pub async fn update(&mut self, id: i32, draft: &NewAppointment) -> Result<Option<Appointment>> {
        let Some(record) = self.dao.update(id, draft).await? else {
            return Ok(None);
        };
        let appointment = self.localize(record);
        tracing::info!(id, "appointment updated");

        match self.appointments.iter_mut().find(|a| a.id() == id) {
            Some(slot) => *slot = appointment.clone(),
            None => self.appointments.push(appointment.clone()),
        }
        Ok(Some(appointment))
    }

    /// Removes appointment `id`, returning what was removed.
    pub async fn delete(&mut self, id: i32) -> Result<Option<Appointment>> {
        if !self.dao.delete(id).await? {
            tracing::debug!(id, "no appointment deleted");
            return Ok(None);
        }
        tracing::info!(id, "appointment deleted");

        let index = self.appointments.iter().position(|a| a.id() == id);
        Ok(index.map(|i| self.appointments.remove(i)))
    }

    /// Delete every appointment for a customer: `(deleted, not_deleted)`.
    pub async fn delete_for_customer(
        &mut self,
        customer_id: i32,
    ) -> Result<(Vec<Appointment>, Vec<Appointment>)> {
        let targets: Vec<Appointment> =
            self.by_customer(customer_id).into_iter().cloned().collect();

        let mut deleted = Vec::new();
        let mut not_deleted = Vec::new();
        for appointment in targets {
            match self.delete(appointment.id()).await {
                Ok(Some(removed)) => deleted.push(removed),
                Ok(None) => not_deleted.push(appointment),
                Err(e) => {
                    tracing::warn!(id = appointment.id(), error = %e, "appointment not deleted");
                    not_deleted.push(appointment);
                }
            }
        }
        Ok((deleted, not_deleted))
    }
}
