//! Customer and appointment forms
//!
//! Each field comes from its flag when given, otherwise from an interactive
//! prompt pre-filled with the record being edited.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Args;
use inquire::{Select, Text};
use scheduler_core::format::{clock_display, parse_local};
use scheduler_core::model::{Appointment, Customer, NewAppointment, NewCustomer};
use scheduler_core::SchedulerError;

use crate::session::Session;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Args, Debug, Default)]
pub struct CustomerFields {
    /// Customer name
    #[arg(long)]
    pub name: Option<String>,
    /// Street address
    #[arg(long)]
    pub address: Option<String>,
    /// Postal code
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Country name (narrows the division choices)
    #[arg(long)]
    pub country: Option<String>,
    /// First-level division name (state, province, region)
    #[arg(long)]
    pub division: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct AppointmentFields {
    /// Appointment title
    #[arg(long)]
    pub title: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Location
    #[arg(long)]
    pub location: Option<String>,
    /// Appointment type
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Customer name
    #[arg(long)]
    pub customer: Option<String>,
    /// Contact name
    #[arg(long)]
    pub contact: Option<String>,
    /// Username of the user who owns the appointment (defaults to you)
    #[arg(long)]
    pub user: Option<String>,
    /// Start date, YYYY-MM-DD in the display zone
    #[arg(long)]
    pub start_date: Option<String>,
    /// Start time, e.g. "9:30 AM"
    #[arg(long)]
    pub start_time: Option<String>,
    /// End date, YYYY-MM-DD (defaults to the start date)
    #[arg(long)]
    pub end_date: Option<String>,
    /// End time, e.g. "10:30 AM"
    #[arg(long)]
    pub end_time: Option<String>,
}

fn text_field(label: &str, flag: Option<String>, current: Option<&str>) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    let mut prompt = Text::new(label);
    if let Some(current) = current {
        prompt = prompt.with_default(current);
    }
    prompt
        .prompt()
        .with_context(|| format!("Failed to get {}", label.trim_end_matches(':')))
}

fn choice_field(label: &str, flag: Option<String>, options: Vec<String>, current: Option<&str>) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if options.is_empty() {
        return Err(anyhow!("No choices available for {}", label.trim_end_matches(':')));
    }
    let start = current
        .and_then(|c| options.iter().position(|o| o == c))
        .unwrap_or(0);
    Select::new(label, options)
        .with_starting_cursor(start)
        .prompt()
        .with_context(|| format!("Failed to get {}", label.trim_end_matches(':')))
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Collect a customer draft; `current` pre-fills prompts when updating.
pub fn customer_draft(session: &Session, fields: CustomerFields, current: Option<&Customer>) -> Result<NewCustomer> {
    let services = &session.services;

    let name = text_field("Name:", fields.name, current.map(|c| c.name.as_str()))?;
    let address = text_field("Address:", fields.address, current.map(|c| c.address.as_str()))?;
    let postal_code = text_field(
        "Postal code:",
        fields.postal_code,
        current.map(|c| c.postal_code.as_str()),
    )?;
    let phone = text_field("Phone:", fields.phone, current.map(|c| c.phone.as_str()))?;

    let current_division = current.and_then(|c| services.divisions.by_id(c.division_id));
    let current_country = current_division.and_then(|d| services.countries.by_id(d.country_id));

    let division_id = match fields.division {
        Some(division) if fields.country.is_none() => services
            .divisions
            .by_name(&division)
            .map(|d| d.id)
            .ok_or_else(|| SchedulerError::not_found("division", &division))?,
        division => {
            let country_name = choice_field(
                "Country:",
                fields.country,
                owned(services.countries.names()),
                current_country.map(|c| c.name.as_str()),
            )?;
            let country = services
                .countries
                .by_name(&country_name)
                .ok_or_else(|| SchedulerError::not_found("country", &country_name))?;

            let division_name = choice_field(
                "Division:",
                division,
                owned(services.divisions.names_by_country(country)),
                current_division.map(|d| d.name.as_str()),
            )?;
            services
                .divisions
                .by_country(country)
                .into_iter()
                .find(|d| d.name == division_name)
                .map(|d| d.id)
                .ok_or_else(|| SchedulerError::not_found("division", &division_name))?
        }
    };

    Ok(NewCustomer {
        name: name.trim().to_string(),
        address: address.trim().to_string(),
        postal_code: postal_code.trim().to_string(),
        phone: phone.trim().to_string(),
        division_id,
    })
}

/// End date offered when none is given: the current end date while the start
/// date is unchanged, otherwise the new start date.
fn default_end_date(
    start_date: &str,
    current_start: Option<&DateTime<Tz>>,
    current_end: Option<&DateTime<Tz>>,
) -> String {
    match (current_start, current_end) {
        (Some(start), Some(end)) if start.format(DATE_FORMAT).to_string() == start_date.trim() => {
            end.format(DATE_FORMAT).to_string()
        }
        _ => start_date.trim().to_string(),
    }
}

/// Collect an appointment draft; `current` pre-fills prompts when updating.
pub fn appointment_draft(
    session: &Session,
    fields: AppointmentFields,
    current: Option<&Appointment>,
) -> Result<NewAppointment> {
    let services = &session.services;
    let zone = session.zone;
    let record = current.map(|a| &a.record);

    let title = text_field("Title:", fields.title, record.map(|r| r.title.as_str()))?;
    let description = text_field(
        "Description:",
        fields.description,
        record.map(|r| r.description.as_str()),
    )?;
    let location = text_field("Location:", fields.location, record.map(|r| r.location.as_str()))?;
    let kind = text_field("Type:", fields.kind, record.map(|r| r.kind.as_str()))?;

    let customer_name = choice_field(
        "Customer:",
        fields.customer,
        owned(services.customers.names()),
        record.and_then(|r| services.customers.name_by_id(r.customer_id)),
    )?;
    let customer_id = services
        .customers
        .id_by_name(&customer_name)
        .ok_or_else(|| SchedulerError::not_found("customer", &customer_name))?;

    let contact_name = choice_field(
        "Contact:",
        fields.contact,
        owned(services.contacts.names()),
        current.map(|a| a.contact_name.as_str()),
    )?;
    let contact_id = services
        .contacts
        .id_by_name(&contact_name)
        .ok_or_else(|| SchedulerError::not_found("contact", &contact_name))?;

    let username = match fields.user {
        Some(user) => user,
        None => record
            .and_then(|r| services.users.username_by_id(r.user_id))
            .unwrap_or(session.user.username.as_str())
            .to_string(),
    };
    let user_id = services
        .users
        .id_by_username(&username)
        .ok_or_else(|| SchedulerError::not_found("user", &username))?;

    let current_start = current.map(|a| a.local_start);
    let current_end = current.map(|a| a.local_end);
    let default_day = current_start
        .unwrap_or_else(|| Utc::now().with_timezone(&zone))
        .format(DATE_FORMAT)
        .to_string();

    let start_date = text_field("Start date (YYYY-MM-DD):", fields.start_date, Some(&default_day))?;
    let start_time = text_field(
        "Start time (h:mm AM):",
        fields.start_time,
        current_start.as_ref().map(clock_display).as_deref(),
    )?;
    let end_default = default_end_date(&start_date, current_start.as_ref(), current_end.as_ref());
    let end_date = match fields.end_date {
        Some(date) => date,
        // flags-only runs default the end date to the start date
        None if fields.end_time.is_some() => end_default,
        None => text_field("End date (YYYY-MM-DD):", None, Some(&end_default))?,
    };
    let end_time = text_field(
        "End time (h:mm AM):",
        fields.end_time,
        current_end.as_ref().map(clock_display).as_deref(),
    )?;

    let start = parse_local(&start_date, &start_time, zone)?;
    let end = parse_local(&end_date, &end_time, zone)?;

    Ok(NewAppointment {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        location: location.trim().to_string(),
        kind: kind.trim().to_string(),
        start: start.with_timezone(&Utc),
        end: end.with_timezone(&Utc),
        customer_id,
        user_id,
        contact_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn local(d: u32, h: u32) -> DateTime<Tz> {
        New_York.with_ymd_and_hms(2024, 7, d, h, 0, 0).unwrap()
    }

    #[test]
    fn moved_start_date_drags_end_date_along() {
        let (start, end) = (local(1, 9), local(1, 10));
        assert_eq!(default_end_date("2024-07-15", Some(&start), Some(&end)), "2024-07-15");
    }

    #[test]
    fn unchanged_start_date_keeps_multi_day_end() {
        let (start, end) = (local(1, 20), local(2, 9));
        assert_eq!(default_end_date("2024-07-01", Some(&start), Some(&end)), "2024-07-02");
    }

    #[test]
    fn new_appointment_ends_on_start_date() {
        assert_eq!(default_end_date(" 2024-07-03 ", None, None), "2024-07-03");
    }
}
