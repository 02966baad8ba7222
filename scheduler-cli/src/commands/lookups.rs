//! Reference tables: contacts, users, countries, divisions

use anyhow::Result;
use clap::Parser;
use scheduler_core::model::Division;
use scheduler_core::SchedulerError;

use crate::output;
use crate::session::Session;

#[derive(Parser, Debug)]
pub struct DivisionsArgs {
    /// Only divisions in this country
    #[arg(long)]
    pub country: Option<String>,
}

pub fn run_contacts(session: &Session) -> Result<()> {
    let contacts = session.services.contacts.all();
    output::emit(session.json, contacts, || {
        let rows: Vec<Vec<String>> = contacts
            .iter()
            .map(|c| vec![c.id.to_string(), c.name.clone(), c.email.clone()])
            .collect();
        output::print_table(&["ID", "Name", "Email"], &rows);
    })
}

pub fn run_users(session: &Session) -> Result<()> {
    let users = session.services.users.all();
    output::emit(session.json, users, || {
        let rows: Vec<Vec<String>> = users
            .iter()
            .map(|u| vec![u.id.to_string(), u.username.clone()])
            .collect();
        output::print_table(&["ID", "Username"], &rows);
    })
}

pub fn run_countries(session: &Session) -> Result<()> {
    let countries = session.services.countries.all();
    output::emit(session.json, countries, || {
        let rows: Vec<Vec<String>> = countries
            .iter()
            .map(|c| vec![c.id.to_string(), c.name.clone()])
            .collect();
        output::print_table(&["ID", "Country"], &rows);
    })
}

pub fn run_divisions(session: &Session, args: DivisionsArgs) -> Result<()> {
    let services = &session.services;
    let divisions: Vec<&Division> = match args.country.as_deref() {
        Some(name) => {
            let country = services
                .countries
                .by_name(name)
                .ok_or_else(|| SchedulerError::not_found("country", name))?;
            services.divisions.by_country(country)
        }
        None => services
            .countries
            .all()
            .iter()
            .flat_map(|c| services.divisions.by_country(c))
            .collect(),
    };

    output::emit(session.json, &divisions, || {
        let rows: Vec<Vec<String>> = divisions
            .iter()
            .map(|d| {
                let country = services
                    .countries
                    .by_id(d.country_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                vec![d.id.to_string(), d.name.clone(), country]
            })
            .collect();
        output::print_table(&["ID", "Division", "Country"], &rows);
    })
}
