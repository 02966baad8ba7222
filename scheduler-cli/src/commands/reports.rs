//! `scheduler reports` - read-only summaries over the loaded appointments

use anyhow::Result;
use clap::{Parser, Subcommand};
use scheduler_core::{ContactScheduleReport, CustomerScheduleReport, MonthTypeReport};

use crate::output;
use crate::session::Session;

#[derive(Parser, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Appointment totals by month and type
    MonthType,
    /// Every contact's appointments in start order
    Contacts,
    /// Every customer's appointments in start order
    Customers,
}

pub fn run_reports(session: &Session, args: ReportsArgs) -> Result<()> {
    let services = &session.services;
    let appointments = services.appointments.all();

    match args.command {
        ReportsCommand::MonthType => {
            let report = MonthTypeReport::build(appointments);
            output::emit(session.json, &report, || {
                let rows: Vec<Vec<String>> = report
                    .rows
                    .iter()
                    .map(|r| vec![r.month.clone(), r.kind.clone(), r.total.to_string()])
                    .collect();
                output::print_table(&["Month", "Type", "Total"], &rows);
            })
        }
        ReportsCommand::Contacts => {
            let report = ContactScheduleReport::build(services.contacts.all(), appointments, session.now());
            output::emit(session.json, &report, || {
                let rows: Vec<Vec<String>> = report
                    .items
                    .iter()
                    .map(|i| {
                        vec![
                            i.contact_name.clone(),
                            i.appointment_id.to_string(),
                            i.title.clone(),
                            i.kind.clone(),
                            i.description.clone(),
                            i.start.clone(),
                            i.end.clone(),
                            i.customer_id.to_string(),
                        ]
                    })
                    .collect();
                output::print_table(
                    &["Contact", "ID", "Title", "Type", "Description", "Start", "End", "Customer"],
                    &rows,
                );
            })
        }
        ReportsCommand::Customers => {
            let report =
                CustomerScheduleReport::build(services.customers.all(), appointments, session.now());
            output::emit(session.json, &report, || {
                let rows: Vec<Vec<String>> = report
                    .items
                    .iter()
                    .map(|i| {
                        vec![
                            i.customer_name.clone(),
                            i.appointment_id.to_string(),
                            i.title.clone(),
                            i.kind.clone(),
                            i.description.clone(),
                            i.start.clone(),
                            i.end.clone(),
                            i.contact_id.to_string(),
                        ]
                    })
                    .collect();
                output::print_table(
                    &["Customer", "ID", "Title", "Type", "Description", "Start", "End", "Contact"],
                    &rows,
                );
            })
        }
    }
}
