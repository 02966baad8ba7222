//! `scheduler appointments` - appointment records with schedule checks

use std::io::{self, IsTerminal};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::Confirm;
use scheduler_core::format::to_display;
use scheduler_core::model::{Appointment, NewAppointment};
use scheduler_core::{Overrides, SchedulerError, TimeSpan};

use super::confirm;
use crate::forms::{self, AppointmentFields};
use crate::output;
use crate::session::Session;

#[derive(Parser, Debug)]
pub struct AppointmentsArgs {
    #[command(subcommand)]
    pub command: AppointmentsCommand,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum SpanArg {
    /// Starting within the next week
    Week,
    /// Starting within the next month
    Month,
    /// Every appointment
    #[default]
    All,
}

impl From<SpanArg> for TimeSpan {
    fn from(span: SpanArg) -> Self {
        match span {
            SpanArg::Week => TimeSpan::Week,
            SpanArg::Month => TimeSpan::Month,
            SpanArg::All => TimeSpan::All,
        }
    }
}

#[derive(Args, Debug, Default, Clone, Copy)]
pub struct OverrideFlags {
    /// Proceed even if the time falls outside 8 AM - 10 PM Eastern on a weekday
    #[arg(long)]
    pub ignore_hours: bool,
    /// Proceed even if the customer already has an overlapping appointment
    #[arg(long)]
    pub allow_overlap: bool,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List appointments
    List {
        /// Time window, counted from now
        #[arg(long, value_enum, default_value_t = SpanArg::All)]
        span: SpanArg,
        /// Only this customer's appointments
        #[arg(long)]
        customer: Option<String>,
    },
    /// Add an appointment (prompts for anything not given as a flag)
    Add {
        #[command(flatten)]
        fields: AppointmentFields,
        #[command(flatten)]
        overrides: OverrideFlags,
    },
    /// Update an appointment
    Update {
        /// Appointment ID
        id: i32,
        #[command(flatten)]
        fields: AppointmentFields,
        #[command(flatten)]
        overrides: OverrideFlags,
    },
    /// Delete an appointment
    Delete {
        /// Appointment ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

pub async fn run_appointments(session: &mut Session, args: AppointmentsArgs) -> Result<()> {
    match args.command {
        AppointmentsCommand::List { span, customer } => run_list(session, span, customer.as_deref()),
        AppointmentsCommand::Add { fields, overrides } => run_add(session, fields, overrides).await,
        AppointmentsCommand::Update {
            id,
            fields,
            overrides,
        } => run_update(session, id, fields, overrides).await,
        AppointmentsCommand::Delete { id, yes } => run_delete(session, id, yes).await,
    }
}

const HEADERS: &[&str] = &[
    "ID", "Title", "Description", "Location", "Contact", "Type", "Start", "End", "Customer", "User",
];

fn run_list(session: &Session, span: SpanArg, customer: Option<&str>) -> Result<()> {
    let appointments = &session.services.appointments;
    let mut listed = appointments.by_span(span.into(), Utc::now());

    if let Some(name) = customer {
        let customer_id = session
            .services
            .customers
            .id_by_name(name)
            .ok_or_else(|| SchedulerError::not_found("customer", name))?;
        listed.retain(|a| a.customer_id() == customer_id);
    }
    listed.sort_by_key(|a| a.record.start);

    let now = session.now();
    output::emit(session.json, &listed, || {
        let rows: Vec<Vec<String>> = listed
            .iter()
            .map(|a| {
                vec![
                    a.id().to_string(),
                    a.record.title.clone(),
                    a.record.description.clone(),
                    a.record.location.clone(),
                    a.contact_name.clone(),
                    a.record.kind.clone(),
                    to_display(&a.local_start, &now),
                    to_display(&a.local_end, &now),
                    a.customer_id().to_string(),
                    a.record.user_id.to_string(),
                ]
            })
            .collect();
        output::print_table(HEADERS, &rows);
    })
}

/// Run the pre-write checks, offering to proceed past each warning.
/// `Ok(false)` means the user declined.
fn confirm_schedule(
    session: &Session,
    draft: &NewAppointment,
    editing: Option<i32>,
    flags: OverrideFlags,
) -> Result<bool> {
    let mut overrides = Overrides {
        business_hours: flags.ignore_hours,
        overlap: flags.allow_overlap,
    };

    loop {
        let err = match session.services.appointments.validate(draft, editing, overrides) {
            Ok(()) => return Ok(true),
            Err(err) if err.is_overridable() => err,
            Err(err) => return Err(err.into()),
        };

        if !io::stdin().is_terminal() {
            return Err(anyhow!(
                "{}\nPass --ignore-hours or --allow-overlap to proceed anyway.",
                err
            ));
        }
        let proceed = Confirm::new(&format!("{} Proceed anyway?", err))
            .with_default(false)
            .prompt()
            .context("Failed to get confirmation")?;
        if !proceed {
            return Ok(false);
        }

        if matches!(err, SchedulerError::OutsideBusinessHours) {
            overrides.business_hours = true;
        } else {
            overrides.overlap = true;
        }
    }
}

async fn run_add(session: &mut Session, fields: AppointmentFields, flags: OverrideFlags) -> Result<()> {
    let draft = forms::appointment_draft(session, fields, None)?;
    if !confirm_schedule(session, &draft, None, flags)? {
        println!("Cancelled");
        return Ok(());
    }

    let created = session.services.appointments.create(&draft).await?;
    print_saved(session, &created, "added")
}

async fn run_update(
    session: &mut Session,
    id: i32,
    fields: AppointmentFields,
    flags: OverrideFlags,
) -> Result<()> {
    let current = session
        .services
        .appointments
        .by_id(id)
        .cloned()
        .ok_or_else(|| anyhow!("No appointment with ID {}", id))?;

    let draft = forms::appointment_draft(session, fields, Some(&current))?;
    if !confirm_schedule(session, &draft, Some(id), flags)? {
        println!("Cancelled");
        return Ok(());
    }

    let updated = session
        .services
        .appointments
        .update(id, &draft)
        .await?
        .ok_or_else(|| anyhow!("Appointment {} no longer exists", id))?;
    print_saved(session, &updated, "updated")
}

fn print_saved(session: &Session, appointment: &Appointment, verb: &str) -> Result<()> {
    let now = session.now();
    output::emit(session.json, appointment, || {
        println!(
            "Appointment {} {}: \"{}\" {} to {}",
            appointment.id(),
            verb,
            appointment.record.title,
            to_display(&appointment.local_start, &now),
            to_display(&appointment.local_end, &now)
        );
    })
}

async fn run_delete(session: &mut Session, id: i32, yes: bool) -> Result<()> {
    let (title, kind) = match session.services.appointments.by_id(id) {
        Some(a) => (a.record.title.clone(), a.record.kind.clone()),
        None => return Err(anyhow!("No appointment with ID {}", id)),
    };

    if !confirm(&format!("Delete appointment {} ({}, {})?", id, title, kind), yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let removed = session
        .services
        .appointments
        .delete(id)
        .await?
        .ok_or_else(|| anyhow!("Appointment {} was not deleted", id))?;

    output::emit(session.json, &removed, || {
        println!(
            "Appointment {} of type {} cancelled",
            removed.id(),
            removed.record.kind
        );
    })
}
