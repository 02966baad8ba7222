//! `scheduler customers` - customer records

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use scheduler_core::model::Customer;

use super::confirm;
use crate::forms::{self, CustomerFields};
use crate::output;
use crate::session::Session;

#[derive(Parser, Debug)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    /// List customers
    List {
        /// Only customers in this country
        #[arg(long)]
        country: Option<String>,
    },
    /// Add a customer (prompts for anything not given as a flag)
    Add(CustomerFields),
    /// Update a customer
    Update {
        /// Customer ID
        id: i32,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer and all of their appointments
    Delete {
        /// Customer ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

pub async fn run_customers(session: &mut Session, args: CustomersArgs) -> Result<()> {
    match args.command {
        CustomersCommand::List { country } => run_list(session, country.as_deref()),
        CustomersCommand::Add(fields) => run_add(session, fields).await,
        CustomersCommand::Update { id, fields } => run_update(session, id, fields).await,
        CustomersCommand::Delete { id, yes } => run_delete(session, id, yes).await,
    }
}

fn customer_row(customer: &Customer) -> Vec<String> {
    vec![
        customer.id.to_string(),
        customer.name.clone(),
        customer
            .extended_address
            .clone()
            .unwrap_or_else(|| customer.address.clone()),
        customer.postal_code.clone(),
        customer.phone.clone(),
    ]
}

const HEADERS: &[&str] = &["ID", "Name", "Address", "Postal Code", "Phone"];

fn run_list(session: &Session, country: Option<&str>) -> Result<()> {
    let customers: Vec<&Customer> = match country {
        Some(name) => session.services.customers.by_country_name(name),
        None => session.services.customers.all().iter().collect(),
    };

    output::emit(session.json, &customers, || {
        let rows: Vec<Vec<String>> = customers.iter().map(|c| customer_row(c)).collect();
        output::print_table(HEADERS, &rows);
    })
}

async fn run_add(session: &mut Session, fields: CustomerFields) -> Result<()> {
    let draft = forms::customer_draft(session, fields, None)?;
    let created = session.services.customers.create(&draft).await?;

    output::emit(session.json, &created, || {
        println!("Customer {} added (ID {})", created.name, created.id);
    })
}

async fn run_update(session: &mut Session, id: i32, fields: CustomerFields) -> Result<()> {
    let current = session
        .services
        .customers
        .by_id(id)
        .cloned()
        .ok_or_else(|| anyhow!("No customer with ID {}", id))?;

    let draft = forms::customer_draft(session, fields, Some(&current))?;
    let updated = session
        .services
        .customers
        .update(id, &draft)
        .await?
        .ok_or_else(|| anyhow!("Customer {} no longer exists", id))?;

    output::emit(session.json, &updated, || {
        println!("Customer {} updated", updated.id);
    })
}

async fn run_delete(session: &mut Session, id: i32, yes: bool) -> Result<()> {
    let (name, appointment_count) = match session.services.customers.by_id(id) {
        Some(customer) => (
            customer.name.clone(),
            session.services.appointments.by_customer(id).len(),
        ),
        None => return Err(anyhow!("No customer with ID {}", id)),
    };

    let question = format!(
        "Delete {} and their {} appointment(s)?",
        name, appointment_count
    );
    if !confirm(&question, yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let removed = session
        .services
        .delete_customer(id)
        .await?
        .ok_or_else(|| anyhow!("Customer {} was not deleted", id))?;

    output::emit(session.json, &removed, || {
        println!(
            "Customer {} deleted along with {} appointment(s)",
            removed.name, appointment_count
        );
    })
}
