//! scheduler CLI - customer and appointment scheduling against MySQL
//!
//! Entry point for the `scheduler` command-line tool, which provides:
//! - Login with an activity log and an upcoming-appointment alert (`login`)
//! - Customer and appointment records (`customers`, `appointments`)
//! - Month/type, contact and customer schedule reports (`reports`)
//! - Reference lookups (`contacts`, `users`, `countries`, `divisions`)
//! - Schema bootstrap (`db init`) and config management (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand};
use scheduler_core::SchedulerConfig;

mod commands;
mod config;
mod forms;
mod output;
mod session;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "scheduler",
    author,
    version,
    about = "Schedule customer appointments against the client_schedule database",
    long_about = "Manage customers and appointments with business-hours and overlap checks. \
                  Times are shown in the display zone (SCHEDULER_TIMEZONE, [display] timezone, \
                  TZ, or UTC)."
)]
struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Login name (prompted when omitted)
    #[arg(long, short = 'u', global = true, env = "SCHEDULER_USERNAME")]
    username: Option<String>,

    /// Login password (prompted when omitted)
    #[arg(long, global = true, env = "SCHEDULER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and show appointments starting soon
    Login,
    /// List, add, update and delete customers
    Customers(commands::customers::CustomersArgs),
    /// List, add, update and delete appointments
    Appointments(commands::appointments::AppointmentsArgs),
    /// Month/type totals and contact or customer schedules
    Reports(commands::reports::ReportsArgs),
    /// List contacts
    Contacts,
    /// List user accounts
    Users,
    /// List countries
    Countries,
    /// List first-level divisions
    Divisions(commands::lookups::DivisionsArgs),
    /// Database schema bootstrap
    Db(commands::db::DbArgs),
    /// Manage scheduler configuration (init, path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let json = cli.json;

    // `config` must keep working when the file itself is broken; `config show`
    // loads it on its own.
    let settings = match cli.command {
        Commands::Config(_) => SchedulerConfig::default(),
        _ => SchedulerConfig::load()?,
    };
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        level: settings.logging.level.clone(),
    })
    .ok();

    let login = session::LoginArgs {
        username: cli.username,
        password: cli.password,
    };

    match cli.command {
        Commands::Config(args) => config::run_config(args, json)?,
        Commands::Db(args) => commands::run_db(args).await?,
        Commands::Login => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::run_login(&session)?;
        }
        Commands::Customers(args) => {
            let mut session = session::Session::open(&settings, login, json).await?;
            commands::run_customers(&mut session, args).await?;
        }
        Commands::Appointments(args) => {
            let mut session = session::Session::open(&settings, login, json).await?;
            commands::run_appointments(&mut session, args).await?;
        }
        Commands::Reports(args) => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::run_reports(&session, args)?;
        }
        Commands::Contacts => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::lookups::run_contacts(&session)?;
        }
        Commands::Users => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::lookups::run_users(&session)?;
        }
        Commands::Countries => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::lookups::run_countries(&session)?;
        }
        Commands::Divisions(args) => {
            let session = session::Session::open(&settings, login, json).await?;
            commands::lookups::run_divisions(&session, args)?;
        }
    }
    Ok(())
}
