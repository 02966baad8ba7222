//! `scheduler db` - schema bootstrap for a fresh client_schedule database

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scheduler_store::{connect, schema, DbCredentials};

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Create any missing tables
    Init {
        /// Also insert reference rows (countries, divisions, contacts, a test login)
        /// when the database is empty
        #[arg(long)]
        seed: bool,
    },
}

pub async fn run_db(args: DbArgs) -> Result<()> {
    match args.command {
        DbCommand::Init { seed } => {
            let credentials = DbCredentials::from_env()
                .context("Database credentials missing; set MYSQL_SCHEDULER_DB_PORT/USERNAME/PASSWORD")?;
            let pool = connect(&credentials)
                .await
                .context("Failed to connect to client_schedule")?;

            schema::run(&pool).await.context("Failed to create tables")?;
            println!("Schema ready");

            if seed {
                if schema::seed(&pool).await.context("Failed to seed reference data")? {
                    println!("Reference data inserted");
                } else {
                    println!("Reference data already present, nothing inserted");
                }
            }
            Ok(())
        }
    }
}
