use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use scheduler_core::SchedulerConfig;
use serde_json::json;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the default settings
    Init(InitArgs),
    /// Show config file path
    Path,
    /// Show the effective config and the resolved display zone
    Show,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, json: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Path => {
            println!("{}", SchedulerConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show => run_show(&SchedulerConfig::load()?, json),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = SchedulerConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    let written = SchedulerConfig::default()
        .save()
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {}", written.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", written.display());
    println!("  2. Set [display] timezone if the machine zone is not the one you want");
    println!("  3. Run: scheduler config show");

    Ok(())
}

fn run_show(settings: &SchedulerConfig, json: bool) -> Result<()> {
    let zone = settings.display_zone()?;

    if json {
        let value = json!({
            "path": SchedulerConfig::config_path(),
            "config": settings,
            "display_zone": zone.name(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let toml_str = toml::to_string_pretty(settings).context("Failed to serialize config to TOML")?;
    println!("# {}", SchedulerConfig::config_path().display());
    println!("{}", toml_str.trim_end());
    println!("\n# display zone in effect: {}", zone);
    Ok(())
}
