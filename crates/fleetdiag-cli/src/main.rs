mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{audit, completions, counts, types, users, vehicles, Context};
use crate::error::{exit_code_for, report_error};
use fleetdiag_config as config;
use fleetdiag_store::{paths, Access, Store};

#[derive(Debug, Parser)]
#[command(name = "fleetdiag", version, about = "Vehicle-rental backend diagnostics")]
struct Cli {
    #[arg(long, global = true, env = "FLEETDIAG_DB_PATH")]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map vehicle type strings onto their canonical category
    Normalize(types::NormalizeArgs),
    /// Check whether vehicle type strings are recognized
    Validate(types::ValidateArgs),
    /// Row counts per collection
    Counts(counts::CountsArgs),
    /// Look up a user and their recent bookings
    User(users::UserArgs),
    /// Look up a vehicle by id
    Vehicle(vehicles::VehicleArgs),
    /// Report vehicle type drift across collections and bookings
    Audit(audit::AuditArgs),
    /// Insert a vehicle into the collection its type maps to
    #[command(name = "add-vehicle")]
    AddVehicle(vehicles::AddVehicleArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

struct Globals {
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;
    let globals = Globals {
        db_path,
        config_path,
        json,
        verbose,
    };

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Validate(args) => types::validate(json, args),
        Command::Normalize(args) => {
            let app_config = load_config(&globals)?;
            types::normalize(json, &app_config, args)
        }
        Command::Counts(args) => {
            with_store(&globals, Access::ReadOnly, |ctx| counts::counts(ctx, args))
        }
        Command::User(args) => {
            with_store(&globals, Access::ReadOnly, |ctx| users::show_user(ctx, args))
        }
        Command::Vehicle(args) => with_store(&globals, Access::ReadOnly, |ctx| {
            vehicles::show_vehicle(ctx, args)
        }),
        Command::Audit(args) => {
            with_store(&globals, Access::ReadOnly, |ctx| audit::audit(ctx, args))
        }
        Command::AddVehicle(args) => with_store(&globals, Access::ReadWrite, |ctx| {
            vehicles::add_vehicle(ctx, args)
        }),
    }
}

fn load_config(globals: &Globals) -> Result<config::AppConfig> {
    let app_config = config::load(globals.config_path.clone()).with_context(|| "load config")?;
    if globals.verbose {
        match config::resolve_config_path(globals.config_path.clone()) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }
    Ok(app_config)
}

fn with_store<F>(globals: &Globals, access: Access, f: F) -> Result<()>
where
    F: FnOnce(&Context<'_>) -> Result<()>,
{
    let app_config = load_config(globals)?;
    let db_path = paths::resolve_db_path(
        globals
            .db_path
            .clone()
            .or_else(|| app_config.database_path.clone()),
    )
    .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), ?access, "opening database");

    let store = Store::open(&db_path, access)
        .with_context(|| format!("open database {}", db_path.display()))?;
    let ctx = Context {
        store: &store,
        json: globals.json,
        config: &app_config,
    };
    f(&ctx)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
