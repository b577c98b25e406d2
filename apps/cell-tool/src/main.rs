//! CLI tool for table management.
//!
//! Provides commands for:
//! - Listing, creating and dropping tables under a data directory
//! - Checking whether a table exists
//! - Running an in-memory smoke session against the cell store

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cell_store_core::persistence::MemoryMarkerStore;
use cell_store_core::{Cell, DbConfig, TableRegistry};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the cell tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory (overrides the configuration file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    #[command(flatten)]
    Admin(AdminCommand),
    /// Exercise the cell store in memory, leaving the data directory untouched
    Smoke,
}

/// Commands that operate on the tables of the data directory.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum AdminCommand {
    /// List all tables
    List,
    /// Create a table
    Create { name: String },
    /// Drop a table and its marker
    Drop { name: String },
    /// Check whether a table exists
    Exists { name: String },
}

fn load_config(args: &Args) -> Result<DbConfig> {
    let mut config = match &args.config {
        Some(path) => DbConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DbConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

/// Runs a fixed sequence of table operations and returns the printed lines.
fn smoke() -> Result<Vec<String>> {
    let registry = TableRegistry::with_store(Arc::new(MemoryMarkerStore::new()))?;
    let mut lines = Vec::new();

    registry.create_table("users")?;
    let users = registry.open_table("users")?;
    users.insert(Cell::new("u1", "name", "Alice"));
    users.insert(Cell::new("u1", "age", "30"));

    for cell in users.get_row(b"u1") {
        lines.push(format!(
            "u1/{} = {}",
            String::from_utf8_lossy(cell.column()),
            String::from_utf8_lossy(cell.payload())
        ));
    }

    let deleted = users.delete(b"u1", b"age");
    lines.push(format!("delete u1/age: {}", deleted));
    let removed = users.delete_row(b"u1");
    lines.push(format!("delete row u1: {} cells", removed));

    let report = registry.close();
    lines.push(format!("closed {} tables", report.closed));
    Ok(lines)
}

/// Runs a table management command against the configured data directory.
fn run_admin(config: &DbConfig, command: &AdminCommand) -> Result<()> {
    let registry = TableRegistry::open(config).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.data_dir.display()
        )
    })?;

    let result = match command {
        AdminCommand::List => {
            for name in registry.list_tables() {
                println!("{}", name);
            }
            Ok(())
        }
        AdminCommand::Create { name } => registry
            .create_table(name)
            .map(|()| println!("created {}", name)),
        AdminCommand::Drop { name } => registry
            .delete_table(name)
            .map(|()| println!("dropped {}", name)),
        AdminCommand::Exists { name } => {
            println!("{}", registry.table_exists(name));
            Ok(())
        }
    };

    let report = registry.close();
    if !report.is_clean() {
        tracing::warn!("{} tables failed to close", report.failures.len());
    }
    Ok(result?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Smoke => {
            for line in smoke()? {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Admin(command) => {
            let config = load_config(&args)?;
            run_admin(&config, command)
        }
    }
}
