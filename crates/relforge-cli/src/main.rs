use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use relforge_config::FileFormat;

mod commands;
mod logging;
mod utils;
use commands::{cmd_crud, cmd_init, cmd_model, cmd_relations, cmd_schema};

/// relforge command-line interface.
#[derive(Parser, Debug)]
#[command(name = "relforge", author, version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize relforge.json with defaults and create the schema directory.
    Init {
        /// Format for table files written into the schema directory.
        #[arg(long, value_enum, default_value = "json")]
        format: FileFormat,
    },
    /// Show the relations inferred from the schema snapshot.
    Relations {
        /// Table patterns to show (`*` globs). Defaults to the configured tables.
        tables: Vec<String>,
        /// Print the relation map as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate base models, user models and query builders.
    Model {
        /// Table patterns to generate (`*` globs). Defaults to the configured tables.
        tables: Vec<String>,
        /// Also overwrite user-owned model files.
        #[arg(long)]
        force: bool,
    },
    /// Generate a CRUD controller scaffold for one table.
    Crud {
        table: String,
        /// Overwrite an existing controller.
        #[arg(long)]
        force: bool,
    },
    /// Write JSON Schemas for relforge.json and table files.
    Schema {
        /// Output directory for schema files.
        #[arg(short = 'o', long = "out", default_value = "schemas")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(logging::log_level(cli.verbose));
    match cli.command {
        Commands::Init { format } => cmd_init(format),
        Commands::Relations { tables, json } => cmd_relations(tables, json),
        Commands::Model { tables, force } => cmd_model(tables, force),
        Commands::Crud { table, force } => cmd_crud(table, force),
        Commands::Schema { out } => cmd_schema(out),
    }
}
