use crate::{commands::Commands, error::CliError};
use clap::Parser;
use ddl_render::{
    DialectKind, GenerationOptions, generate_alter_table, try_generate_batch, try_generate_single,
};
use ddl_syntax::{parse_batch, parse_single, successful_tables};
use model::schema::table::Table;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{Level, info};

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "ddl", version = "0.1.0", about = "CREATE TABLE parser and SQL generator")]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// A JSON model file holds either one table or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelInput {
    Many(Vec<Table>),
    One(Box<Table>),
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Logs go to stderr so generated SQL on stdout stays clean
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            file,
            batch,
            output,
        } => {
            let source = std::fs::read_to_string(&file)?;
            let json = if batch {
                output::to_json(&output::batch_report(parse_batch(&source)))?
            } else {
                output::to_json(&parse_single(&source)?)?
            };
            output::emit(&json, output)?;
        }
        Commands::Generate {
            file,
            from_ddl,
            dialect,
            options,
            output,
        } => {
            let options = load_options(options.as_deref(), dialect.as_deref())?;
            let sql = match load_model(&file, from_ddl)? {
                ModelInput::One(table) => try_generate_single(&table, &options)?,
                ModelInput::Many(tables) => {
                    info!("Generating {} SQL for {} tables", options.dialect, tables.len());
                    try_generate_batch(&tables, &options)?
                }
            };
            output::emit(&sql, output)?;
        }
        Commands::Diff {
            old,
            new,
            from_ddl,
            dialect,
            options,
        } => {
            let options = load_options(options.as_deref(), dialect.as_deref())?;
            let old = load_table(&old, from_ddl)?;
            let new = load_table(&new, from_ddl)?;
            new.validate()?;

            let sql = generate_alter_table(&old, &new, &options);
            if sql.is_empty() {
                info!("Tables '{}' and '{}' have the same fields", old.name, new.name);
            } else {
                println!("{sql}");
            }
        }
    }

    Ok(())
}

/// Options from the JSON file when given, then the dialect flag on top.
fn load_options(path: Option<&str>, dialect: Option<&str>) -> Result<GenerationOptions, CliError> {
    let mut options = match path {
        Some(path) => GenerationOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => GenerationOptions::default(),
    };
    if let Some(dialect) = dialect {
        options.dialect = DialectKind::from_str(dialect)?;
    }
    Ok(options)
}

fn load_model(path: &str, from_ddl: bool) -> Result<ModelInput, CliError> {
    let source = std::fs::read_to_string(path)?;
    if from_ddl {
        // Statements that fail are logged by the parser and left out
        let mut tables = successful_tables(parse_batch(&source))?;
        if tables.len() == 1 {
            if let Some(table) = tables.pop() {
                return Ok(ModelInput::One(Box::new(table)));
            }
        }
        Ok(ModelInput::Many(tables))
    } else {
        Ok(serde_json::from_str(&source)?)
    }
}

fn load_table(path: &str, from_ddl: bool) -> Result<Table, CliError> {
    let source = std::fs::read_to_string(path)?;
    if from_ddl {
        Ok(parse_single(&source)?)
    } else {
        Ok(serde_json::from_str(&source)?)
    }
}
