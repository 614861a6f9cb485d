//! qail-oracle: Oracle dialect inspector
//!
//! Shows what the Oracle dialect makes of a query or table description.
//!
//! # Usage
//!
//! ```bash
//! # Compile a query document
//! qail-oracle compile query.toml
//!
//! # DDL for a table document
//! qail-oracle ddl articles.toml --constraints
//!
//! # Aliases for over-length identifiers
//! qail-oracle shorten Articles__a_really_long_field_name
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use qail_oracle::prelude::*;
use tracing::Level;

#[derive(Parser)]
#[command(name = "qail-oracle")]
#[command(version)]
#[command(about = "Oracle dialect inspector for QAIL queries", long_about = None)]
#[command(after_help = "EXAMPLES:
    qail-oracle compile page.toml
    qail-oracle compile page.toml --format json
    qail-oracle ddl articles.toml --constraints
    qail-oracle shorten Articles__a_really_long_field_name")]
struct Cli {
    /// Config file (defaults to qail-oracle.toml, then the user config dir)
    #[arg(short, long, env = "QAIL_ORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a TOML query document to Oracle SQL
    Compile {
        /// Query document
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "sql")]
        format: OutputFormat,
    },
    /// Generate DDL for a TOML table document
    Ddl {
        /// Table document
        file: PathBuf,

        /// Also print ALTER TABLE statements for foreign keys
        #[arg(long)]
        constraints: bool,

        /// Print TRUNCATE TABLE instead of CREATE TABLE
        #[arg(long)]
        truncate: bool,
    },
    /// Show the aliases generated for identifiers
    Shorten {
        /// Identifiers to shorten
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
    /// Print the PL/SQL block toggling foreign keys
    ForeignKeys {
        /// Enable instead of disable
        #[arg(long)]
        enable: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => OracleConfig::load(path)?,
        None => OracleConfig::load_default()?,
    };
    let dialect = OracleDialect::from_config(&config);

    match &cli.command {
        Commands::Compile { file, format } => compile_query(&dialect, file, *format),
        Commands::Ddl {
            file,
            constraints,
            truncate,
        } => generate_ddl(&dialect, file, *constraints, *truncate),
        Commands::Shorten { identifiers } => {
            shorten_identifiers(&dialect, identifiers);
            Ok(())
        }
        Commands::ForeignKeys { enable } => {
            let sql = if *enable {
                dialect.enable_foreign_keys_sql()
            } else {
                dialect.disable_foreign_keys_sql()
            };
            println!("{}", sql);
            Ok(())
        }
    }
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid document {}", path.display()))
}

fn compile_query(dialect: &OracleDialect, file: &Path, format: OutputFormat) -> Result<()> {
    let mut query: Query = read_document(file)?;
    let compiled = dialect.compile(&mut query)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        }
        OutputFormat::Sql => {
            println!("{}", "Generated SQL:".green().bold());
            println!("{}", OracleDialect::from_dualify(&compiled.sql).white());

            if !compiled.bindings.is_empty() {
                println!();
                println!("{}", "Bindings:".cyan());
                for binding in &compiled.bindings {
                    println!("  {} = {}", binding.key, binding.value.to_string().yellow());
                }
            }
            print_aliases(dialect);
        }
    }
    Ok(())
}

fn generate_ddl(dialect: &OracleDialect, file: &Path, constraints: bool, truncate: bool) -> Result<()> {
    let table: TableSchema = read_document(file)?;
    let schema = OracleSchema::new(dialect);

    let statements = if truncate {
        schema.truncate_table_sql(&table)
    } else {
        schema.create_table_sql(&table)?
    };
    for sql in statements {
        println!("{};", sql.white());
    }

    if constraints {
        println!();
        for sql in schema.add_constraint_sql(&table)? {
            println!("{}", sql);
        }
    }
    print_aliases(dialect);
    Ok(())
}

fn shorten_identifiers(dialect: &OracleDialect, identifiers: &[String]) {
    for identifier in identifiers {
        let short = dialect.shorten(identifier);
        if short == *identifier {
            println!("  {} {}", "=".dimmed(), identifier);
        } else {
            println!("  {} {} {}", short.green(), "←".dimmed(), identifier);
        }
    }
}

fn print_aliases(dialect: &OracleDialect) {
    let Ok(table) = dialect.shortener().read() else {
        return;
    };
    if table.is_empty() {
        return;
    }
    println!();
    println!("{}", "Shortened identifiers:".cyan());
    for (alias, original) in table.aliases() {
        println!("  {} {} {}", alias.green(), "←".dimmed(), original);
    }
}
