//! oxide-table CLI
//!
//! Command-line access to a SQLite database through the table builders.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_table_sqlite::prelude::*;
use oxide_table_sqlite::DEFAULT_DATABASE_URL;

/// Passphrase used by `demo` when none is configured.
const DEMO_PASSPHRASE: &str = "lorem-ipsum";

/// Table-scoped queries and guarded schema changes for SQLite.
#[derive(Parser)]
#[command(name = "oxide-table")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL.
    #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database: String,

    /// Administrative passphrase for create and drop.
    #[arg(short, long, env = "OXIDE_TABLE_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables.
    Tables,

    /// Show the columns of a table.
    Describe {
        /// Table name.
        table: String,
    },

    /// Create a table from `name:type` column definitions.
    Create {
        /// Table name.
        table: String,

        /// Column definitions, e.g. `id:"INTEGER PRIMARY KEY"` `name:TEXT`.
        #[arg(required = true)]
        columns: Vec<String>,
    },

    /// Drop a table.
    Drop {
        /// Table name.
        table: String,
    },

    /// Select rows as JSON.
    Select {
        /// Table name.
        table: String,

        /// Columns to select (all if not specified).
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// WHERE condition with `?` placeholders.
        #[arg(short = 'w', long = "where")]
        condition: Option<String>,

        /// Parameter bound to the next `?` of the condition.
        #[arg(long = "param", requires = "condition")]
        params: Vec<String>,
    },

    /// Run the fruit walkthrough against the database.
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = DatabaseConfig::new(&cli.database);
    config.passphrase.clone_from(&cli.passphrase);
    let mut db = Database::connect(&config).await?;

    match cli.command {
        Commands::Tables => {
            for name in db.table_names() {
                println!("{name}");
            }
        }

        Commands::Describe { table } => {
            let columns = db.table_info(&table).await?;
            println!("{:<4} {:<20} {:<20} {:<8} {:<4} DEFAULT", "CID", "NAME", "TYPE", "NOTNULL", "PK");
            println!("{:-<70}", "");
            for column in &columns {
                println!(
                    "{:<4} {:<20} {:<20} {:<8} {:<4} {}",
                    column.position,
                    column.name,
                    column.declared_type,
                    column.not_null,
                    column.primary_key,
                    column.default_value.as_deref().unwrap_or("")
                );
            }
        }

        Commands::Create { table, columns } => {
            let secret = required_secret(cli.passphrase.as_deref())?;
            let definitions = columns
                .iter()
                .map(String::as_str)
                .map(parse_column_definition)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let created = db.create_table(&table, definitions, secret).await?;
            print_json(&created)?;
        }

        Commands::Drop { table } => {
            let secret = required_secret(cli.passphrase.as_deref())?;
            let dropped = db.drop_table(&table, secret).await?;
            print_json(&dropped)?;
        }

        Commands::Select {
            table,
            columns,
            condition,
            params,
        } => {
            let handle = db.table(&table)?;
            let retrieve = handle.retrieve(columns)?;
            let rows = match condition {
                Some(condition) => {
                    let params: Vec<SqlValue> = params.iter().map(String::as_str).map(parse_param).collect();
                    retrieve.filter(&condition, params).execute().await?
                }
                None => retrieve.execute().await?,
            };
            print_json(&rows)?;
        }

        Commands::Demo => {
            if cli.passphrase.is_none() {
                db.set_passphrase(DEMO_PASSPHRASE)?;
            }
            let secret = cli.passphrase.as_deref().unwrap_or(DEMO_PASSPHRASE);
            run_demo(&mut db, secret).await?;
        }
    }

    db.close().await?;
    Ok(())
}

fn required_secret(passphrase: Option<&str>) -> anyhow::Result<&str> {
    passphrase.context("--passphrase or OXIDE_TABLE_PASSPHRASE is required")
}

/// Splits `name:type`; the type part may be empty.
fn parse_column_definition(definition: &str) -> anyhow::Result<(String, String)> {
    let (name, ty) = definition.split_once(':').unwrap_or((definition, ""));
    let name = name.trim();
    if name.is_empty() {
        bail!("column definition `{definition}` has no name");
    }
    Ok((name.to_string(), ty.trim().to_string()))
}

/// Reads `null`, integers and floats as such; everything else is text.
fn parse_param(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        SqlValue::Null
    } else if let Ok(int) = raw.parse::<i64>() {
        SqlValue::Int(int)
    } else if let Ok(float) = raw.parse::<f64>() {
        SqlValue::Float(float)
    } else {
        SqlValue::Text(raw.to_string())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_demo(db: &mut Database, secret: &str) -> anyhow::Result<()> {
    const TABLE: &str = "tbl_fruit";

    let exists = db.table_exists(TABLE).await?;
    info!(table = TABLE, exists, "Checked table");
    if exists {
        let dropped = db.drop_table(TABLE, secret).await?;
        info!(table = TABLE, dropped, "Dropped previous table");
    }

    let created = db
        .create_table(
            TABLE,
            [
                ("id", "INTEGER PRIMARY KEY"),
                ("name", "TEXT"),
                ("price", "INTEGER"),
                ("stock", "INTEGER"),
            ],
            secret,
        )
        .await?;
    info!(table = TABLE, created, "Created table");

    let fruit = db.table(TABLE)?;
    print_json(&fruit.retrieve_all().execute().await?)?;

    let inserted = fruit
        .insert([(None::<i64>, "apple", 500, 5), (None, "banana", 400, 150)])?
        .execute()
        .await?;
    info!(inserted, "Inserted fruits");
    print_json(&fruit.retrieve_all().execute().await?)?;

    info!("Fruits running out");
    print_json(&fruit.retrieve_all().filter("stock < ?", (50,)).execute().await?)?;

    let restocked = fruit
        .assign_one("stock", 105)?
        .filter("name = ?", ("apple",))
        .execute()
        .await?;
    info!(restocked, "Renewed apple stock");
    print_json(&fruit.retrieve_all().execute().await?)?;

    let repriced = fruit.assign_one("price", 100)?.execute().await?;
    info!(repriced, "Lowered every price");
    print_json(&fruit.retrieve_all().execute().await?)?;

    if !db.table_exists(TABLE).await? {
        bail!("{TABLE} disappeared during the demo");
    }
    Ok(())
}
