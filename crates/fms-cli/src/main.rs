//! `fms`: command-line front end for the case-file register.
//!
//! # Usage
//!
//! ```
//! fms save put-away -f "Original REF NO=GEF 1002/2016" -f Offence=Theft
//! fms update put-away -f "Original REF NO=GEF 1002/2016" -f Status=Closed
//! fms query sent-to-dpp --from 01-01-2024 --to 28-02-2024
//! fms --json search court-going Mwangi
//! ```

mod args;
mod render;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use args::{Assignment, Window, assignments_to_record, confirm};
use clap::{Parser, Subcommand};
use fms_core::{
  category::{Category, Register},
  query::DateQuery,
  store::RecordStore,
};
use fms_store_sqlite::{Error as StoreError, SqliteStore};
use serde::Deserialize;
use strum::IntoEnumIterator as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fms", version, about = "Case-file register")]
struct Cli {
  /// Path to a TOML config file (default: `fms.toml` if present).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// SQLite database file; overrides the config file and `FMS_DATABASE`.
  #[arg(long, value_name = "FILE", global = true)]
  database: Option<PathBuf>,

  /// Print JSON instead of tables.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a new record.
  Save {
    category: Category,
    /// `FIELD=VALUE`; repeat for every field to set.
    #[arg(short = 'f', long = "field", value_name = "FIELD=VALUE")]
    fields:   Vec<Assignment>,
  },
  /// Change fields of an existing record, identified by its key field.
  Update {
    category: Category,
    /// `FIELD=VALUE`; must include the key field.
    #[arg(short = 'f', long = "field", value_name = "FIELD=VALUE")]
    fields:   Vec<Assignment>,
  },
  /// Show one record by key.
  Find { category: Category, key: String },
  /// Remove one record by key.
  Delete {
    category: Category,
    key:      String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes:      bool,
  },
  /// Rows whose complainant contains TEXT (case-sensitive).
  Search { category: Category, text: Option<String> },
  /// Every row of a category.
  List { category: Category },
  /// Date-filtered view of a register; defaults to the last 30 days.
  Query {
    register: Register,
    /// Date field to filter on instead of the register's default.
    #[arg(long, value_name = "FIELD")]
    field:    Option<String>,
    #[command(flatten)]
    window:   Window,
  },
  /// Print the table definitions.
  Schema { category: Option<Category> },
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Values read from `fms.toml` and `FMS_*` environment variables.
#[derive(Debug, Deserialize)]
struct Settings {
  database: PathBuf,
}

impl Settings {
  fn load(path: Option<&PathBuf>) -> Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path.as_path()).required(true),
      None => config::File::with_name("fms").required(false),
    };
    config::Config::builder()
      .set_default("database", "fms.db")?
      .add_source(file)
      .add_source(config::Environment::with_prefix("FMS"))
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if let Command::Schema { category } = cli.command {
    print_schema(category);
    return Ok(());
  }

  let settings = Settings::load(cli.config.as_ref())?;
  let database = cli.database.clone().unwrap_or(settings.database);
  tracing::debug!(?database, "opening store");

  let store = SqliteStore::open(&database)
    .with_context(|| format!("failed to open store at {database:?}"))?;

  run(&store, cli.command, cli.json)
}

fn print_schema(category: Option<Category>) {
  for category in Category::iter().filter(|c| category.is_none_or(|only| only == *c)) {
    println!("-- {}\n{};\n", category.title(), category.schema().create_table_sql());
  }
}

fn run(store: &SqliteStore, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Save { category, fields } => {
      let record = assignments_to_record(fields);
      let key = store.save(category, &record).map_err(explain)?;
      println!("saved {key}");
    }

    Command::Update { category, fields } => {
      let changes = assignments_to_record(fields);
      let key = store.update(category, &changes).map_err(explain)?;
      println!("updated {key}");
    }

    Command::Find { category, key } => {
      let record = store
        .find_by_key(category, &key)
        .map_err(explain)?
        .ok_or_else(|| {
          explain(StoreError::NotFound { table: category.schema().table_name, key })
        })?;
      if json {
        render::json(&record)?;
      } else {
        print!("{}", render::record(category.schema(), &record));
      }
    }

    Command::Delete { category, key, yes } => {
      if !yes && !confirm(&format!("Delete {key} from {}?", category.title()))? {
        println!("cancelled");
        return Ok(());
      }
      store.delete(category, &key).map_err(explain)?;
      println!("deleted {key}");
    }

    Command::Search { category, text } => {
      let results = store.search(category, text.as_deref()).map_err(explain)?;
      render::results(&results, None, json)?;
    }

    Command::List { category } => {
      let results = store.list_all(category).map_err(explain)?;
      render::results(&results, None, json)?;
    }

    Command::Query { register, field, window } => {
      let filter = window.into_filter(chrono::Local::now().date_naive())?;
      let mut query = DateQuery::new(register, filter);
      if let Some(field) = field {
        query = query.on_field(field);
      }

      let outcome = store.query(&query).map_err(explain)?;
      if json {
        render::json(&outcome)?;
      } else {
        render::results(&outcome.results, Some(&query.summary(outcome.count)), false)?;
      }
    }

    Command::Schema { category } => print_schema(category),
  }

  Ok(())
}

/// Attach a message naming the kind of failure.
fn explain(err: StoreError) -> anyhow::Error {
  let message = match &err {
    StoreError::Core(_) => "invalid input",
    StoreError::DuplicateKey { .. } => "this record already exists",
    StoreError::NotFound { .. } => "this reference is not in records",
    StoreError::Persistence(_) => "could not write to the database",
    StoreError::Query(_) => "could not read from the database",
  };
  anyhow::Error::new(err).context(message)
}
