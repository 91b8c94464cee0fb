//! `catalog` — command-line front end for the category catalog.
//!
//! Every run starts from an empty in-memory gateway; nothing is persisted
//! between runs. Results are printed to stdout as JSON, logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! catalog create --name Filmes --description "A categoria mais assistida"
//! catalog validate --name "  "
//! catalog import categories.json --terms film --sort created_at --direction desc
//! ```

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::Context as _;
use catalog_app::{
  create::{CreateCategoryCommand, create_category},
  memory::InMemoryCategoryGateway,
  retrieve::{CategoryListOutput, get_category, list_categories},
};
use catalog_core::{
  category::Category,
  gateway::{CategorySearchQuery, CategorySort, Pagination, SortDirection},
  validation::{Notification, ValidationHandler},
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Category catalog tool")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "catalog.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create a category and print it.
  Create {
    #[arg(long)]
    name:        Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Create the category soft-deleted.
    #[arg(long)]
    inactive:    bool,
  },
  /// Check a category name without creating anything.
  Validate {
    #[arg(long)]
    name: Option<String>,
  },
  /// Create every category in a JSON array file, then print a page of them.
  Import {
    file:   PathBuf,
    #[command(flatten)]
    search: SearchArgs,
  },
}

#[derive(Args)]
struct SearchArgs {
  /// Case-insensitive filter over name and description.
  #[arg(long, default_value = "")]
  terms:     String,
  #[arg(long, default_value_t = CategorySort::Name)]
  sort:      CategorySort,
  #[arg(long, default_value_t = SortDirection::Asc)]
  direction: SortDirection,
  /// Zero-based page index.
  #[arg(long, default_value_t = 0)]
  page:      u32,
  /// Page size; defaults to `default_per_page` from the config.
  #[arg(long)]
  per_page:  Option<u32>,
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, read from the config file and `CATALOG_*`
/// environment variables.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct CliConfig {
  default_per_page: u32,
  /// Pretty-print JSON output.
  pretty:           bool,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      default_per_page: CategorySearchQuery::default().per_page,
      pretty:           true,
    }
  }
}

fn load_config(path: &Path) -> anyhow::Result<CliConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("CATALOG"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise CliConfig")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let config = load_config(&cli.config)?;
  tracing::debug!(?config, "loaded configuration");

  match cli.command {
    Command::Create {
      name,
      description,
      inactive,
    } => create(&config, name, description, !inactive),
    Command::Validate { name } => validate(&config, name),
    Command::Import { file, search } => import(&config, &file, &search),
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn create(
  config: &CliConfig,
  name: Option<String>,
  description: Option<String>,
  is_active: bool,
) -> anyhow::Result<ExitCode> {
  let gateway = InMemoryCategoryGateway::new();
  let command = CreateCategoryCommand {
    name,
    description,
    is_active,
  };

  match create_category(&gateway, command) {
    Ok(output) => {
      let category = get_category(&gateway, output.id)?;
      print_json(config, &category)?;
      Ok(ExitCode::SUCCESS)
    }
    Err(notification) => {
      print_json(config, &notification)?;
      Ok(ExitCode::FAILURE)
    }
  }
}

fn validate(
  config: &CliConfig,
  name: Option<String>,
) -> anyhow::Result<ExitCode> {
  let category = Category::new(name, None, true);
  let mut notification = Notification::create();
  category.validate(&mut notification)?;

  print_json(config, &notification)?;
  Ok(if notification.has_error() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  })
}

/// A record from the import file that failed validation.
#[derive(Serialize)]
struct Rejected {
  /// Zero-based position in the import file.
  index:  usize,
  errors: Notification,
}

#[derive(Serialize)]
struct ImportReport {
  created:  usize,
  rejected: Vec<Rejected>,
  page:     Pagination<CategoryListOutput>,
}

fn import(
  config: &CliConfig,
  file: &Path,
  search: &SearchArgs,
) -> anyhow::Result<ExitCode> {
  let raw = std::fs::read_to_string(file)
    .with_context(|| format!("reading import file {}", file.display()))?;
  let commands: Vec<CreateCategoryCommand> = serde_json::from_str(&raw)
    .with_context(|| format!("parsing import file {}", file.display()))?;

  let gateway = InMemoryCategoryGateway::new();
  let mut rejected = Vec::new();
  for (index, command) in commands.into_iter().enumerate() {
    if let Err(errors) = create_category(&gateway, command) {
      tracing::warn!(index, %errors, "skipping invalid record");
      rejected.push(Rejected { index, errors });
    }
  }
  tracing::info!(
    created = gateway.len(),
    rejected = rejected.len(),
    "import finished"
  );

  let query = CategorySearchQuery {
    page:      search.page,
    per_page:  search.per_page.unwrap_or(config.default_per_page),
    terms:     search.terms.clone(),
    sort:      search.sort,
    direction: search.direction,
  };
  let page = list_categories(&gateway, &query)?;

  let report = ImportReport {
    created: gateway.len(),
    rejected,
    page,
  };
  print_json(config, &report)?;

  Ok(if report.rejected.is_empty() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}

fn print_json(
  config: &CliConfig,
  value: &impl Serialize,
) -> anyhow::Result<()> {
  let out = if config.pretty {
    serde_json::to_string_pretty(value)?
  } else {
    serde_json::to_string(value)?
  };
  println!("{out}");
  Ok(())
}
