//! trackboard: record-tracking dashboard
//!
//! Browse, filter, sort, delete and export tracking records from a REST table
//! or a local JSON file.

#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use trackboard::{
    cli::{self, DashboardConfig, DeleteConfig, ExportCommandConfig, ListConfig, ListFormat},
    config::{AppConfig, Validatable, CONFIG_FILE_NAMES},
    model::{normalize_status, parse_date_bound, RecordId},
    pipeline::{
        exit_codes, DateDimension, FilterDimension, FilterState, SortDirection, SortKey, SortState,
    },
    reports::ReportFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trackboard")]
#[command(version)]
#[command(about = "Record-tracking dashboard: filter, sort, page and export work items", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred
    2  Records could not be loaded (an empty set was shown)
    3  Delete cancelled at the confirmation prompt

EXAMPLES:
    # Open the interactive dashboard against the configured REST table
    trackboard dashboard

    # Work from a local export instead
    trackboard --source records.json list --status PENDING --sort due

    # PDF report of one owner's finished work in January
    trackboard export pdf --owner Ana --completed-from 2024-01-01 --completed-to 2024-01-31

    # Delete without prompting
    trackboard delete 42 --yes")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read records from a local JSON file instead of the REST store
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Base URL of the REST record store
    #[arg(long, global = true, env = "TRACKBOARD_URL")]
    url: Option<String>,

    /// API key sent with every store request
    #[arg(long, global = true, env = "TRACKBOARD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Session access token for the REST store
    #[arg(long, global = true, env = "TRACKBOARD_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Filter flags shared by `list`, `export` and `dashboard`
#[derive(Args, Default)]
struct FilterArgs {
    /// Only records owned by this person (repeatable)
    #[arg(long)]
    owner: Vec<String>,

    /// Only records from this department (repeatable)
    #[arg(long)]
    department: Vec<String>,

    /// Only records from this requester (repeatable)
    #[arg(long)]
    requester: Vec<String>,

    /// Only records with this status; raw codes and labels both work (repeatable)
    #[arg(long)]
    status: Vec<String>,

    /// Entry date lower bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    entry_from: Option<NaiveDate>,

    /// Entry date upper bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    entry_to: Option<NaiveDate>,

    /// Due date lower bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    due_from: Option<NaiveDate>,

    /// Due date upper bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    due_to: Option<NaiveDate>,

    /// Completion date lower bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    completed_from: Option<NaiveDate>,

    /// Completion date upper bound (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    completed_to: Option<NaiveDate>,
}

impl FilterArgs {
    fn into_filter(self) -> FilterState {
        let mut filter = FilterState::new();
        let sets = [
            (FilterDimension::Owner, self.owner),
            (FilterDimension::Department, self.department),
            (FilterDimension::Requester, self.requester),
        ];
        for (dimension, values) in sets {
            for value in values {
                filter.toggle(dimension, &value);
            }
        }
        for status in self.status {
            filter.toggle(FilterDimension::Status, &normalize_status(Some(&status)));
        }
        let ranges = [
            (DateDimension::Entry, self.entry_from, self.entry_to),
            (DateDimension::Due, self.due_from, self.due_to),
            (DateDimension::Completed, self.completed_from, self.completed_to),
        ];
        for (dimension, from, to) in ranges {
            let range = filter.range_mut(dimension);
            range.from = from;
            range.to = to;
        }
        filter
    }
}

/// Sort flags shared by `list`, `export` and `dashboard`
#[derive(Args, Default)]
struct SortArgs {
    /// Column to sort by
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,
}

impl SortArgs {
    fn into_sort(self) -> SortState {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort
            .map_or(SortState::NONE, |key| SortState::new(key, direction))
    }
}

/// Arguments for the `list` subcommand
#[derive(Parser)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    sort: SortArgs,

    /// Print only this page (1-based, 15 rows per page)
    #[arg(long)]
    page: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: ListFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `export` subcommand
#[derive(Parser)]
struct ExportArgs {
    /// Export format
    #[arg(value_enum, default_value = "pdf")]
    format: ReportFormat,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    sort: SortArgs,

    /// Output file path (configured export directory if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `delete` subcommand
#[derive(Parser)]
struct DeleteArgs {
    /// Identifier of the record to delete
    id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Arguments for the `dashboard` subcommand
#[derive(Parser)]
struct DashboardArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    sort: SortArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Dashboard(DashboardArgs),

    /// Print the filtered and sorted records
    List(ListArgs),

    /// Export the filtered records as PDF, xlsx, CSV or JSON
    Export(ExportArgs),

    /// Delete one record after confirmation
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .trackboard.yaml in the current directory
    Init,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_date_bound(raw).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Layer global flags over the discovered config file and validate the result.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut overrides = AppConfig::builder().source_file(cli.source.clone());
    if let Some(url) = &cli.url {
        overrides = overrides.store_url(url.as_str());
    }
    if let Some(key) = &cli.api_key {
        overrides = overrides.api_key(key.as_str());
    }
    let mut overrides = overrides.build();
    overrides.store.access_token.clone_from(&cli.access_token);

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
        anyhow::bail!("invalid configuration:\n{}", details.join("\n"));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Log lines would corrupt the alternate screen; the dashboard reports on its status line
    let log_level = if matches!(cli.command, Commands::Dashboard(_)) {
        "off"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "trackboard", &mut io::stdout());
            exit_codes::SUCCESS
        }

        Commands::ConfigSchema { output } => {
            let schema = trackboard::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            exit_codes::SUCCESS
        }

        Commands::Config { action } => run_config(&cli, action)?,

        _ => {
            let config = resolve_config(&cli)?;
            run_command(&config, cli)?
        }
    };

    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Dispatch the commands that talk to the record store.
fn run_command(config: &AppConfig, cli: Cli) -> Result<i32> {
    let Cli {
        command,
        no_color,
        quiet,
        ..
    } = cli;

    match command {
        Commands::Dashboard(args) => cli::run_dashboard(
            config,
            DashboardConfig {
                filter: args.filter.into_filter(),
                sort: args.sort.into_sort(),
            },
        ),

        Commands::List(args) => cli::run_list(
            config,
            ListConfig {
                filter: args.filter.into_filter(),
                sort: args.sort.into_sort(),
                page: args.page,
                format: args.output,
                output_file: args.output_file,
                no_color,
                quiet,
            },
        ),

        Commands::Export(args) => cli::run_export(
            config,
            ExportCommandConfig {
                format: args.format,
                filter: args.filter.into_filter(),
                sort: args.sort.into_sort(),
                output_file: args.output_file,
                quiet,
            },
        ),

        Commands::Delete(args) => cli::run_delete(
            config,
            DeleteConfig {
                id: RecordId(args.id),
                yes: args.yes,
                quiet,
            },
        ),

        Commands::Completions { .. } | Commands::ConfigSchema { .. } | Commands::Config { .. } => {
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = trackboard::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                trackboard::config::user_config_dir().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match trackboard::config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".trackboard.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = trackboard::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
