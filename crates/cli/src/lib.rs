pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scentdex_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig};

use commands::browse::BrowseRequest;
use commands::search::SearchRequest;

#[derive(Debug, Parser)]
#[command(
    name = "scentdex",
    about = "Scentdex perfume catalog CLI",
    long_about = "Browse, search and compare the perfume catalog. Every command prints one JSON payload.",
    after_help = "Examples:\n  scentdex browse --gender male --sort rating\n  scentdex search oud\n  scentdex suggest p022"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a scentdex.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Catalog JSON file to load instead of the bundled one")]
    data: Option<PathBuf>,
    #[arg(long, global = true, help = "Override logging.level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Filter, sort and page through the catalog")]
    Browse {
        #[arg(long, help = "Shareable parameter string, e.g. `gender=male&sort=rating&page=2`")]
        params: Option<String>,
        #[arg(long, short, help = "Free-text match over brand, name, description and notes")]
        query: Option<String>,
        #[arg(long, value_delimiter = ',', help = "male, female or unisex (repeatable)")]
        gender: Vec<String>,
        #[arg(long, value_delimiter = ',', help = "spring, summer, fall or winter (repeatable)")]
        season: Vec<String>,
        #[arg(long, value_delimiter = ',', help = "Exact note names (repeatable)")]
        notes: Vec<String>,
        #[arg(long, help = "popularity, rating, newest or name")]
        sort: Option<String>,
        #[arg(long, help = "1-based page number")]
        page: Option<usize>,
    },
    #[command(about = "Typeahead search ranked by relevance")]
    Search {
        query: String,
        #[arg(long, help = "Maximum results (defaults to catalog.search_limit)")]
        limit: Option<usize>,
        #[arg(long, help = "Unscored match over name, brand, notes and accords")]
        quick: bool,
    },
    #[command(about = "Perfumes related to the given id")]
    Suggest {
        id: String,
        #[arg(long, help = "Maximum suggestions (defaults to catalog.suggestion_limit)")]
        limit: Option<usize>,
    },
    #[command(about = "Show one perfume record")]
    Show { id: String },
    #[command(about = "List every note in the catalog")]
    Notes,
    #[command(about = "List every brand in the catalog")]
    Brands,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
        require_file: false,
        overrides: ConfigOverrides {
            data_path: cli.data,
            log_level: cli.log_level,
            ..ConfigOverrides::default()
        },
    };

    // Invalid config still gets reported through the command payload below.
    let logging = AppConfig::load(options.clone())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging);

    let result = match cli.command {
        Command::Browse { params, query, gender, season, notes, sort, page } => {
            commands::browse::run(
                &options,
                BrowseRequest { params, query, gender, season, notes, sort, page },
            )
        }
        Command::Search { query, limit, quick } => {
            commands::search::run(&options, SearchRequest { query, limit, quick })
        }
        Command::Suggest { id, limit } => commands::suggest::run(&options, &id, limit),
        Command::Show { id } => commands::show::run(&options, &id),
        Command::Notes => commands::listing::notes(&options),
        Command::Brands => commands::listing::brands(&options),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the JSON payload.
fn init_logging(logging: &LoggingConfig) {
    use tracing::Level;

    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
