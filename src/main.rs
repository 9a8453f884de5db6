use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soccer_stats::calculate::{self, FilterVariant};
use soccer_stats::config::AppConfig;
use soccer_stats::models::{Continent, ContinentMap, SelectionPolicy, WinRateFormat};
use soccer_stats::report::{self, OutputFormat};
use soccer_stats::storage;

#[derive(Parser)]
#[command(name = "soccer-stats")]
#[command(about = "Team statistics from international soccer results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./soccer-stats.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print ranked team statistics
    Stats {
        /// Match results file (.csv or .jsonl)
        input: PathBuf,

        /// Filter preset: total, official, world_cup
        #[arg(long)]
        variant: Option<FilterVariant>,

        /// Selection: global_top20, continent_top5
        #[arg(long)]
        selection: Option<SelectionPolicy>,

        /// Rows kept by the global ranking
        #[arg(long)]
        top_n: Option<usize>,

        /// Rows kept per continent
        #[arg(long)]
        per_continent: Option<usize>,

        /// Win rate presentation: ratio, percent
        #[arg(long)]
        win_rate: Option<WinRateFormat>,

        /// Continent mapping file (TOML)
        #[arg(long)]
        continents: Option<PathBuf>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Also write rows as JSONL to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check that a results file binds and passes row validation
    Validate {
        /// Match results file (.csv or .jsonl)
        input: PathBuf,

        /// Filter preset whose required columns are checked
        #[arg(long)]
        variant: Option<FilterVariant>,
    },

    /// Print the active continent mapping
    Continents {
        /// Continent mapping file (TOML)
        #[arg(long)]
        continents: Option<PathBuf>,

        /// Only list teams of this continent
        #[arg(long)]
        only: Option<String>,
    },
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::from_file(path).with_context(|| format!("Failed to load config {:?}", path))
    } else {
        Ok(AppConfig::default())
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_continents(cli_path: Option<&Path>, config: &AppConfig) -> Result<ContinentMap> {
    let map = match cli_path.or(config.continents.as_deref()) {
        Some(path) => storage::load_continent_map(path)
            .with_context(|| format!("Failed to load continent mapping {:?}", path))?,
        None => storage::bundled_continent_map().context("Bundled continent mapping is invalid")?,
    };
    Ok(map)
}

fn parse_continent(s: &str) -> Result<Continent> {
    Continent::ALL
        .into_iter()
        .find(|c| c.to_string().eq_ignore_ascii_case(s))
        .with_context(|| format!("Unknown continent: {}", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::info!("Starting soccer-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Stats {
            input,
            variant,
            selection,
            top_n,
            per_continent,
            win_rate,
            continents,
            format,
            out,
        } => {
            if let Some(v) = variant {
                config.stats.variant = v;
            }
            if let Some(s) = selection {
                config.stats.selection = s;
            }
            if let Some(n) = top_n {
                config.stats.top_n = n;
            }
            if let Some(n) = per_continent {
                config.stats.per_continent = n;
            }
            if let Some(w) = win_rate {
                config.stats.win_rate_format = w;
            }
            config.validate()?;

            let table = storage::load_match_table(&input)?;
            let continent_map = if config.stats.selection == SelectionPolicy::ContinentTop5 {
                resolve_continents(continents.as_deref(), &config)?
            } else {
                ContinentMap::new()
            };

            let options = config.stats.aggregate_options();
            let stats = calculate::aggregate(&table, &config.columns, &options, &continent_map)?;

            print!("{}", report::render(&stats, format)?);
            if format == OutputFormat::Json {
                println!();
            }

            if let Some(path) = out {
                let written = storage::write_rows_jsonl(&path, &stats.rows)?;
                tracing::info!("Exported {} rows to {:?}", written, path);
            }
        }
        Commands::Validate { input, variant } => {
            if let Some(v) = variant {
                config.stats.variant = v;
            }

            let table = storage::load_match_table(&input)?;
            let records =
                calculate::bind_records(&table, &config.columns, &config.stats.policy())?;
            calculate::validate_records(&records)?;

            println!("=== Validation ===");
            println!("File:     {:?}", input);
            println!("Rows:     {}", records.len());
            println!("Draws:    {}", records.iter().filter(|r| r.is_draw()).count());
            println!("Status:   ok");
        }
        Commands::Continents { continents, only } => {
            let map = resolve_continents(continents.as_deref(), &config)?;
            let only = only.as_deref().map(parse_continent).transpose()?;

            let mut listed = 0usize;
            for (team, continent) in map.iter() {
                if only.map_or(true, |c| c == continent) {
                    println!("{:<36} {}", team, continent);
                    listed += 1;
                }
            }
            println!("\n{} teams", listed);
        }
    }

    Ok(())
}
