//! beepulse: digital health score for hotel websites
//!
//! Scores measurement bundles and assembles them from raw provider payloads.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use beepulse::{
    cli::{self, AssembleOptions},
    config::{AppConfig, CONFIG_FILE_NAMES},
    pipeline::{exit_codes, PayloadPaths},
    reports::ReportFormat,
};
use chrono::{DateTime, Utc};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beepulse")]
#[command(version)]
#[command(about = "Digital health score for hotel websites", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  A score is below --min-score
    3  Error occurred

EXAMPLES:
    # Score a measurement bundle
    beepulse score hotel.json

    # CI check across several sites
    beepulse score sites/*.json -o json --min-score 70

    # Build a bundle from raw provider payloads and score it
    beepulse assemble --page-speed psi.json --ssl-labs ssllabs.json --score")]
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

    /// Path to config file (default: auto-discover .beepulse.yaml)
    #[arg(long, global = true, env = "BEEPULSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output flags shared by the scoring commands
#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 when any final score is below this value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Show the weighted contribution of each sub-score
    #[arg(long)]
    show_breakdown: bool,
}

#[derive(Args)]
struct AssembleArgs {
    /// PageSpeed Insights response (required)
    #[arg(long)]
    page_speed: PathBuf,

    /// Chrome UX Report record for the phone form factor
    #[arg(long)]
    crux_mobile: Option<PathBuf>,

    /// Chrome UX Report record for the desktop form factor
    #[arg(long)]
    crux_desktop: Option<PathBuf>,

    /// Safe Browsing lookup response
    #[arg(long)]
    safe_browsing: Option<PathBuf>,

    /// SSL Labs analysis
    #[arg(long)]
    ssl_labs: Option<PathBuf>,

    /// HTTP Observatory scan
    #[arg(long)]
    observatory: Option<PathBuf>,

    /// RDAP domain record
    #[arg(long)]
    rdap: Option<PathBuf>,

    /// DNS-over-HTTPS answers keyed by record type
    #[arg(long)]
    dns: Option<PathBuf>,

    /// Reference time for domain age (RFC 3339, default: now)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    /// Score the assembled bundle instead of printing it
    #[arg(long)]
    score: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more measurement bundles
    Score {
        /// Measurement bundle JSON files
        #[arg(required = true)]
        bundles: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a measurement bundle from raw provider payloads
    Assemble(AssembleArgs),

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
    /// Generate an example .beepulse.yaml in the current directory
    Init,
}

fn parse_as_of(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

/// Merge CLI flags over the discovered config file.
fn effective_config(cli: &Cli, output: &OutputArgs) -> AppConfig {
    let overrides = AppConfig::builder()
        .output_format(output.output.unwrap_or_default())
        .output_file(output.output_file.clone())
        .no_color(cli.no_color)
        .min_score(output.min_score)
        .quiet(cli.quiet)
        .show_breakdown(output.show_breakdown)
        .build();

    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    config
}

fn exit_with(code: i32) -> Result<()> {
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
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

    match &cli.command {
        Commands::Score { bundles, output } => {
            let config = effective_config(&cli, output);
            exit_with(cli::run_score(bundles, &config)?)
        }

        Commands::Assemble(args) => {
            let config = effective_config(&cli, &args.output);
            let options = AssembleOptions {
                paths: PayloadPaths {
                    page_speed: args.page_speed.clone(),
                    crux_mobile: args.crux_mobile.clone(),
                    crux_desktop: args.crux_desktop.clone(),
                    safe_browsing: args.safe_browsing.clone(),
                    ssl_labs: args.ssl_labs.clone(),
                    observatory: args.observatory.clone(),
                    rdap: args.rdap.clone(),
                    dns: args.dns.clone(),
                },
                as_of: args.as_of,
                score: args.score,
            };
            exit_with(cli::run_assemble(&options, &config)?)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "beepulse", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema =
                beepulse::config::generate_json_schema().context("failed to build schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    beepulse::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("beepulse").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
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
                match beepulse::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(beepulse::config::default_config_path());
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = beepulse::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
