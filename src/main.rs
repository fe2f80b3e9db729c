//! structdiff: recursive structural comparison of JSON and YAML documents.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use structdiff::{
    cli::{self, exit_codes, CompareJob},
    config::{self, AppConfig, ConfigPreset, CyclePolicy, OutputFormat},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "structdiff")]
#[command(version)]
#[command(about = "Recursive structural comparison of JSON and YAML documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Documents are structurally equal
    1  Differences found
    3  Error occurred

EXAMPLES:
    # Compare two documents, text report on stdout
    structdiff compare old.json new.json

    # JSON report written to a file
    structdiff compare old.yaml new.yaml -o json -O report.json

    # Report revisited cycles and skip leaf comparators
    structdiff compare a.json b.json --preset structural --cycle-policy report")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Path to the left (first) document
    left: PathBuf,

    /// Path to the right (second) document
    right: PathBuf,

    /// Output format (text, json)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Configuration preset (default, strict, structural)
    #[arg(long)]
    preset: Option<String>,

    /// What to do when a cycle is revisited (assume-equal, report)
    #[arg(long, value_parser = parse_cycle_policy)]
    cycle_policy: Option<CyclePolicy>,

    /// Disable the memoization cache
    #[arg(long)]
    no_memoize: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON or YAML documents
    Compare(CompareArgs),

    /// Print the JSON schema of the configuration file
    ConfigSchema,

    /// Print an example configuration file
    InitConfig,
}

fn parse_cycle_policy(s: &str) -> Result<CyclePolicy, String> {
    match s.to_lowercase().as_str() {
        "assume-equal" | "equal" => Ok(CyclePolicy::AssumeEqual),
        "report" => Ok(CyclePolicy::Report),
        other => Err(format!(
            "unknown cycle policy '{other}' (expected assume-equal or report)"
        )),
    }
}

/// Layer command-line flags over the file (or default) configuration.
fn build_config(args: &CompareArgs, file_config: AppConfig) -> Result<AppConfig> {
    let mut config = file_config;

    if let Some(ref name) = args.preset {
        let Some(preset) = ConfigPreset::from_name(name) else {
            let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            bail!("Unknown preset '{name}'. Valid options: {}", known.join(", "));
        };
        config.compare = config::CompareConfig::from_preset(preset);
    }
    if let Some(policy) = args.cycle_policy {
        config.compare.cycle_policy = policy;
    }
    if args.no_memoize {
        config.compare.memoize = false;
    }
    if let Some(format) = args.output {
        config.output.format = format;
    }
    if args.output_file.is_some() {
        config.output.file.clone_from(&args.output_file);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Compare(args) => {
            let (file_config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            let exit_code = build_config(&args, file_config)
                .map(|config| CompareJob::new(args.left, args.right, config))
                .and_then(cli::run_compare)
                .unwrap_or_else(|err| {
                    eprintln!("Error: {err:#}");
                    exit_codes::ERROR
                });
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::ConfigSchema => {
            println!("{}", config::generate_json_schema());
            Ok(())
        }

        Commands::InitConfig => {
            print!("{}", config::generate_example_config());
            Ok(())
        }
    }
}
