//! boto3-ref-index main entry point
//!
//! This is the command-line interface for building or installing the boto3
//! API reference search index.

use anyhow::Context;
use boto3_ref_index::config::{load_config_with_hash, Config};
use boto3_ref_index::crawler::{run_build, BuildOptions};
use boto3_ref_index::install::run_install;
use boto3_ref_index::output::print_summary;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// boto3-ref-index: search index builder for the boto3 API reference
///
/// Scrapes the boto3 service documentation into a document corpus and
/// settings file for a launcher full-text-search plugin, or installs a
/// pre-built copy from the latest release.
#[derive(Parser, Debug)]
#[command(name = "boto3-ref-index")]
#[command(version)]
#[command(about = "Search index builder for the boto3 API reference", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the documentation and write the data and settings files
    Build {
        /// Ignore cached pages and fetch everything again
        #[arg(long)]
        fresh: bool,

        /// Validate config and show where files would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Download the latest pre-built release into the plugin directory
    Install,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match load_config_with_hash(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    match &cli.config {
        Some(path) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            config_hash
        ),
        None => tracing::info!("Using built-in configuration"),
    }

    match cli.command {
        Command::Build { dry_run: true, .. } => handle_dry_run(&config),
        Command::Build { fresh, .. } => handle_build(&config, fresh).await,
        Command::Install => handle_install(&config).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("boto3_ref_index=info,warn"),
            1 => EnvFilter::new("boto3_ref_index=debug,info"),
            2 => EnvFilter::new("boto3_ref_index=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `build --dry-run`: shows what a build would read and write
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let fts_dir = config.fts_dir()?;

    println!("=== boto3-ref-index Dry Run ===\n");

    println!("Source:");
    println!("  Index page: {}", config.source.index_url);
    println!("  User agent: {}", config.source.user_agent);

    println!("\nCache:");
    println!("  Database: {}", config.cache_path()?.display());
    println!("  Expires after: {} hours", config.cache.expire_hours);

    println!("\nOutput:");
    println!("  Services: {}", config.services_path()?.display());
    println!("  Data: {}", fts_dir.join(config.data_file_name()).display());
    println!(
        "  Settings: {}",
        fts_dir.join(config.setting_file_name()).display()
    );
    println!(
        "  Stale index: {}",
        fts_dir.join(config.index_dir_name()).display()
    );

    println!("\n✓ Configuration is valid");

    Ok(())
}

async fn handle_build(config: &Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh build (ignoring cached pages)");
    } else {
        tracing::info!("Starting build");
    }

    match run_build(config, BuildOptions { fresh }).await {
        Ok(summary) => {
            tracing::info!("Build completed successfully");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Build failed: {}", e);
            Err(e).context("build failed")
        }
    }
}

async fn handle_install(config: &Config) -> anyhow::Result<()> {
    match run_install(config).await {
        Ok(summary) => {
            tracing::info!("Installed from {}", summary.asset_url);
            for path in &summary.installed {
                println!("✓ {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Install failed: {}", e);
            Err(e).context("install failed")
        }
    }
}
