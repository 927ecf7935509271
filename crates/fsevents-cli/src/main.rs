//! fsevents - run the FSEvents ingest pipeline from the command line.
//!
//! - fsevents ingest        - ingest a mounted image into an evidence database
//! - fsevents init-catalog  - write the default catalog database
//! - fsevents summary       - records per evidence type in an evidence database
//! - fsevents config        - print the effective configuration

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fsevents_core::config::CliOverrides;
use fsevents_core::constants::{MODULE_DESCRIPTION, MODULE_VERSION};
use fsevents_core::errors::FsEventsErrorCode;
use fsevents_core::{CancellationToken, FsEventsConfig, IngestError};
use fsevents_ingest::{FsEventsModule, LocalDataSource};
use fsevents_storage::catalog::{create_catalog, default_entries};
use fsevents_storage::SqliteEvidenceStore;

/// FSEvents ingest pipeline
#[derive(Parser)]
#[command(name = "fsevents", version = MODULE_VERSION, about = MODULE_DESCRIPTION)]
#[command(long_about = "Extract FSEvents records from a mounted macOS image")]
struct Cli {
    /// Directory searched for fsevents.toml (default: current directory)
    #[arg(long, global = true)]
    config_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Default)]
struct ConfigArgs {
    /// Decoder executable (overrides the module-directory lookup)
    #[arg(long)]
    decoder: Option<PathBuf>,
    /// Module directory holding the decoder and catalog
    #[arg(long)]
    module_dir: Option<PathBuf>,
    /// Case label passed to the decoder
    #[arg(long)]
    case_label: Option<String>,
    /// Root for the scratch directory
    #[arg(long)]
    temp_root: Option<PathBuf>,
    /// Catalog database
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Keep exported files and decoder output after the run
    #[arg(long)]
    keep_scratch: bool,
}

impl ConfigArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            decoder_executable: self.decoder.clone(),
            module_dir: self.module_dir.clone(),
            case_label: self.case_label.clone(),
            temp_root: self.temp_root.clone(),
            catalog_path: self.catalog.clone(),
            keep_scratch: self.keep_scratch.then_some(true),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a mounted image directory into an evidence database
    Ingest {
        /// Root of the mounted image
        image: PathBuf,
        /// Evidence database (created if missing)
        #[arg(short, long)]
        evidence: PathBuf,
        /// Data source key (default: image directory name)
        #[arg(long)]
        key: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write the default catalog database
    InitCatalog {
        /// Output path
        path: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show records per evidence type
    Summary {
        /// Evidence database
        evidence: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> ExitCode {
    fsevents_core::tracing::init_tracing();
    let cli = Cli::parse();
    let root = cli
        .config_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let result = match cli.command {
        Commands::Ingest {
            image,
            evidence,
            key,
            config,
        } => cmd_ingest(&root, &image, &evidence, key, &config),
        Commands::InitCatalog { path, force } => cmd_init_catalog(&path, force),
        Commands::Summary { evidence, json } => cmd_summary(&evidence, json),
        Commands::Config { config } => cmd_config(&root, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn cmd_ingest(
    root: &Path,
    image: &Path,
    evidence: &Path,
    key: Option<String>,
    args: &ConfigArgs,
) -> Result<(), IngestError> {
    let config = FsEventsConfig::load(root, Some(&args.overrides()))?;
    let module = FsEventsModule::startup(config)?;

    let mut source = LocalDataSource::new(image)?;
    if let Some(key) = key {
        source = source.with_key(key);
    }
    let store = SqliteEvidenceStore::open(evidence)?;

    let report = module.process(&source, &store, &CancellationToken::new())?;
    match report.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "could not serialize report"),
    }
    Ok(())
}

fn cmd_init_catalog(path: &Path, force: bool) -> Result<(), IngestError> {
    if path.exists() {
        if !force {
            println!("{} already exists (use --force to replace it)", path.display());
            return Ok(());
        }
        std::fs::remove_file(path).map_err(|e| fsevents_core::errors::CatalogError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    }
    let entries = default_entries();
    create_catalog(path, &entries)?;
    println!("wrote {} catalog entries to {}", entries.len(), path.display());
    Ok(())
}

fn cmd_summary(evidence: &Path, json: bool) -> Result<(), IngestError> {
    let store = SqliteEvidenceStore::open(evidence)?;
    let counts = store.counts_by_type()?;

    if json {
        let rows: Vec<_> = counts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "display_name": c.display_name,
                    "count": c.count,
                })
            })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(s) => println!("{s}"),
            Err(e) => tracing::warn!(error = %e, "could not serialize summary"),
        }
        return Ok(());
    }

    let width = counts.iter().map(|c| c.name.len()).max().unwrap_or(4).max(4);
    println!("{:<width$}  {:>8}", "TYPE", "RECORDS");
    for c in &counts {
        println!("{:<width$}  {:>8}", c.name, c.count);
    }
    println!("{:<width$}  {:>8}", "total", store.total_artifacts()?);
    Ok(())
}

fn cmd_config(root: &Path, args: &ConfigArgs) -> Result<(), IngestError> {
    let config = FsEventsConfig::load(root, Some(&args.overrides()))?;
    println!("{}", config.to_toml()?);
    Ok(())
}
