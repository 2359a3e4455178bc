use anyhow::{Context, Result, bail};
use clap::Parser;
use iteminfo_config::Config;
use iteminfo_engine::{Codepage, DefaultDeriver, ReconcileJob, ReconcileSummary, reconcile};
use std::path::PathBuf;

/// Adds items from flat item tables to an item-info script.
#[derive(Debug, Parser)]
#[command(name = "iteminfo-reconcile", version, about)]
struct Args {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Flat item table; repeat to read several in order
    #[arg(long = "item-db", value_name = "PATH")]
    item_db: Vec<PathBuf>,

    /// Item-info script to update
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Where to write the updated script
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also dump the updated script records as TSV
    #[arg(long, value_name = "PATH")]
    tsv: Option<PathBuf>,

    /// Also dump the flat item table as TSV
    #[arg(long = "flat-tsv", value_name = "PATH")]
    flat_tsv: Option<PathBuf>,

    /// Codepage of every input and output file (437 or latin1)
    #[arg(long, value_name = "NAME")]
    codepage: Option<String>,
}

/// Combines command-line flags with the config file. Flags win; item tables
/// given on the command line replace the configured list.
fn resolve_job(args: Args, config: Option<Config>) -> Result<ReconcileJob> {
    let item_db_paths = if !args.item_db.is_empty() {
        args.item_db
    } else {
        config
            .as_ref()
            .map(|c| c.item_db_paths.clone())
            .unwrap_or_default()
    };
    if item_db_paths.is_empty() {
        bail!("No item table given (use --item-db or set item_db_paths in the config file)");
    }

    let Some(script_path) = args
        .script
        .or_else(|| config.as_ref().map(|c| c.script_path.clone()))
    else {
        bail!("No script given (use --script or set script_path in the config file)");
    };

    let Some(output_script_path) = args
        .output
        .or_else(|| config.as_ref().map(|c| c.output_script_path.clone()))
    else {
        bail!("No output path given (use --output or set output_script_path in the config file)");
    };

    let codepage = match args
        .codepage
        .or_else(|| config.as_ref().map(|c| c.codepage.clone()))
    {
        Some(name) => name.parse::<Codepage>()?,
        None => Codepage::default(),
    };

    Ok(ReconcileJob {
        item_db_paths,
        script_path,
        output_script_path,
        output_tsv_path: args
            .tsv
            .or_else(|| config.as_ref().and_then(|c| c.output_tsv_path.clone())),
        flat_tsv_path: args
            .flat_tsv
            .or_else(|| config.as_ref().and_then(|c| c.flat_tsv_path.clone())),
        codepage,
    })
}

fn report(summary: &ReconcileSummary) {
    for diagnostic in &summary.diagnostics {
        println!("  {diagnostic}");
    }
    for (id, err) in &summary.merge.failed {
        println!("  item {id}: {err}");
    }
    println!(
        "Parsed {} items from {} lines ({} flagged)",
        summary.items_parsed,
        summary.lines_read,
        summary.lines_flagged()
    );
    println!(
        "Read {} table items ({} rows skipped)",
        summary.item_db_items, summary.item_db_rows_skipped
    );
    println!(
        "Added {} items, {} already present, {} failed",
        summary.items_added(),
        summary.merge.already_present,
        summary.merge.failed.len()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(config_path) => {
            log::info!("Config path: {}", config_path.display());
            Config::load_from_path(config_path)
        }
        None => {
            log::info!("Config path: {}", Config::config_path().display());
            Config::load()
        }
    }
    .context("Failed to load config file")?;

    let job = resolve_job(args, config)?;
    let summary = reconcile(&job, &DefaultDeriver)?;
    report(&summary);

    Ok(())
}
