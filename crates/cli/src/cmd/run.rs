//! Apply the retention policy to one dataset

use crate::util::{self, ConsoleLog, Stream};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use retention::RunOptions;
use snappy_core::SanoidConfig;
use std::io::IsTerminal;
use std::path::PathBuf;
use zfs::ZfsCli;

/// Parsed command-line arguments for a run
pub struct RunArgs {
    pub dataset: String,
    pub conf: PathBuf,
    pub dry_run: bool,
    pub create: bool,
    pub zfs_bin: PathBuf,
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    // 1. Load and resolve dataset config
    let config = SanoidConfig::load(&args.conf).context("Failed to load configuration")?;
    let spec = config
        .retention_spec(&args.dataset)
        .with_context(|| format!("Invalid configuration for {}", args.dataset))?;

    tracing::info!("Using prefix: {}", spec.prefix);
    tracing::info!(
        "Retention: daily={}, weekly={}, monthly={}, yearly={}",
        spec.daily,
        spec.weekly,
        spec.monthly,
        spec.yearly
    );

    // 2. Run against zfs; with --json, stdout is reserved for the plan
    let mut catalog = ZfsCli::new(&args.zfs_bin);
    let mut console = ConsoleLog::new(if args.json { Stream::Stderr } else { Stream::Stdout });
    let options = RunOptions {
        create: args.create,
        dry_run: args.dry_run,
    };
    let now = chrono::Local::now().naive_local();

    let summary = retention::run(&mut catalog, &mut console, &args.dataset, &spec, options, now)?;

    // 3. Report
    if args.json {
        let json = serde_json::to_string_pretty(&summary.plan).context("Failed to serialize plan")?;
        println!("{}", json);
        return Ok(());
    }

    let line = format!(
        "{}: kept {}, promoted {}, deleted {} ({} unique){}",
        args.dataset,
        summary.plan.survivors(),
        summary.report.renamed,
        summary.report.destroyed,
        util::format_size(summary.deleted_bytes),
        if args.dry_run { " [dry run]" } else { "" }
    );
    if std::io::stdout().is_terminal() {
        println!("{}", line.dimmed());
    } else {
        println!("{}", line);
    }

    Ok(())
}
