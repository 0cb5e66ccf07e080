//! snappy - tiered ZFS snapshot manager

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod util;

/// snappy - tiered ZFS snapshot manager (daily/weekly/monthly/yearly)
#[derive(Parser)]
#[command(name = "snappy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// ZFS dataset to manage (e.g. tank/data)
    dataset: String,

    /// Path to sanoid.conf
    #[arg(long, default_value = snappy_core::DEFAULT_CONFIG_PATH)]
    conf: PathBuf,

    /// Dry-run mode (show what would happen, but do nothing)
    #[arg(long, visible_alias = "dry-run")]
    dry: bool,

    /// Create today's daily snapshot (state-aware)
    #[arg(long)]
    create: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// zfs binary to run
    #[arg(long, env = "SNAPPY_ZFS_BIN", default_value = zfs::DEFAULT_ZFS_BIN)]
    zfs_bin: PathBuf,

    /// Print the computed plan as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| util::log_filter(cli.verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    cmd::run::run(cmd::run::RunArgs {
        dataset: cli.dataset,
        conf: cli.conf,
        dry_run: cli.dry,
        create: cli.create,
        zfs_bin: cli.zfs_bin,
        json: cli.json,
    })
}
