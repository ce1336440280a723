//! TaskDash - recent activity and statistics for a task manager backend
//!
//! `taskdash` prints one dashboard snapshot as JSON; `taskdash --watch`
//! keeps refreshing in the background and prints every new snapshot until
//! interrupted.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taskdash_app::AppContext;
use taskdash_core::DashboardSnapshot;
use taskdash_infra::{config, init_logging};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "taskdash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (JSON or TOML); defaults to environment, then probed files
    #[arg(short, long, env = "TASKDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Keep refreshing on the polling interval until Ctrl-C
    #[arg(long)]
    watch: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone()))
            .with_context(|| format!("loading {}", path.display()))?,
        None => config::load().context("loading configuration")?,
    };

    init_logging(&config.logging).context("initialising logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let ctx = AppContext::new(config).context("building application context")?;

    if cli.watch {
        watch(&ctx, cli.pretty).await
    } else {
        let snapshot = ctx.snapshot().await.context("fetching dashboard data")?;
        print_snapshot(&snapshot, cli.pretty)
    }
}

async fn watch(ctx: &AppContext, pretty: bool) -> Result<()> {
    let mut poller = ctx.poller();
    let mut updates = poller.subscribe();

    poller.start().await.context("starting feed poller")?;
    info!(
        interval_seconds = ctx.config.polling.interval_seconds,
        "Watching dashboard; press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for Ctrl-C")?;
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                if let Some(snapshot) = latest {
                    print_snapshot(&snapshot, pretty)?;
                }
            }
        }
    }

    poller.stop().await.context("stopping feed poller")?;
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    stdout.flush()?;
    Ok(())
}
