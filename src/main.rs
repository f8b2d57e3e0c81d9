//! skirmish - headless battle runner

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use skirmish::{report, ArenaConfig, BattleSession};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run Player against Enemy until one of them falls
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Real-time two-combatant battle simulator")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Reset and fight again this many times after the first battle
    #[arg(long, default_value_t = 0)]
    rematches: u32,

    /// Print a status line this often, in milliseconds (0 disables)
    #[arg(long, default_value_t = 1000)]
    report_ms: u64,

    /// Print the final snapshot of each battle as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "skirmish=info".into()),
    );
    if args.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let mut config = ArenaConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let session = BattleSession::start(config)?;
    let progress = spawn_progress(session.clone(), args.report_ms);

    for round in 0..=args.rematches {
        if round > 0 {
            session.reset();
        }

        let winner = tokio::select! {
            winner = session.wait_for_end() => winner,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                session.stop();
                None
            }
        };

        let snapshot = session.snapshot();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            print!("{}", report::render(&snapshot, snapshot.log.len()));
        }

        if winner.is_none() {
            break;
        }
    }

    if let Some(progress) = progress {
        progress.abort();
    }
    Ok(())
}

/// Periodic one-line status while a battle runs
fn spawn_progress(
    session: BattleSession,
    report_ms: u64,
) -> Option<tokio::task::JoinHandle<()>> {
    if report_ms == 0 {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(report_ms));
        loop {
            interval.tick().await;
            let snapshot = session.snapshot();
            if snapshot.status.is_running() {
                info!("{}", report::status_line(&snapshot));
            }
        }
    }))
}
