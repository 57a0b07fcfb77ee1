//! Mirror routing CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!     settings.toml ──▶ config (load, validate) ──▶ SharedSettings (ArcSwap)
//!                                                         │
//!     Repository ────────────────────────────────────────▶│
//!                                                         ▼
//!                         routing::selector  exact pass ─▶ pattern pass ─▶ route table
//!                                                         │
//!                                                         ▼
//!                                            ResolvedMirror | no mirror
//! ```
//!
//! Commands:
//! - `resolve`: resolve one repository given on the command line
//! - `check`: validate settings and print the table for configured repositories
//! - `watch`: keep re-resolving configured repositories as the settings file changes

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use mirror_router::config::SharedSettings;
use mirror_router::config::watcher::SettingsWatcher;
use mirror_router::lifecycle::{signals, startup, Shutdown};
use mirror_router::observability::metrics;
use mirror_router::routing::Repository;

#[derive(Parser)]
#[command(name = "mirror-router")]
#[command(about = "Resolve which mirror serves an artifact repository", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long, default_value = "mirror-settings.toml")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the mirror for a single repository
    Resolve {
        /// Repository id
        #[arg(long)]
        id: String,
        /// Repository URL
        #[arg(long)]
        url: String,
        /// Repository layout
        #[arg(long)]
        layout: Option<String>,
        /// Skip the routing table fallback
        #[arg(long)]
        no_auto_routing: bool,
    },
    /// Validate settings and resolve every configured repository
    Check,
    /// Re-resolve configured repositories whenever the settings change
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let shared = startup::bootstrap(&cli.settings)?;

    match cli.command {
        Commands::Resolve { id, url, layout, no_auto_routing } => {
            let repository = Repository { id, url, layout };
            let snapshot = shared.snapshot();
            let mirror = if no_auto_routing {
                mirror_router::select_mirror(&repository, &snapshot.settings.mirrors, None)
            } else {
                snapshot.resolve(&repository)
            };

            match mirror {
                Some(mirror) => println!("{}", serde_json::to_string_pretty(&mirror)?),
                None => println!("no mirror"),
            }
        }
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&resolution_table(&shared))?);
        }
        Commands::Watch => watch(cli.settings, shared).await?,
    }

    Ok(())
}

fn resolution_table(shared: &SharedSettings) -> Value {
    let snapshot = shared.snapshot();
    let rows: Vec<Value> = snapshot
        .settings
        .repositories
        .iter()
        .map(|repository| {
            json!({
                "repository": repository.id,
                "url": repository.url,
                "mirror": snapshot.resolve(repository),
            })
        })
        .collect();
    Value::Array(rows)
}

fn report(shared: &SharedSettings) {
    let snapshot = shared.snapshot();
    for repository in &snapshot.settings.repositories {
        match snapshot.resolve(repository) {
            Some(mirror) => tracing::info!(
                repository = %repository.id,
                mirror = %mirror.id,
                url = %mirror.url,
                source = mirror.source.as_str(),
                "Mirror resolved"
            ),
            None => tracing::info!(repository = %repository.id, "No mirror, contacting repository directly"),
        }
    }
}

async fn watch(path: PathBuf, shared: SharedSettings) -> Result<(), Box<dyn std::error::Error>> {
    let observability = shared.snapshot().settings.observability.clone();
    if observability.metrics_enabled {
        match observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (watcher, mut updates) = SettingsWatcher::new(&path);
    let _watcher = watcher.run()?;

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    report(&shared);
    loop {
        tokio::select! {
            Some(settings) = updates.recv() => {
                shared.replace(settings);
                report(&shared);
            }
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}
