// src/bin/verax_server.rs
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use verax::api::server::{router, AppState};
use verax::monitor::{spawn_monitor, MonitorCfg};
use verax::{config, store};

#[derive(Parser, Debug)]
#[command(name = "verax_server", version, about = "HTTP surface for the verax store and verifier")]
struct Args {
    /// DB path
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long, default_value = "127.0.0.1:8723")]
    addr: String,

    /// Re-run verification in the background every N seconds
    #[arg(long)]
    monitor_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let db = args.db.unwrap_or_else(config::default_db_path);
    let db_path = db.display().to_string();

    let conn = store::open(&db)?;

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
    let mut monitor_handle = None;
    if let Some(secs) = args.monitor_secs {
        let cfg = MonitorCfg { interval_secs: secs, ..MonitorCfg::default() };
        monitor_handle = Some(spawn_monitor(db_path.clone(), cfg, Some(shutdown_rx)));
        tracing::info!("monitor loop running every {secs}s");
    }

    let state = Arc::new(AppState {
        db_path: db_path.clone(),
        conn: Mutex::new(conn),
    });

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    tracing::info!("listening on {} (db {})", args.addr, db_path);
    axum::serve(listener, router(state)).await?;

    let _ = shutdown_tx.send(());
    if let Some(h) = monitor_handle {
        let _ = h.join();
    }
    Ok(())
}
