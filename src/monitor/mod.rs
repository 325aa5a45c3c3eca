use std::{thread, time::Duration};

use anyhow::Result;

use crate::config;
use crate::report;
use crate::scoring::verifier::Verifier;
use crate::store;

/// Configuration for the background re-verification loop.
#[derive(Clone)]
pub struct MonitorCfg {
    pub interval_secs: u64,
    /// Overall-score drop between consecutive runs that warrants a log line.
    pub alert_drop: f64,
    pub trace_dir: std::path::PathBuf,
}

impl Default for MonitorCfg {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            alert_drop: 10.0,
            trace_dir: config::trace_dir(),
        }
    }
}

/// Spawn a background thread that re-runs the verification suite on an
/// interval. The thread owns its own SQLite connection (thread-affine).
pub fn spawn_monitor(
    db_path: String,
    cfg: MonitorCfg,
    shutdown_rx: Option<crossbeam_channel::Receiver<()>>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        if let Err(e) = run_loop(db_path, cfg, shutdown_rx) {
            eprintln!("[monitor] loop error: {e:?}");
        }
    })
}

fn run_loop(
    db_path: String,
    cfg: MonitorCfg,
    shutdown_rx: Option<crossbeam_channel::Receiver<()>>,
) -> Result<()> {
    let conn = store::open(&db_path)?;
    let verifier = Verifier::default();
    let mut prev_overall: Option<f64> = None;

    loop {
        if let Some(rx) = &shutdown_rx {
            if rx.try_recv().is_ok() {
                break;
            }
        }

        let rep = verifier.run(&conn)?;
        if let Some(prev) = prev_overall {
            if prev - rep.overall > cfg.alert_drop {
                eprintln!(
                    "[monitor] overall dropped {:.1} -> {:.1}",
                    prev, rep.overall
                );
            }
        }
        prev_overall = Some(rep.overall);
        report::append_trace(&cfg.trace_dir, &rep);

        // sleep until next tick (interruptible)
        let mut slept = 0u64;
        while slept < cfg.interval_secs {
            if let Some(rx) = &shutdown_rx {
                if rx.try_recv().is_ok() {
                    return Ok(());
                }
            }
            thread::sleep(Duration::from_secs(1));
            slept += 1;
        }
    }

    Ok(())
}
