use anyhow::Result;
use serde::Serialize;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::scoring::verifier::VerificationReport;

pub const SCHEMA_VERSION: u32 = 1;

/// One versioned wrapper for every report this tool emits, instead of
/// per-script ad hoc JSON keys.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub schema_version: u32,
    pub generated_at: String,
    pub tool: &'static str,
    pub report: &'a VerificationReport,
}

pub fn envelope(report: &VerificationReport) -> ReportEnvelope<'_> {
    ReportEnvelope {
        schema_version: SCHEMA_VERSION,
        generated_at: chrono::Utc::now().to_rfc3339(),
        tool: "verax",
        report,
    }
}

pub fn write_report(path: impl AsRef<Path>, report: &VerificationReport) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(&envelope(report))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Append one JSON line per run to the audit trace. Trace failures never
/// fail a verification run; they go to stderr and the run result stands.
pub fn append_trace(dir: impl AsRef<Path>, report: &VerificationReport) {
    let dir = dir.as_ref();
    if let Err(e) = create_dir_all(dir) {
        eprintln!("[report] create_dir_all({:?}) failed: {e}", dir);
        return;
    }
    let path = dir.join("verify_trace.jsonl");

    match serde_json::to_string(&envelope(report)) {
        Ok(line) => match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{line}") {
                    eprintln!("[report] write failed: {e}");
                }
            }
            Err(e) => eprintln!("[report] open {:?} failed: {e}", path),
        },
        Err(e) => eprintln!("[report] serialize failed: {e}"),
    }
}
