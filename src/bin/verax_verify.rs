// src/bin/verax_verify.rs
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use verax::{config, report, store, Verifier};

#[derive(Parser, Debug)]
#[command(name = "verax_verify", version, about = "Run the verification suite and report per-metric scores")]
struct Args {
    /// DB path
    #[arg(long)]
    db: Option<PathBuf>,

    /// Write the versioned JSON report here
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let db = args.db.unwrap_or_else(config::default_db_path);

    let conn = store::open(&db)?;
    let rep = Verifier::default().run(&conn)?;
    report::append_trace(config::trace_dir(), &rep);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report::envelope(&rep))?);
    } else {
        println!("{:<24} {:>10} {:>8}  fallback", "metric", "raw", "score");
        for s in &rep.scores {
            println!(
                "{:<24} {:>10.1} {:>8.1}  {}",
                s.name,
                s.raw_value,
                s.score,
                if s.fallback_used { "yes" } else { "-" }
            );
        }
        println!("overall: {:.1}", rep.overall);
    }

    if let Some(out) = args.out {
        report::write_report(&out, &rep)?;
        println!("report written to {}", out.display());
    }
    Ok(())
}
