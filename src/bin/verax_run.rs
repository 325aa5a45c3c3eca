// src/bin/verax_run.rs
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

use verax::config;
use verax::engines::{cross_domain, ethical, novel, pattern};
use verax::store;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Engine {
    Pattern,
    Ethical,
    CrossDomain,
    Novel,
}

#[derive(Parser, Debug)]
#[command(name = "verax_run", version, about = "Evaluate input through an engine and record the resulting events")]
struct Args {
    /// DB path
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long, value_enum)]
    engine: Engine,

    /// Single input; omit to read one input per stdin line
    #[arg(long)]
    text: Option<String>,

    /// Source domain (cross-domain only)
    #[arg(long)]
    source: Option<String>,

    /// Target domain (cross-domain only)
    #[arg(long)]
    target: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let db = args.db.clone().unwrap_or_else(config::default_db_path);
    let conn = store::open(&db)?;

    if let Engine::CrossDomain = args.engine {
        let (Some(source), Some(target)) = (args.source.as_deref(), args.target.as_deref())
        else {
            bail!("--engine cross-domain needs --source and --target");
        };
        let r = cross_domain::evaluate(&conn, source, target)?;
        println!(
            "{} -> {}: strength {:.3}, shared [{}]",
            r.source,
            r.target,
            r.strength,
            r.shared.join(", ")
        );
        return Ok(());
    }

    let inputs: Vec<String> = match args.text {
        Some(t) => vec![t],
        None => std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect(),
    };

    for input in &inputs {
        match args.engine {
            Engine::Pattern => {
                let hits = pattern::evaluate(&conn, input)?;
                if hits.is_empty() {
                    println!("no pattern: {input}");
                }
                for h in hits {
                    println!("{} ({:.2}): {}", h.kind.as_str(), h.confidence, h.description);
                }
            }
            Engine::Ethical => {
                let a = ethical::evaluate(&conn, input)?;
                println!(
                    "{} (clearance {:.2}, confidence {:.2}): {input}",
                    a.verdict.as_str(),
                    a.clearance,
                    a.confidence
                );
            }
            Engine::Novel => {
                let a = novel::evaluate(&conn, input)?;
                println!(
                    "{} (confidence {:.2}, strategies [{}]): {input}",
                    a.verdict.as_str(),
                    a.confidence,
                    a.matched.join(", ")
                );
            }
            Engine::CrossDomain => unreachable!(),
        }
    }
    Ok(())
}
