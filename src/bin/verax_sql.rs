// src/bin/verax_sql.rs
use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use rusqlite::{types::ValueRef, Row};
use std::io::{self, Write};
use std::path::PathBuf;

use verax::{config, store};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Tsv,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "verax_sql", version, about = "Run an SQL query against the verax DB and print results")]
struct Args {
    /// SQL to execute, e.g. "SELECT * FROM insight_events LIMIT 5;"
    #[arg(long)]
    sql: String,

    /// Output format
    #[arg(long, value_enum, default_value = "tsv")]
    format: Format,

    /// DB path
    #[arg(long)]
    db: Option<PathBuf>,
}

fn display_cell(row: &Row, i: usize) -> String {
    match row.get_ref(i) {
        Ok(ValueRef::Null) => "".into(),
        Ok(ValueRef::Integer(n)) => n.to_string(),
        Ok(ValueRef::Real(x)) => x.to_string(),
        Ok(ValueRef::Text(bytes)) => String::from_utf8_lossy(bytes).to_string(),
        Ok(ValueRef::Blob(b)) => format!("<blob {} bytes>", b.len()),
        Err(e) => format!("<err {e}>"),
    }
}

fn push_field(line: &mut String, sep: char, field: &str) {
    if sep == ',' {
        let needs_quote = field.contains(',')
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\t');
        if needs_quote {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    } else {
        line.push_str(field);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let sep = match args.format {
        Format::Csv => ',',
        Format::Tsv => '\t',
    };

    let db = args.db.unwrap_or_else(config::default_db_path);
    let conn = store::open(&db)?;
    let mut stmt = conn
        .prepare(&args.sql)
        .map_err(|e| anyhow!("prepare failed: {e}"))?;

    // capture metadata BEFORE starting rows() to avoid borrow conflicts
    let col_count = stmt.column_count();
    let col_names: Vec<String> = (0..col_count)
        .map(|i| stmt.column_name(i).unwrap_or("?").to_string())
        .collect();

    let mut rows = stmt.query([])?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut header = String::new();
    for (i, name) in col_names.iter().enumerate() {
        if i > 0 {
            header.push(sep);
        }
        push_field(&mut header, sep, name);
    }
    header.push('\n');
    out.write_all(header.as_bytes())?;

    while let Some(row) = rows.next()? {
        let mut line = String::new();
        for i in 0..col_count {
            if i > 0 {
                line.push(sep);
            }
            push_field(&mut line, sep, &display_cell(row, i));
        }
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}
