use std::path::PathBuf;

/// Base data directory (env override -> default ./data).
pub fn data_dir() -> PathBuf {
    std::env::var_os("VERAX_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Default SQLite database path. All components share this one file;
/// the schema is owned by `store::schema`.
pub fn default_db_path() -> PathBuf {
    data_dir().join("verax.db")
}

/// Directory for the JSONL verification trace.
pub fn trace_dir() -> PathBuf {
    data_dir().join("trace")
}
