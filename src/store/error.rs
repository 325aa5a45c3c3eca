use thiserror::Error;

/// Failures opening or migrating the verax store. Query-level errors
/// stay `rusqlite::Error` inside `ops` and surface through `anyhow`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("data dir: {0}")]
    Io(#[from] std::io::Error),
}
