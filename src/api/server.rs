use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::report;
use crate::scoring::verifier::Verifier;
use crate::store::ops;
use crate::store::types::KnowledgeWrite;

#[inline]
fn now_sec() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub struct AppState {
    pub db_path: String,
    pub conn: Mutex<rusqlite::Connection>,
}

type Reply = (StatusCode, Json<Value>);

fn db_unavailable() -> Reply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "store unavailable" })),
    )
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, rusqlite::Connection>, Reply> {
    state.conn.lock().map_err(|_| db_unavailable())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/api/add-knowledge", post(add_knowledge))
        .route("/api/verify", post(verify))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "db": state.db_path })),
    )
}

async fn status(State(state): State<Arc<AppState>>) -> Reply {
    let conn = match lock(&state) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let counts = (|| -> anyhow::Result<Value> {
        Ok(json!({
            "patterns": ops::count_patterns(&conn)?,
            "knowledge": ops::count_knowledge(&conn)?,
            "insights": ops::count_insights(&conn)?,
            "analogies": ops::count_analogies(&conn)?,
        }))
    })();
    match counts {
        Ok(mut v) => {
            let latest = ops::latest_run(&conn).ok().flatten();
            v["latest_overall"] = match latest {
                Some(run) => json!(run.overall),
                None => Value::Null,
            };
            (StatusCode::OK, Json(v))
        }
        Err(e) => {
            tracing::error!("status query failed: {e}");
            db_unavailable()
        }
    }
}

#[derive(Deserialize)]
struct AddKnowledgeReq {
    content: String,
    #[serde(default)]
    source: Option<String>,
}

async fn add_knowledge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddKnowledgeReq>,
) -> Reply {
    let content = req.content.trim();
    if content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "content must not be empty" })),
        );
    }
    let conn = match lock(&state) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let write = KnowledgeWrite {
        content,
        source: req.source.as_deref().unwrap_or("api"),
        ts: now_sec(),
    };
    match ops::record_knowledge(&conn, write) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))),
        Err(e) => {
            tracing::error!("add-knowledge failed: {e}");
            db_unavailable()
        }
    }
}

async fn verify(State(state): State<Arc<AppState>>) -> Reply {
    let conn = match lock(&state) {
        Ok(c) => c,
        Err(r) => return r,
    };
    match Verifier::default().run(&conn) {
        Ok(rep) => {
            report::append_trace(config::trace_dir(), &rep);
            match serde_json::to_value(report::envelope(&rep)) {
                Ok(v) => (StatusCode::OK, Json(v)),
                Err(e) => {
                    tracing::error!("report serialization failed: {e}");
                    db_unavailable()
                }
            }
        }
        Err(e) => {
            tracing::error!("verification failed: {e}");
            db_unavailable()
        }
    }
}
