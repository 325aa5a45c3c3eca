use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::tempdir;
use tower::ServiceExt;

use verax::api::server::{router, AppState};
use verax::store::{self, ops};

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn add_knowledge_rejects_blank_content() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("v.db");
    let conn = store::open(&db).unwrap();
    let app = router(Arc::new(AppState {
        db_path: db.display().to_string(),
        conn: Mutex::new(conn),
    }));

    let resp = app
        .oneshot(post_json("/api/add-knowledge", r#"{"content":"   "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // nothing was stored
    let check = store::open(&db).unwrap();
    assert_eq!(ops::count_knowledge(&check).unwrap(), 0);
}

#[tokio::test]
async fn add_knowledge_records_and_returns_the_id() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("v.db");
    let conn = store::open(&db).unwrap();
    let app = router(Arc::new(AppState {
        db_path: db.display().to_string(),
        conn: Mutex::new(conn),
    }));

    let resp = app
        .oneshot(post_json(
            "/api/add-knowledge",
            r#"{"content":"entropy rises","source":"test"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let v = body_json(resp).await;
    assert!(v["id"].as_i64().unwrap() >= 1);

    let check = store::open(&db).unwrap();
    assert_eq!(ops::count_knowledge(&check).unwrap(), 1);
}

#[tokio::test]
async fn health_and_status_report_the_store() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("v.db");
    let conn = store::open(&db).unwrap();
    let app = router(Arc::new(AppState {
        db_path: db.display().to_string(),
        conn: Mutex::new(conn),
    }));

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "ok");

    let resp = app
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["patterns"], 0);
    assert_eq!(v["knowledge"], 0);
    assert!(v["latest_overall"].is_null());
}
