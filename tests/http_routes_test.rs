// ==========================================
// HTTP route integration tests
// ==========================================
// The route layer is a thin mapping over the API facades; these tests
// pin the status-code contract: 200 with statistics for partial row
// failures, 404/400/500 only for whole-file or input problems.
// ==========================================


use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use billing_hub::app::{router, AppState};
use billing_hub::logging;
use billing_hub::settings::Settings;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};
use test_helpers::write_csv;
use tower::ServiceExt;

fn test_app() -> (NamedTempFile, TempDir, Router) {
    let db_file = NamedTempFile::new().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();

    let settings = Settings {
        db_path: db_file.path().to_str().unwrap().to_string(),
        upload_dir: upload_dir.path().to_path_buf(),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let state = Arc::new(AppState::new(settings).unwrap());
    (db_file, upload_dir, router(state))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_files_empty_dir_is_404() {
    logging::init_test();
    let (_db, _upload, app) = test_app();

    let response = app.oneshot(get("/files")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_view_files() {
    logging::init_test();
    let (_db, upload, app) = test_app();
    write_csv(upload.path(), "users.csv", "Id_user,users_name\n1,Alice\n");

    let response = app.clone().oneshot(get("/files")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!(["users.csv"]));

    let response = app.oneshot(get("/view/users.csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = json_body(response).await;
    assert_eq!(rows[0]["users_name"], "Alice");
}

#[tokio::test]
async fn test_import_endpoint_returns_statistics() {
    logging::init_test();
    let (_db, upload, app) = test_app();
    // one bad row: still a 200, the failure lives in the statistics
    write_csv(
        upload.path(),
        "users.csv",
        "Id_user,users_name\n1,Alice\n,NoKey\n2,Bob\n",
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import/users.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["import"]["inserted"], 2);
    assert_eq!(body["import"]["failed"], 1);
    assert_eq!(body["import"]["found"], true);
}

#[tokio::test]
async fn test_import_missing_file_is_404() {
    logging::init_test();
    let (_db, _upload, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import/transaction.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["import"]["found"], false);
}

#[tokio::test]
async fn test_import_unknown_file_is_400() {
    logging::init_test();
    let (_db, upload, app) = test_app();
    write_csv(upload.path(), "mystery.csv", "a,b\n1,2\n");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import/mystery.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_users_crud_over_http() {
    logging::init_test();
    let (_db, _upload, app) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            serde_json::json!({
                "Id_user": 1,
                "users_name": "Alice",
                "Email": "alice@example.com"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(get("/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["users_name"], "Alice");

    // update without the required Email is rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/users/1",
            serde_json::json!({ "users_name": "Alicia" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_file_rejects_bad_payload() {
    logging::init_test();
    let (_db, upload, app) = test_app();
    write_csv(upload.path(), "users.csv", "Id_user,users_name\n1,Alice\n");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/update/users.csv",
            serde_json::json!({ "not": "an array" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_endpoints_respond() {
    logging::init_test();
    let (_db, upload, app) = test_app();
    write_csv(
        upload.path(),
        "users.csv",
        "Id_user,users_name,Email\n1,Alice,alice@example.com\n",
    );
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import/users.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/report/transactions-by-user"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = json_body(response).await;
    assert_eq!(rows[0]["total_transactions"], 0);

    let response = app
        .clone()
        .oneshot(get("/report/billed-amount-by-user"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/report/pending-invoices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}
