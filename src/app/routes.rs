// ==========================================
// Billing Hub - HTTP routes
// ==========================================
// Thin request/response mapping over the API facades. Partial row
// failures during an import are still a 200 with statistics; 404/500 are
// reserved for whole-file and infrastructure failures.
// ==========================================

use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::domain::{NewUser, UpdateUser};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // CSV file management
        .route("/files", get(list_files))
        .route("/view/:file", get(view_file))
        .route("/update/:file", put(update_file))
        .route("/import/:file", post(import_file))
        // users CRUD
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        // reports
        .route("/report/transactions-by-user", get(transactions_by_user))
        .route("/report/billed-amount-by-user", get(billed_amount_by_user))
        .route("/report/pending-invoices", get(pending_invoices))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_)
            | ApiError::ImportError(_)
            | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ==========================================
// CSV endpoints
// ==========================================

async fn list_files(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let files = state.csv_file_api.list_files().await?;
    Ok(Json(files).into_response())
}

async fn view_file(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let rows = state.csv_file_api.preview(&file).await?;
    Ok(Json(rows).into_response())
}

async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let rows = parse_row_objects(&payload)?;
    state.csv_file_api.update(&file, &rows).await?;
    Ok(Json(json!({ "message": "file updated" })).into_response())
}

/// The editor submits a JSON array of flat objects; anything else is a
/// client error.
fn parse_row_objects(
    payload: &serde_json::Value,
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, ApiError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| ApiError::InvalidInput("invalid data".to_string()))?;
    rows.iter()
        .map(|row| {
            row.as_object()
                .cloned()
                .ok_or_else(|| ApiError::InvalidInput("invalid data".to_string()))
        })
        .collect()
}

async fn import_file(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let stats = state.import_api.import_one(&file).await?;

    if !stats.found {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("File {} not found", file),
                "import": stats,
            })),
        )
            .into_response());
    }

    Ok(Json(json!({
        "message": format!("Import completed for {}", file),
        "import": stats,
    }))
    .into_response())
}

// ==========================================
// Users CRUD
// ==========================================

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let users = state.user_api.list_users().await?;
    Ok(Json(users).into_response())
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let user = state.user_api.get_user(id).await?;
    Ok(Json(user).into_response())
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> Result<Response, ApiError> {
    state.user_api.create_user(user).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user created" })),
    )
        .into_response())
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateUser>,
) -> Result<Response, ApiError> {
    state.user_api.update_user(id, update).await?;
    Ok(Json(json!({ "message": "user updated" })).into_response())
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.user_api.delete_user(id).await?;
    Ok(Json(json!({ "message": "user deleted" })).into_response())
}

// ==========================================
// Reports
// ==========================================

async fn transactions_by_user(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let rows = state.report_api.transactions_by_user().await?;
    Ok(Json(rows).into_response())
}

async fn billed_amount_by_user(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let rows = state.report_api.billed_amount_by_user().await?;
    Ok(Json(rows).into_response())
}

async fn pending_invoices(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let rows = state.report_api.pending_invoices().await?;
    Ok(Json(rows).into_response())
}
