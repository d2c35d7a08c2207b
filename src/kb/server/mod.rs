// SPDX-License-Identifier: MIT

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adk::error::WorkflowError;
use crate::kb::ingest::{chunk_bytes, TextSplitter};
use crate::kb::store::VectorStore;
use crate::kb::workflow::graph::WorkflowGraph;

/// Shared handles for request handlers
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<WorkflowGraph>,
    pub store: VectorStore,
    pub splitter: TextSplitter,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/upload", post(upload))
        .route("/query", get(query))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let chunks = chunk_bytes(&body, &state.splitter)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
    let count = chunks.len();

    state.store.add(chunks).await.map_err(|e| {
        log::error!("Indexing failed: {}", e);
        error_response(StatusCode::BAD_GATEWAY, format!("Indexing failed: {}", e))
    })?;

    log::info!("Ingested upload of {} bytes as {} chunks", body.len(), count);
    Ok(Json(json!({ "status": "ok", "chunks": count })))
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    question: Option<String>,
}

async fn query(State(state): State<AppState>, Query(params): Query<QueryParams>) -> ApiResult {
    let question = params.question.unwrap_or_default();

    match state.graph.run_workflow(&question).await {
        Ok(outcome) => Ok(Json(json!(outcome))),
        Err(e) if e.downcast_ref::<WorkflowError>().is_some() => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            log::error!("Workflow failed: {}", e);
            Err(error_response(
                StatusCode::BAD_GATEWAY,
                format!("Execution failed: {}", e),
            ))
        }
    }
}
