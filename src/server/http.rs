use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::core::types::DocRequest;
use crate::repo::IndexRepo;
use crate::search::engine::Engine;

#[derive(Deserialize)]
struct IndexPayload {
    content: String,
    doc: String,
}

#[derive(Deserialize)]
struct AliasPayload {
    #[serde(rename = "as")]
    alias: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Serialize)]
struct SearchRow {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_doc")]
    doc: Value,
    hits: u32,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchRow>,
}

pub fn router(repo: Arc<IndexRepo>) -> Router {
    Router::new()
        .route("/api/search/:name", get(handle_search))
        .route("/api/index/:name", post(handle_index_put).put(handle_index_put).delete(handle_index_drop))
        .route("/api/alias/:name", post(handle_alias_put).put(handle_alias_put).delete(handle_alias_drop))
        .route("/_health/", get(handle_health))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .with_state(repo)
}

async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// The raw document content re-parsed as a JSON object when it parses as
/// one, an empty object otherwise (spec.md §6.2).
fn reparse_doc(raw: &str) -> Value {
    match serde_json::from_str::<Map<String, Value>>(raw) {
        Ok(map) => Value::Object(map),
        Err(_) => Value::Object(Map::new()),
    }
}

async fn handle_search(
    State(repo): State<Arc<IndexRepo>>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let terms = match params.get("terms") {
        Some(terms) => terms.clone(),
        None => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match repo.search(&name, &terms, Engine::Hits).await {
        Ok(results) => {
            let rows = results
                .into_iter()
                .map(|r| SearchRow {
                    id: r.document.id,
                    doc: reparse_doc(&r.document.raw),
                    hits: r.hits,
                })
                .collect();
            (StatusCode::OK, Json(SearchResponse { results: rows })).into_response()
        }
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                message: "Index not found".to_string(),
            }),
        )
            .into_response(),
    }
}

async fn handle_index_put(
    State(repo): State<Arc<IndexRepo>>,
    Path(name): Path<String>,
    Json(payload): Json<IndexPayload>,
) -> Response {
    if payload.content.is_empty() || payload.doc.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }
    repo.put(&name, DocRequest::new(payload.doc, payload.content)).await;
    StatusCode::ACCEPTED.into_response()
}

async fn handle_index_drop(State(repo): State<Arc<IndexRepo>>, Path(name): Path<String>) -> Response {
    if repo.drop_index(&name) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn handle_alias_put(
    State(repo): State<Arc<IndexRepo>>,
    Path(name): Path<String>,
    Json(payload): Json<AliasPayload>,
) -> Response {
    let alias = payload.alias.trim();
    if alias.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }
    if repo.alias(alias, &name) {
        (
            StatusCode::CREATED,
            [("location", format!("/api/index/{}", alias))],
        )
            .into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn handle_alias_drop(State(repo): State<Arc<IndexRepo>>, Path(alias): Path<String>) -> Response {
    if repo.unalias(&alias, "") {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
