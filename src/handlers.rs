use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::index::Index;
use crate::tokenize::tokenize;

/// Header and query parameter carrying the sentence. The header wins.
const SENTENCE_PARAM: &str = "q";

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordSynonyms {
    pub word: String,
    pub synonyms: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

/// `/healthz` plus a catch-all sentence endpoint. A path ending in `.json`
/// answers with JSON, anything else with plain text.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback(sentence)
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn sentence(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let sentence = match headers.get(SENTENCE_PARAM) {
        Some(value) => value
            .to_str()
            .map_err(|_| ApiError::bad_request("q header must be valid utf-8"))?
            .to_string(),
        None => {
            let Query(pairs) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
            // First `q` wins when the parameter is repeated.
            pairs
                .into_iter()
                .find(|(key, _)| key == SENTENCE_PARAM)
                .map(|(_, value)| value)
                .unwrap_or_default()
        }
    };

    let tokens = tokenize(&sentence);
    debug!("resolving {} tokens", tokens.len());
    let entries: Vec<WordSynonyms> = tokens
        .into_iter()
        .map(|word| WordSynonyms {
            synonyms: state.index.synonyms_of(&word),
            word,
        })
        .collect();

    if uri.path().ends_with(".json") {
        return Ok(Json(entries).into_response());
    }

    let body: String = entries
        .iter()
        .map(|entry| {
            format!(
                "synonyms of '{}': [{}]\n",
                entry.word,
                entry.synonyms.join(" ")
            )
        })
        .collect();
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        body,
    )
        .into_response())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
