use axum::{Json, extract::State, http::StatusCode};
use chrono::Local;
use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::prompt::build_prompt;

use super::models::{SearchRequest, SearchResponse};

pub async fn search_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    // Validation happens before any prompt is built or dispatched.
    if request.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter a question about daycare prices.".to_string(),
        ));
    }

    let prompt = build_prompt(&request);
    log::info!("dispatching search, prompt length: {}", prompt.len());

    let outcome = dispatcher.dispatch(&prompt).await.map_err(|e| {
        log::error!("dispatch failed: {:#}", e);
        (
            StatusCode::BAD_GATEWAY,
            format!("An error occurred: {e}. Please check your API key and try again."),
        )
    })?;

    let last_updated = Local::now().format("%Y-%m-%d %I:%M %p").to_string();
    Ok(Json(SearchResponse::from_outcome(outcome, last_updated)))
}
