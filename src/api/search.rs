use serde::Deserialize;

use crate::error::AppError;
use crate::models::search::SearchOutcome;
use crate::search::fanout::search_collections;
use crate::search::matching::SearchQuery;

/// Query parameters for `GET /api/v1/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Run a search against the application's repositories.
///
/// Blank input is rejected here, before any collection is read.
pub async fn process_search(
    state: &crate::app::AppState,
    raw_query: &str,
) -> Result<SearchOutcome, AppError> {
    let query = SearchQuery::parse(raw_query)
        .ok_or_else(|| AppError::BadRequest("Search query cannot be empty".into()))?;

    Ok(search_collections(
        state.story_repo.as_ref(),
        state.video_repo.as_ref(),
        state.poem_repo.as_ref(),
        &query,
    )
    .await)
}

/// Axum handler for `GET /api/v1/search?q=...`.
///
/// A failed collection read still answers 200, with a `failed` outcome.
pub async fn search_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<SearchParams>,
) -> Result<axum::Json<SearchOutcome>, AppError> {
    let outcome = process_search(&state, &params.q).await?;
    Ok(axum::Json(outcome))
}
