use serde::Deserialize;

use crate::db::poem_repository::PoemRepository;
use crate::db::story_repository::StoryRepository;
use crate::db::video_repository::VideoRepository;
use crate::error::AppError;
use crate::models::content::{
    AgeGroup, ContentQuery, Poem, Story, Video, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};

/// Query string accepted by the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub age_group: Option<String>,
    pub limit: Option<i64>,
}

impl ListParams {
    /// Validate the age group and clamp the limit into `1..=MAX_LIST_LIMIT`.
    pub fn into_query(self) -> Result<ContentQuery, AppError> {
        let age_group = match self.age_group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                AgeGroup::parse(raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown age group '{raw}'")))?,
            ),
        };

        Ok(ContentQuery::for_age(age_group).with_limit(clamp_limit(self.limit)))
    }
}

/// Query string of the code stories listing.
#[derive(Debug, Default, Deserialize)]
pub struct CodeStoryParams {
    pub lang: Option<String>,
}

impl CodeStoryParams {
    /// The programming language to filter on. Blank and `all` mean no filter.
    pub fn language(&self) -> Option<&str> {
        self.lang
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty() && !lang.eq_ignore_ascii_case("all"))
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

pub async fn fetch_story(repo: &dyn StoryRepository, id: &str) -> Result<Story, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Story not found".into()))
}

pub async fn fetch_video(repo: &dyn VideoRepository, id: &str) -> Result<Video, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}

pub async fn fetch_poem(repo: &dyn PoemRepository, id: &str) -> Result<Poem, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poem not found".into()))
}

/// Axum handler for `GET /api/v1/stories`.
pub async fn list_stories_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<ListParams>,
) -> Result<axum::Json<Vec<Story>>, AppError> {
    let query = params.into_query()?;
    Ok(axum::Json(state.story_repo.list(&query).await?))
}

/// Axum handler for `GET /api/v1/code-stories`.
pub async fn list_code_stories_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<CodeStoryParams>,
) -> Result<axum::Json<Vec<Story>>, AppError> {
    Ok(axum::Json(state.story_repo.list_code_stories(params.language()).await?))
}

/// Axum handler for `GET /api/v1/stories/{id}`.
pub async fn get_story_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Story>, AppError> {
    Ok(axum::Json(fetch_story(state.story_repo.as_ref(), &id).await?))
}

/// Axum handler for `GET /api/v1/videos`.
pub async fn list_videos_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<ListParams>,
) -> Result<axum::Json<Vec<Video>>, AppError> {
    let query = params.into_query()?;
    Ok(axum::Json(state.video_repo.list(&query).await?))
}

/// Axum handler for `GET /api/v1/videos/{id}`.
pub async fn get_video_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Video>, AppError> {
    Ok(axum::Json(fetch_video(state.video_repo.as_ref(), &id).await?))
}

/// Axum handler for `GET /api/v1/poems`. Poems have no age filter.
pub async fn list_poems_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<ListParams>,
) -> Result<axum::Json<Vec<Poem>>, AppError> {
    Ok(axum::Json(state.poem_repo.list(clamp_limit(params.limit)).await?))
}

/// Axum handler for `GET /api/v1/poems/{id}`.
pub async fn get_poem_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Poem>, AppError> {
    Ok(axum::Json(fetch_poem(state.poem_repo.as_ref(), &id).await?))
}
