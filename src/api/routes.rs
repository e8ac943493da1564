use axum::routing::{get, post};
use axum::Router;

use crate::api::{admin, content, search, upload};
use crate::app::AppState;
use crate::auth::admin as admin_auth;

/// JSON API routes, without the Leptos pages.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", get(search::search_handler))
        .route("/api/v1/stories", get(content::list_stories_handler))
        .route("/api/v1/stories/{id}", get(content::get_story_handler))
        .route("/api/v1/code-stories", get(content::list_code_stories_handler))
        .route("/api/v1/videos", get(content::list_videos_handler))
        .route("/api/v1/videos/{id}", get(content::get_video_handler))
        .route("/api/v1/poems", get(content::list_poems_handler))
        .route("/api/v1/poems/{id}", get(content::get_poem_handler))
        .route("/api/v1/image/{filename}", get(upload::serve_image_handler))
        .route("/api/v1/admin/stories", post(admin::create_story_handler))
        .route("/api/auth/login", post(admin_auth::login_handler))
        .route("/api/auth/me", get(admin_auth::me_handler))
        .route("/api/auth/logout", post(admin_auth::logout_handler))
}
