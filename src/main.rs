#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use kidzone::app::{shell, App, AppState};
    use kidzone::auth::admin::AdminAuth;
    use kidzone::config::AppConfig;
    use kidzone::db::poem_repository::{MongoPoemRepository, PoemRepository};
    use kidzone::db::story_repository::{MongoStoryRepository, StoryRepository};
    use kidzone::db::video_repository::{MongoVideoRepository, VideoRepository};
    use kidzone::storage::client::{S3StorageClient, StorageClient};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::services::ServeDir;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kidzone=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting KidZone server...");

    let config = AppConfig::load()?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to load Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    // Connect to MongoDB
    let mongo_client = mongodb::Client::with_uri_str(&config.database.uri)
        .await
        .context("Failed to connect to MongoDB")?;
    let mongo_db = mongo_client.database(&config.database.name);

    let story_repo: Arc<dyn StoryRepository> = Arc::new(MongoStoryRepository::new(&mongo_db));
    let video_repo: Arc<dyn VideoRepository> = Arc::new(MongoVideoRepository::new(&mongo_db));
    let poem_repo: Arc<dyn PoemRepository> = Arc::new(MongoPoemRepository::new(&mongo_db));

    tracing::info!(
        "Using MongoDB database '{}' at {}",
        config.database.name,
        config.database.redacted_uri()
    );

    // Connect to S3
    let storage_client: Arc<dyn StorageClient> =
        Arc::new(S3StorageClient::from_config(&config.storage).await);

    tracing::info!("S3 storage client initialized for bucket '{}'", config.storage.bucket);

    let admin_auth = Arc::new(AdminAuth::new(config.admin.password.clone()));
    if !admin_auth.is_enabled() {
        tracing::warn!("No admin password configured; the admin dashboard is locked");
    }

    let app_state = AppState {
        story_repo,
        video_repo,
        poem_repo,
        storage_client,
        admin_auth,
        leptos_options: leptos_options.clone(),
    };

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let app = kidzone::api::routes::api_routes()
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// Client-side hydration is handled by lib.rs::hydrate()
#[cfg(not(feature = "ssr"))]
fn main() {}
