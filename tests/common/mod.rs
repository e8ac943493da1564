#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use mongodb::bson::{doc, Document};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::minio::MinIO;
use testcontainers_modules::mongo::Mongo;

use kidzone::app::AppState;
use kidzone::auth::admin::AdminAuth;
use kidzone::db::poem_repository::{MongoPoemRepository, PoemRepository};
use kidzone::db::story_repository::{MongoStoryRepository, StoryRepository};
use kidzone::db::video_repository::{MongoVideoRepository, VideoRepository};
use kidzone::storage::client::{S3StorageClient, StorageClient};

pub const ADMIN_PASSWORD: &str = "test-password";

/// Holds running containers and provides the Axum router for integration tests.
///
/// Containers are kept alive for as long as this struct lives. When dropped,
/// containers are stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    _minio: ContainerAsync<MinIO>,
    pub db: mongodb::Database,
    pub router: Router,
    pub story_repo: Arc<dyn StoryRepository>,
    pub storage: Arc<dyn StorageClient>,
}

impl TestEnv {
    /// Spin up MongoDB and MinIO and build an Axum router wired to them.
    pub async fn start() -> Self {
        let (mongo_container, minio_container) =
            tokio::join!(Mongo::default().start(), MinIO::default().start());
        let mongo_container = mongo_container.expect("Failed to start MongoDB container");
        let minio_container = minio_container.expect("Failed to start MinIO container");

        // --- MongoDB ---
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database("kidzone_test");

        let story_repo: Arc<dyn StoryRepository> = Arc::new(MongoStoryRepository::new(&db));
        let video_repo: Arc<dyn VideoRepository> = Arc::new(MongoVideoRepository::new(&db));
        let poem_repo: Arc<dyn PoemRepository> = Arc::new(MongoPoemRepository::new(&db));

        // --- MinIO (S3) ---
        let minio_port = minio_container
            .get_host_port_ipv4(9000)
            .await
            .expect("Failed to get MinIO port");
        let minio_endpoint = format!("http://127.0.0.1:{}", minio_port);

        // Set env vars for AWS SDK to pick up MinIO credentials
        unsafe {
            std::env::set_var("AWS_ACCESS_KEY_ID", "minioadmin");
            std::env::set_var("AWS_SECRET_ACCESS_KEY", "minioadmin");
            std::env::set_var("AWS_REGION", "us-east-1");
        }

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&minio_endpoint)
            .region(aws_config::Region::new("us-east-1"))
            .load()
            .await;

        let s3_client = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::from(&s3_config)
                .force_path_style(true)
                .build(),
        );

        let bucket_name = "kidzone-test";
        let _ = s3_client.create_bucket().bucket(bucket_name).send().await;

        let storage: Arc<dyn StorageClient> =
            Arc::new(S3StorageClient::new(s3_client, bucket_name.to_string()));

        // --- Build AppState ---
        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("kidzone")
            .build();

        let app_state = AppState {
            story_repo: story_repo.clone(),
            video_repo,
            poem_repo,
            storage_client: storage.clone(),
            admin_auth: Arc::new(AdminAuth::new(Some(ADMIN_PASSWORD.to_string()))),
            leptos_options,
        };

        // API routes only, no Leptos SSR
        let router = kidzone::api::routes::api_routes().with_state(app_state);

        Self {
            _mongo: mongo_container,
            _minio: minio_container,
            db,
            router,
            story_repo,
            storage,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Insert raw documents into a collection, bypassing the repositories.
    pub async fn seed(&self, collection: &str, docs: Vec<Document>) {
        self.db
            .collection::<Document>(collection)
            .insert_many(docs)
            .await
            .expect("Failed to seed collection");
    }

    /// Helper: log in as admin; the server keeps the session cookie.
    pub async fn login(&self, server: &axum_test::TestServer) {
        server
            .post("/api/auth/login")
            .json(&serde_json::json!({ "password": ADMIN_PASSWORD }))
            .await
            .assert_status_ok();
    }
}

/// A story document as stored by the site.
pub fn story_doc(id: &str, title: &str, description: &str, content: &str, age_group: &str) -> Document {
    doc! {
        "_id": id,
        "title": title,
        "description": description,
        "content": content,
        "ageGroup": age_group,
        "createdAt": mongodb::bson::DateTime::now(),
    }
}

pub fn video_doc(id: &str, title: &str, description: &str, age_group: &str) -> Document {
    doc! {
        "_id": id,
        "title": title,
        "description": description,
        "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "ageGroup": age_group,
        "createdAt": mongodb::bson::DateTime::now(),
    }
}

pub fn poem_doc(id: &str, title: &str, content: &str) -> Document {
    doc! {
        "_id": id,
        "title": title,
        "content": content,
        "createdAt": mongodb::bson::DateTime::now(),
    }
}

/// A minimal 1x1 PNG.
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, // bit depth, color type, CRC
        0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
        0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, // compressed data
        0x00, 0x02, 0x00, 0x01, 0xE2, 0x21, 0xBC, 0x33, // CRC
        0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, // IEND chunk
        0xAE, 0x42, 0x60, 0x82,
    ]
}
