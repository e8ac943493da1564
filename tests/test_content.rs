mod common;

use common::{poem_doc, story_doc, video_doc};
use mongodb::bson::doc;

#[tokio::test]
async fn list_stories_filters_by_age_group() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.seed(
        "stories",
        vec![
            story_doc("s1", "Peekaboo", "", "", "0-3"),
            story_doc("s2", "Counting Sheep", "", "", "3-6"),
            story_doc("s3", "Blocks", "", "", "0-3"),
        ],
    )
    .await;

    let response = server
        .get("/api/v1/stories")
        .add_query_param("age_group", "0-3")
        .await;

    let stories: Vec<serde_json::Value> = response.json();
    assert_eq!(stories.len(), 2);
    assert!(stories.iter().all(|s| s["age_group"] == "0-3"));
}

#[tokio::test]
async fn list_stories_newest_first_with_limit() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let at = |millis: i64| mongodb::bson::DateTime::from_millis(millis);
    env.seed(
        "stories",
        vec![
            doc! { "_id": "old", "title": "Old", "ageGroup": "3-6", "createdAt": at(1_000) },
            doc! { "_id": "new", "title": "New", "ageGroup": "3-6", "createdAt": at(3_000) },
            doc! { "_id": "mid", "title": "Mid", "ageGroup": "3-6", "createdAt": at(2_000) },
        ],
    )
    .await;

    let response = server
        .get("/api/v1/stories")
        .add_query_param("limit", 2)
        .await;

    let stories: Vec<serde_json::Value> = response.json();
    let ids: Vec<&str> = stories.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["new", "mid"]);
}

#[tokio::test]
async fn list_rejects_unknown_age_group() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .get("/api/v1/videos")
        .add_query_param("age_group", "teens")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn get_story_by_id() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.seed(
        "stories",
        vec![story_doc("s1", "The Dragon's Nap", "Sleepy", "# Zzz", "3-6")],
    )
    .await;

    let response = server.get("/api/v1/stories/s1").await;

    let story: serde_json::Value = response.json();
    assert_eq!(story["title"], "The Dragon's Nap");
    assert_eq!(story["content"], "# Zzz");
}

#[tokio::test]
async fn get_missing_content_returns_404() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/v1/stories/nope").await;
    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Story not found");

    server.get("/api/v1/videos/nope").await.assert_status_not_found();
    server.get("/api/v1/poems/nope").await.assert_status_not_found();
}

#[tokio::test]
async fn get_video_and_poem_by_id() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    env.seed("videos", vec![video_doc("v1", "Colors", "Learn colors", "0-3")]).await;
    env.seed("poems", vec![poem_doc("p1", "Twinkle", "Little star")]).await;

    let video: serde_json::Value = server.get("/api/v1/videos/v1").await.json();
    assert_eq!(video["title"], "Colors");
    assert_eq!(video["video_url"], "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

    let poems: Vec<serde_json::Value> = server.get("/api/v1/poems").await.json();
    assert_eq!(poems.len(), 1);

    let poem: serde_json::Value = server.get("/api/v1/poems/p1").await.json();
    assert_eq!(poem["content"], "Little star");
}

#[tokio::test]
async fn object_id_keys_are_served_as_hex() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let oid = mongodb::bson::oid::ObjectId::new();
    env.seed(
        "stories",
        vec![doc! { "_id": oid, "title": "Generated key", "ageGroup": "6-9" }],
    )
    .await;

    let stories: Vec<serde_json::Value> = server.get("/api/v1/stories").await.json();
    assert_eq!(stories[0]["id"], oid.to_hex());

    let story: serde_json::Value = server
        .get(&format!("/api/v1/stories/{}", oid.to_hex()))
        .await
        .json();
    assert_eq!(story["title"], "Generated key");
}

#[tokio::test]
async fn list_code_stories_filters_by_language() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let mut loops = story_doc("c1", "Loop the Loop", "", "", "9-12");
    loops.insert("isCodeStory", true);
    loops.insert("programmingLanguage", "Python");
    let mut pages = story_doc("c2", "My First Page", "", "", "9-12");
    pages.insert("isCodeStory", true);
    pages.insert("programmingLanguage", "HTML");
    let mut plain = story_doc("s1", "Python the Snake", "", "", "3-6");
    plain.insert("programmingLanguage", "python");
    env.seed("stories", vec![loops, pages, plain]).await;

    let all: Vec<serde_json::Value> = server.get("/api/v1/code-stories").await.json();
    let mut ids: Vec<_> = all.iter().map(|s| s["id"].as_str().unwrap_or_default()).collect();
    ids.sort();
    assert_eq!(ids, vec!["c1", "c2"]);

    let python: Vec<serde_json::Value> = server
        .get("/api/v1/code-stories")
        .add_query_param("lang", "python")
        .await
        .json();
    assert_eq!(python.len(), 1);
    assert_eq!(python[0]["id"], "c1");
    assert_eq!(python[0]["is_code_story"], true);

    let everything: Vec<serde_json::Value> = server
        .get("/api/v1/code-stories")
        .add_query_param("lang", "all")
        .await
        .json();
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn get_story_includes_translations() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let mut story = story_doc("s1", "The Moon", "Night sky", "Hello moon", "0-3");
    story.insert(
        "translations",
        doc! { "Urdu": { "title": "Chand", "content": "Salam chand" } },
    );
    env.seed("stories", vec![story]).await;

    let body: serde_json::Value = server.get("/api/v1/stories/s1").await.json();
    assert_eq!(body["translations"]["Urdu"]["title"], "Chand");
    assert_eq!(body["translations"]["Urdu"]["description"], "");
}
