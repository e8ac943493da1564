use async_trait::async_trait;

use crate::error::AppError;
use crate::models::content::{ContentQuery, NewStory, Story};

/// Repository trait for the `stories` collection.
///
/// This trait allows mocking the database layer in tests.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// List stories, newest first, honoring the query's age group and limit.
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Story>, AppError>;

    /// Find a story by its key.
    async fn find_by_id(&self, id: &str) -> Result<Option<Story>, AppError>;

    /// List code stories, newest first, optionally for one programming
    /// language (case-insensitive).
    async fn list_code_stories(&self, language: Option<&str>) -> Result<Vec<Story>, AppError>;

    /// Read the whole collection, unfiltered and unordered.
    async fn list_all(&self) -> Result<Vec<Story>, AppError>;

    /// Insert a new story and return its key.
    async fn insert(&self, story: NewStory) -> Result<String, AppError>;
}

/// MongoDB implementation of the StoryRepository.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoStoryRepository {
    collection: mongodb::Collection<crate::db::models::StoryRecord>,
}

#[cfg(feature = "ssr")]
impl MongoStoryRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(crate::models::content::ContentType::Story.collection()),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl StoryRepository for MongoStoryRepository {
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Story>, AppError> {
        use futures::TryStreamExt;

        let (filter, options) = crate::db::models::listing(query);

        let records: Vec<_> = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(Story::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Story>, AppError> {
        let record = self
            .collection
            .find_one(crate::db::models::id_filter(id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record.map(Story::from))
    }

    async fn list_code_stories(&self, language: Option<&str>) -> Result<Vec<Story>, AppError> {
        use futures::TryStreamExt;

        let (filter, options) = crate::db::models::code_story_listing(language);

        let records: Vec<_> = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(Story::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Story>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let records: Vec<_> = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(Story::from).collect())
    }

    async fn insert(&self, story: NewStory) -> Result<String, AppError> {
        let record = crate::db::models::StoryRecord::from(story);

        let result = self
            .collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(crate::db::models::record_id(Some(&result.inserted_id)))
    }
}
