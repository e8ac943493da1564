use async_trait::async_trait;

use crate::error::AppError;
use crate::models::content::{ContentQuery, Video};

/// Repository trait for the `videos` collection.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// List videos, newest first, honoring the query's age group and limit.
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Video>, AppError>;

    /// Find a video by its key.
    async fn find_by_id(&self, id: &str) -> Result<Option<Video>, AppError>;

    /// Read the whole collection, unfiltered and unordered.
    async fn list_all(&self) -> Result<Vec<Video>, AppError>;
}

/// MongoDB implementation of the VideoRepository.
#[cfg(feature = "ssr")]
pub struct MongoVideoRepository {
    collection: mongodb::Collection<crate::db::models::VideoRecord>,
}

#[cfg(feature = "ssr")]
impl MongoVideoRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(crate::models::content::ContentType::Video.collection()),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl VideoRepository for MongoVideoRepository {
    async fn list(&self, query: &ContentQuery) -> Result<Vec<Video>, AppError> {
        use futures::TryStreamExt;

        let (filter, options) = crate::db::models::listing(query);

        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut videos = Vec::new();
        while let Some(record) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            videos.push(Video::from(record));
        }

        Ok(videos)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Video>, AppError> {
        self.collection
            .find_one(crate::db::models::id_filter(id))
            .await
            .map(|record| record.map(Video::from))
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Video>, AppError> {
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

        Ok(records.into_iter().map(Video::from).collect())
    }
}
