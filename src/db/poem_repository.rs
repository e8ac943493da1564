use async_trait::async_trait;

use crate::error::AppError;
use crate::models::content::Poem;

/// Repository trait for the `poems` collection.
///
/// Deployments may not have this collection at all; callers that search it
/// treat a failure as "no poems".
#[async_trait]
pub trait PoemRepository: Send + Sync {
    /// Newest poems first, at most `limit`.
    async fn list(&self, limit: i64) -> Result<Vec<Poem>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Poem>, AppError>;

    /// Read the whole collection, unfiltered and unordered.
    async fn list_all(&self) -> Result<Vec<Poem>, AppError>;
}

#[cfg(feature = "ssr")]
pub struct MongoPoemRepository {
    collection: mongodb::Collection<crate::db::models::PoemRecord>,
}

#[cfg(feature = "ssr")]
impl MongoPoemRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(crate::models::content::ContentType::Poem.collection()),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl PoemRepository for MongoPoemRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Poem>, AppError> {
        use futures::TryStreamExt;

        let query = crate::models::content::ContentQuery::for_age(None).with_limit(limit);
        let (filter, options) = crate::db::models::listing(&query);

        let records: Vec<_> = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(Poem::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Poem>, AppError> {
        self.collection
            .find_one(crate::db::models::id_filter(id))
            .await
            .map(|record| record.map(Poem::from))
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Poem>, AppError> {
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

        Ok(records.into_iter().map(Poem::from).collect())
    }
}
