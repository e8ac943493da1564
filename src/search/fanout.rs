use crate::db::poem_repository::PoemRepository;
use crate::db::story_repository::StoryRepository;
use crate::db::video_repository::VideoRepository;
use crate::models::search::{SearchOutcome, SearchableItem};
use crate::search::matching::{match_items, SearchQuery};
use crate::search::ranking::rank;

/// Run a search across the stories, videos and poems collections.
///
/// The three collections are read concurrently and in full; matching and
/// ranking happen here. A failed poems read counts as zero poems. A failed
/// stories or videos read fails the whole search and discards everything
/// else that was fetched.
pub async fn search_collections(
    stories: &dyn StoryRepository,
    videos: &dyn VideoRepository,
    poems: &dyn PoemRepository,
    query: &SearchQuery,
) -> SearchOutcome {
    let (story_docs, video_docs, poem_docs) =
        futures::join!(stories.list_all(), videos.list_all(), poems.list_all());

    let story_docs = match story_docs {
        Ok(docs) => docs,
        Err(e) => {
            tracing::error!("Search error reading stories: {e}");
            return SearchOutcome::failed();
        }
    };

    let video_docs = match video_docs {
        Ok(docs) => docs,
        Err(e) => {
            tracing::error!("Search error reading videos: {e}");
            return SearchOutcome::failed();
        }
    };

    let poem_docs = poem_docs.unwrap_or_else(|e| {
        tracing::debug!("No poems collection found or error searching poems: {e}");
        Vec::new()
    });

    let items = story_docs
        .into_iter()
        .map(SearchableItem::Story)
        .chain(video_docs.into_iter().map(SearchableItem::Video))
        .chain(poem_docs.into_iter().map(SearchableItem::Poem));

    let mut results = match_items(items, query);
    rank(&mut results);

    if results.is_empty() {
        tracing::debug!("No results found for query: {}", query.as_str());
    }

    SearchOutcome::Matches { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::content::{ContentQuery, NewStory, Poem, Story, Video};
    use crate::models::search::{MatchField, SEARCH_FAILED_MESSAGE};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // -- In-memory collections --

    #[derive(Default)]
    struct Stories {
        docs: Vec<Story>,
        fail: bool,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl StoryRepository for Stories {
        async fn list(&self, _query: &ContentQuery) -> Result<Vec<Story>, AppError> {
            Ok(self.docs.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Story>, AppError> {
            Ok(self.docs.iter().find(|s| s.id == id).cloned())
        }

        async fn list_code_stories(&self, _language: Option<&str>) -> Result<Vec<Story>, AppError> {
            Ok(self.docs.iter().filter(|s| s.is_code_story).cloned().collect())
        }

        async fn list_all(&self) -> Result<Vec<Story>, AppError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Database("stories unavailable".into()));
            }
            Ok(self.docs.clone())
        }

        async fn insert(&self, _story: NewStory) -> Result<String, AppError> {
            Err(AppError::Internal("read-only".into()))
        }
    }

    #[derive(Default)]
    struct Videos {
        docs: Vec<Video>,
        fail: bool,
    }

    #[async_trait]
    impl VideoRepository for Videos {
        async fn list(&self, _query: &ContentQuery) -> Result<Vec<Video>, AppError> {
            Ok(self.docs.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Video>, AppError> {
            Ok(self.docs.iter().find(|v| v.id == id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Video>, AppError> {
            if self.fail {
                return Err(AppError::Database("videos unavailable".into()));
            }
            Ok(self.docs.clone())
        }
    }

    #[derive(Default)]
    struct Poems {
        docs: Vec<Poem>,
        fail: bool,
    }

    #[async_trait]
    impl PoemRepository for Poems {
        async fn list(&self, _limit: i64) -> Result<Vec<Poem>, AppError> {
            Ok(self.docs.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Poem>, AppError> {
            Ok(self.docs.iter().find(|p| p.id == id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Poem>, AppError> {
            if self.fail {
                return Err(AppError::Database("ns not found".into()));
            }
            Ok(self.docs.clone())
        }
    }

    fn story(id: &str, title: &str, description: &str, content: &str) -> Story {
        Story {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            age_group: "3-6".to_string(),
            ..Default::default()
        }
    }

    fn video(id: &str, title: &str, description: &str) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            thumbnail_url: None,
            age_group: "3-6".to_string(),
            created_at: None,
        }
    }

    fn poem(id: &str, title: &str, content: &str) -> Poem {
        Poem {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            content: content.to_string(),
            age_group: String::new(),
            created_at: None,
        }
    }

    fn query(q: &str) -> SearchQuery {
        SearchQuery::parse(q).unwrap()
    }

    #[tokio::test]
    async fn test_dragon_example_orders_title_before_description() {
        // Videos are listed first in the store, but the story title match wins.
        let stories = Stories {
            docs: vec![story("s1", "The Dragon's Nap", "", "")],
            ..Default::default()
        };
        let videos = Videos {
            docs: vec![video("v1", "Bedtime", "a dragon appears")],
            ..Default::default()
        };
        let poems = Poems::default();

        let outcome = search_collections(&stories, &videos, &poems, &query("dragon")).await;
        let results = outcome.results();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item.id(), "s1");
        assert_eq!(results[0].match_field, MatchField::Title);
        assert_eq!(results[1].item.id(), "v1");
        assert_eq!(results[1].match_field, MatchField::Description);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_not_failed() {
        let stories = Stories {
            docs: vec![story("s1", "Moon", "", "")],
            ..Default::default()
        };
        let videos = Videos::default();
        let poems = Poems::default();

        let outcome = search_collections(&stories, &videos, &poems, &query("xyz")).await;
        assert!(!outcome.is_failed());
        assert!(outcome.results().is_empty());
    }

    #[tokio::test]
    async fn test_title_tag_even_when_content_also_matches() {
        let stories = Stories {
            docs: vec![story("s1", "Dragon Day", "dragon", "dragon dragon")],
            ..Default::default()
        };
        let outcome = search_collections(
            &stories,
            &Videos::default(),
            &Poems::default(),
            &query("DRAGON"),
        )
        .await;
        assert_eq!(outcome.results()[0].match_field, MatchField::Title);
    }

    #[tokio::test]
    async fn test_stories_failure_discards_video_matches() {
        let stories = Stories {
            fail: true,
            ..Default::default()
        };
        let videos = Videos {
            docs: vec![video("v1", "Dragon Dance", "")],
            ..Default::default()
        };

        let outcome =
            search_collections(&stories, &videos, &Poems::default(), &query("dragon")).await;

        assert_eq!(
            outcome,
            SearchOutcome::Failed {
                message: SEARCH_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_videos_failure_fails_search() {
        let stories = Stories {
            docs: vec![story("s1", "Dragon", "", "")],
            ..Default::default()
        };
        let videos = Videos {
            fail: true,
            ..Default::default()
        };

        let outcome =
            search_collections(&stories, &videos, &Poems::default(), &query("dragon")).await;
        assert!(outcome.is_failed());
    }

    #[tokio::test]
    async fn test_poems_failure_is_swallowed() {
        let stories = Stories {
            docs: vec![story("s1", "Dragon", "", "")],
            ..Default::default()
        };
        let poems = Poems {
            docs: vec![poem("p1", "Dragon Rhyme", "")],
            fail: true,
        };

        let outcome =
            search_collections(&stories, &Videos::default(), &poems, &query("dragon")).await;
        assert!(!outcome.is_failed());
        assert_eq!(outcome.results().len(), 1);
        assert_eq!(outcome.results()[0].item.id(), "s1");
    }

    #[tokio::test]
    async fn test_poems_are_searched() {
        let poems = Poems {
            docs: vec![poem("p1", "Twinkle", "up above the world")],
            ..Default::default()
        };
        let outcome = search_collections(
            &Stories::default(),
            &Videos::default(),
            &poems,
            &query("world"),
        )
        .await;
        assert_eq!(outcome.results().len(), 1);
        assert_eq!(outcome.results()[0].match_field, MatchField::Content);
    }

    #[tokio::test]
    async fn test_each_collection_read_once() {
        let stories = Stories::default();
        search_collections(&stories, &Videos::default(), &Poems::default(), &query("a")).await;
        assert_eq!(stories.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mixed_ranking_across_types() {
        let stories = Stories {
            docs: vec![
                story("s-content", "Bedtime", "", "the dragon sleeps"),
                story("s-title", "Dragon Tales", "", ""),
            ],
            ..Default::default()
        };
        let videos = Videos {
            docs: vec![
                video("v-desc", "Colors", "dragon colors"),
                video("v-title", "Dragon Song", ""),
            ],
            ..Default::default()
        };
        let poems = Poems {
            docs: vec![poem("p-title", "Dragon Rhyme", "")],
            ..Default::default()
        };

        let outcome = search_collections(&stories, &videos, &poems, &query("dragon")).await;
        let ids: Vec<&str> = outcome.results().iter().map(|r| r.item.id()).collect();
        assert_eq!(
            ids,
            vec!["p-title", "s-title", "v-title", "v-desc", "s-content"]
        );
    }
}
