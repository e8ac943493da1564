use serde::{Deserialize, Serialize};

use crate::models::content::{ContentType, Poem, Story, Video};

/// Message carried by a failed search.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// A document from any searchable collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchableItem {
    Story(Story),
    Video(Video),
    Poem(Poem),
}

impl SearchableItem {
    pub fn content_type(&self) -> ContentType {
        match self {
            SearchableItem::Story(_) => ContentType::Story,
            SearchableItem::Video(_) => ContentType::Video,
            SearchableItem::Poem(_) => ContentType::Poem,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SearchableItem::Story(s) => &s.id,
            SearchableItem::Video(v) => &v.id,
            SearchableItem::Poem(p) => &p.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SearchableItem::Story(s) => &s.title,
            SearchableItem::Video(v) => &v.title,
            SearchableItem::Poem(p) => &p.title,
        }
    }

    pub fn age_group(&self) -> &str {
        match self {
            SearchableItem::Story(s) => &s.age_group,
            SearchableItem::Video(v) => &v.age_group,
            SearchableItem::Poem(p) => &p.age_group,
        }
    }

    /// Cover or thumbnail shown next to a search hit.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            SearchableItem::Story(s) => s.cover_image_url.as_deref(),
            SearchableItem::Video(v) => v.thumbnail_url.as_deref(),
            SearchableItem::Poem(_) => None,
        }
    }

    /// The fields a query is tested against, in priority order.
    ///
    /// Videos have no body text, so they stop at the description.
    pub fn searchable_fields(&self) -> Vec<(MatchField, &str)> {
        match self {
            SearchableItem::Story(s) => vec![
                (MatchField::Title, s.title.as_str()),
                (MatchField::Description, s.description.as_str()),
                (MatchField::Content, s.content.as_str()),
            ],
            SearchableItem::Video(v) => vec![
                (MatchField::Title, v.title.as_str()),
                (MatchField::Description, v.description.as_str()),
            ],
            SearchableItem::Poem(p) => vec![
                (MatchField::Title, p.title.as_str()),
                (MatchField::Description, p.description.as_str()),
                (MatchField::Content, p.content.as_str()),
            ],
        }
    }
}

/// The field in which a query was first found.
///
/// Variant order is the ranking order: title hits outrank description hits,
/// which outrank content hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Description,
    Content,
}

impl MatchField {
    pub fn label(&self) -> &'static str {
        match self {
            MatchField::Title => "Title match",
            MatchField::Description => "Description match",
            MatchField::Content => "Content match",
        }
    }
}

/// A document that matched a query, tagged with the field that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub item: SearchableItem,
    pub match_field: MatchField,
}

impl MatchResult {
    pub fn content_type(&self) -> ContentType {
        self.item.content_type()
    }

    pub fn detail_path(&self) -> String {
        self.content_type().detail_path(self.item.id())
    }
}

/// What a search produces: the ranked matches, or a single failure entry
/// that replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchOutcome {
    Matches { results: Vec<MatchResult> },
    Failed { message: String },
}

impl SearchOutcome {
    pub fn failed() -> Self {
        SearchOutcome::Failed {
            message: SEARCH_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed { .. })
    }

    /// The matches, or an empty slice for a failed search.
    pub fn results(&self) -> &[MatchResult] {
        match self {
            SearchOutcome::Matches { results } => results,
            SearchOutcome::Failed { .. } => &[],
        }
    }
}
