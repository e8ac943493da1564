use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for listings, matching what the browsing pages request.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Upper bound accepted from callers for a single listing.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Language of a story's own title, description and content.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Reading languages always offered on a story page.
pub const READING_LANGUAGES: [&str; 4] = [DEFAULT_LANGUAGE, "Urdu", "Sindhi", "Hindi"];

/// The kinds of content the site serves, one collection each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Story,
    Video,
    Poem,
}

impl ContentType {
    /// Display order of the result sections.
    pub const ALL: [ContentType; 3] = [ContentType::Story, ContentType::Video, ContentType::Poem];

    /// The type string, also used as the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Story => "story",
            ContentType::Video => "video",
            ContentType::Poem => "poem",
        }
    }

    /// Name of the backing collection in the document store.
    pub fn collection(&self) -> &'static str {
        match self {
            ContentType::Story => "stories",
            ContentType::Video => "videos",
            ContentType::Poem => "poems",
        }
    }

    pub fn section_title(&self) -> &'static str {
        match self {
            ContentType::Story => "Stories",
            ContentType::Video => "Videos",
            ContentType::Poem => "Poems",
        }
    }

    /// Route of the detail page for an item of this type.
    pub fn detail_path(&self, id: &str) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reader age brackets used to filter stories and videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-3")]
    Toddlers,
    #[serde(rename = "3-6")]
    Preschoolers,
    #[serde(rename = "6-9")]
    EarlyReaders,
    #[serde(rename = "9-12")]
    MiddleGraders,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Toddlers,
        AgeGroup::Preschoolers,
        AgeGroup::EarlyReaders,
        AgeGroup::MiddleGraders,
    ];

    /// The stored `ageGroup` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Toddlers => "0-3",
            AgeGroup::Preschoolers => "3-6",
            AgeGroup::EarlyReaders => "6-9",
            AgeGroup::MiddleGraders => "9-12",
        }
    }

    pub fn audience(&self) -> &'static str {
        match self {
            AgeGroup::Toddlers => "Toddlers",
            AgeGroup::Preschoolers => "Preschoolers",
            AgeGroup::EarlyReaders => "Early Readers",
            AgeGroup::MiddleGraders => "Middle Graders",
        }
    }

    /// Parse a stored or route value such as `3-6`. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|group| group.as_str() == s)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A story's title, description and content in another language. Empty
/// fields fall back to the English text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

/// A story as served to pages and API clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Opaque key, unique within the `stories` collection.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Story body, written in Markdown.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Translations keyed by language name, e.g. `Urdu`.
    #[serde(default)]
    pub translations: BTreeMap<String, Translation>,
    /// Set on programming tutorials.
    #[serde(default)]
    pub is_code_story: bool,
    #[serde(default)]
    pub programming_language: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The text of a story in one reading language.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedStory {
    pub title: String,
    pub description: String,
    pub content: String,
    /// False when the language was requested but the story has no
    /// translation for it, so the English text is shown.
    pub translated: bool,
}

impl Story {
    /// Reading languages offered for this story: the site's languages, then
    /// any other language it has a translation for.
    pub fn languages(&self) -> Vec<String> {
        READING_LANGUAGES
            .iter()
            .map(|lang| lang.to_string())
            .chain(
                self.translations
                    .keys()
                    .filter(|lang| !READING_LANGUAGES.contains(&lang.as_str()))
                    .cloned(),
            )
            .collect()
    }

    /// Title, description and content in `language`, falling back to English
    /// per field.
    pub fn localized(&self, language: &str) -> LocalizedStory {
        let translation = (language != DEFAULT_LANGUAGE)
            .then(|| self.translations.get(language))
            .flatten();

        fn pick(translated: Option<&str>, original: &str) -> String {
            translated
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(original)
                .to_string()
        }

        LocalizedStory {
            title: pick(translation.map(|t| t.title.as_str()), &self.title),
            description: pick(translation.map(|t| t.description.as_str()), &self.description),
            content: pick(translation.map(|t| t.content.as_str()), &self.content),
            translated: language == DEFAULT_LANGUAGE || translation.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Listing parameters forwarded verbatim to the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentQuery {
    /// Equality filter on `ageGroup`; `None` lists every age group.
    pub age_group: Option<AgeGroup>,
    pub limit: i64,
}

impl ContentQuery {
    /// Default-sized listing for one age group, or all of them.
    pub fn for_age(age_group: Option<AgeGroup>) -> Self {
        Self {
            age_group,
            ..Self::default()
        }
    }

    pub fn with_limit(self, limit: i64) -> Self {
        Self { limit, ..self }
    }
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            age_group: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// A validated story submitted through the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStory {
    pub title: String,
    pub description: String,
    pub age_group: AgeGroup,
    pub content: String,
    pub cover_image_url: Option<String>,
}

/// Response of a successful admin story submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryCreated {
    pub message: String,
    pub id: String,
    pub cover_image_url: Option<String>,
}
