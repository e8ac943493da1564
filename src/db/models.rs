//! MongoDB document shapes for the content collections.
//!
//! Stored documents use camelCase field names and may lack any field, so every
//! record field has a default. Fields that are present but null or of an
//! unexpected type also decode to their default, so one odd document never
//! fails a whole collection read. Records are converted to the domain types in
//! `crate::models::content` at the repository boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Bson};
use mongodb::options::FindOptions;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::content::{ContentQuery, NewStory, Poem, Story, Translation, Video};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age_group: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(deserialize_with = "lenient_translations", skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, Translation>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_code_story: bool,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub programming_language: Option<String>,
    #[serde(deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub video_url: String,
    #[serde(deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub age_group: String,
    #[serde(deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoemRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age_group: String,
    #[serde(deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

/// A string field; null or non-string values read as empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Bson::deserialize(deserializer)?, Bson::Boolean(true)))
}

/// A timestamp field. RFC 3339 strings are accepted, anything else is `None`.
fn lenient_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bson::DateTime>, D::Error> {
    Ok(match Bson::deserialize(deserializer)? {
        Bson::DateTime(dt) => Some(dt),
        Bson::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| bson::DateTime::from_chrono(dt.with_timezone(&Utc))),
        _ => None,
    })
}

/// A `translations` map keyed by language name. Entries that are not
/// sub-documents are skipped.
fn lenient_translations<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Translation>, D::Error> {
    let Bson::Document(languages) = Bson::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    let text = |fields: &bson::Document, key: &str| {
        fields.get_str(key).map(str::to_string).unwrap_or_default()
    };

    Ok(languages
        .iter()
        .filter_map(|(language, value)| match value {
            Bson::Document(fields) => Some((
                language.clone(),
                Translation {
                    title: text(fields, "title"),
                    description: text(fields, "description"),
                    content: text(fields, "content"),
                },
            )),
            _ => None,
        })
        .collect())
}

/// Render a stored `_id` as the opaque string key used in routes.
pub fn record_id(id: Option<&Bson>) -> String {
    match id {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Filter selecting a document by its string key.
///
/// Keys that parse as an ObjectId may have been stored either way, so both
/// forms are matched.
pub fn id_filter(id: &str) -> bson::Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": { "$in": [oid, id] } },
        Err(_) => doc! { "_id": id },
    }
}

/// Filter and options for a listing: optional `ageGroup` equality, newest
/// first, limited.
pub fn listing(query: &ContentQuery) -> (bson::Document, FindOptions) {
    let filter = match query.age_group {
        Some(age_group) => doc! { "ageGroup": age_group.as_str() },
        None => doc! {},
    };
    let options = FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .limit(query.limit)
        .build();
    (filter, options)
}

/// Filter and options for code stories, newest first. The programming
/// language, when given, matches case-insensitively.
pub fn code_story_listing(language: Option<&str>) -> (bson::Document, FindOptions) {
    let mut filter = doc! { "isCodeStory": true };
    if let Some(language) = language {
        filter.insert(
            "programmingLanguage",
            doc! { "$regex": format!("^{}$", regex::escape(language)), "$options": "i" },
        );
    }
    let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
    (filter, options)
}

fn to_chrono(dt: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    dt.map(|d| d.to_chrono())
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Story {
            id: record_id(record.id.as_ref()),
            title: record.title,
            description: record.description,
            content: record.content,
            age_group: record.age_group,
            cover_image_url: record.cover_image_url.filter(|url| !url.is_empty()),
            translations: record.translations,
            is_code_story: record.is_code_story,
            programming_language: record.programming_language.filter(|lang| !lang.is_empty()),
            created_at: to_chrono(record.created_at),
        }
    }
}

impl From<NewStory> for StoryRecord {
    fn from(story: NewStory) -> Self {
        StoryRecord {
            id: None,
            title: story.title,
            description: story.description,
            content: story.content,
            age_group: story.age_group.as_str().to_string(),
            cover_image_url: story.cover_image_url,
            created_at: Some(bson::DateTime::now()),
            ..Self::default()
        }
    }
}

impl From<VideoRecord> for Video {
    fn from(record: VideoRecord) -> Self {
        Video {
            id: record_id(record.id.as_ref()),
            title: record.title,
            description: record.description,
            video_url: record.video_url,
            thumbnail_url: record.thumbnail_url.filter(|url| !url.is_empty()),
            age_group: record.age_group,
            created_at: to_chrono(record.created_at),
        }
    }
}

impl From<PoemRecord> for Poem {
    fn from(record: PoemRecord) -> Self {
        Poem {
            id: record_id(record.id.as_ref()),
            title: record.title,
            description: record.description,
            content: record.content,
            age_group: record.age_group,
            created_at: to_chrono(record.created_at),
        }
    }
}
