use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .unwrap_or_else(|e| panic!("invalid YouTube pattern: {e}"))
});

/// Embeddable player URL for a video link.
///
/// YouTube watch, short and embed links become
/// `https://www.youtube.com/embed/{id}` when the extracted id is 11 characters
/// long. Other `http`/`https` links are returned unchanged. Anything else,
/// such as a `javascript:` or `data:` URL, yields `None`.
pub fn video_embed_url(url: &str) -> Option<String> {
    let url = url.trim();

    let youtube = YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(2))
        .map(|id| id.as_str())
        .filter(|id| id.chars().count() == 11)
        .map(|id| format!("https://www.youtube.com/embed/{id}"));

    youtube.or_else(|| is_web_url(url).then(|| url.to_string()))
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}
