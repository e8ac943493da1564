use crate::models::search::{MatchField, MatchResult, SearchableItem};

/// A non-empty search query, normalized for case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    needle: String,
}

impl SearchQuery {
    /// Trim the raw input. Returns `None` for empty or whitespace-only input,
    /// which must not trigger any fetch.
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            needle: text.to_lowercase(),
        })
    }

    /// The trimmed query as typed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The lower-cased query.
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

/// The first field, in the item's priority order, that contains the query.
///
/// Plain substring containment on lower-cased text: no tokenizing, no fuzziness.
pub fn first_match(item: &SearchableItem, query: &SearchQuery) -> Option<MatchField> {
    item.searchable_fields()
        .into_iter()
        .find(|(_, text)| text.to_lowercase().contains(query.needle()))
        .map(|(field, _)| field)
}

/// Keep the items that match, in input order.
pub fn match_items<I>(items: I, query: &SearchQuery) -> Vec<MatchResult>
where
    I: IntoIterator<Item = SearchableItem>,
{
    items
        .into_iter()
        .filter_map(|item| {
            first_match(&item, query).map(|match_field| MatchResult { item, match_field })
        })
        .collect()
}
