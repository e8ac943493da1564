use crate::models::content::ContentType;
use crate::models::search::{MatchField, MatchResult};

/// Sort key of a match: the field that matched, then the type string.
///
/// Title matches come first, description before content, and equal fields
/// fall back to lexicographic type order (`poem`, `story`, `video`).
pub fn rank_key(result: &MatchResult) -> (MatchField, &'static str) {
    (result.match_field, result.content_type().as_str())
}

/// Order matches by [`rank_key`]. The sort is stable, so matches with equal
/// keys keep their fetch order.
pub fn rank(results: &mut [MatchResult]) {
    results.sort_by_key(rank_key);
}

/// One display section of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSection {
    pub content_type: ContentType,
    pub results: Vec<MatchResult>,
}

impl ResultSection {
    pub fn title(&self) -> &'static str {
        self.content_type.section_title()
    }
}

/// Split ranked matches into the fixed Stories, Videos, Poems sections.
///
/// Order within a section follows the ranked list; empty sections are dropped.
pub fn group_by_type(results: Vec<MatchResult>) -> Vec<ResultSection> {
    let mut sections: Vec<ResultSection> = ContentType::ALL
        .into_iter()
        .map(|content_type| ResultSection {
            content_type,
            results: Vec::new(),
        })
        .collect();

    for result in results {
        if let Some(section) = sections
            .iter_mut()
            .find(|s| s.content_type == result.content_type())
        {
            section.results.push(result);
        }
    }

    sections.retain(|s| !s.results.is_empty());
    sections
}
