//! Case-insensitive substring matching used by the scoring rules.
//!
//! Matching is plain containment on lowercased text. There is no
//! tokenizing, stemming or fuzzy matching: changing that would change
//! scores for existing contacts.

use crate::types::contact::non_blank;

/// Minimum length (exclusive, in characters) of a pain-point keyword.
pub const PAIN_POINT_MIN_WORD_CHARS: usize = 4;

/// Lowercased copy of a field, or `None` when it is absent or blank.
pub fn lowered(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_lowercase)
}

/// True if `needle` (lowercased) occurs in the already-lowercased haystack.
///
/// Blank needles never match, so an empty ICP entry cannot match every
/// contact. Rules before [`SCORING_RULES_VERSION`](super::SCORING_RULES_VERSION)
/// 2 let them match.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return false;
    }
    haystack.contains(&needle.to_lowercase())
}

/// True if any needle occurs in any of the (lowercased) haystacks.
pub fn any_contained<'a>(
    haystacks: &[Option<String>],
    needles: impl IntoIterator<Item = &'a String>,
) -> bool {
    let haystacks: Vec<&str> = haystacks.iter().filter_map(|h| h.as_deref()).collect();
    if haystacks.is_empty() {
        return false;
    }
    needles
        .into_iter()
        .any(|needle| haystacks.iter().any(|h| contains_folded(h, needle)))
}

/// True if the joined pain points share a keyword with the description.
///
/// Keywords are whitespace-separated words of the lowercased, space-joined
/// pain points that are longer than [`PAIN_POINT_MIN_WORD_CHARS`]
/// characters. Each keyword is looked up as a substring of the lowercased
/// description.
pub fn shares_pain_point(pain_points: &[String], description: &str) -> bool {
    let joined = pain_points.join(" ").to_lowercase();
    joined
        .split_whitespace()
        .filter(|word| word.chars().count() > PAIN_POINT_MIN_WORD_CHARS)
        .any(|word| description.contains(word))
}
