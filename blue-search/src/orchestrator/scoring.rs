//! Threshold filtering and ranking of extracted fragments.
//!
//! Each [`Fragment`] is scored as the best [`partial_ratio`] between the
//! query and any of its texts. Fragments below the threshold are dropped
//! and the rest are sorted by score, highest first. The sort is stable, so
//! equal scores keep extraction order.

use crate::source::Fragment;
use crate::types::{Candidate, Query};

use super::fuzzy::partial_ratio;

/// Score one fragment against `query`.
///
/// Returns 0 for a fragment with no texts.
pub fn score_fragment(query: &Query, fragment: &Fragment) -> u8 {
    fragment
        .texts
        .iter()
        .map(|text| partial_ratio(query.as_str(), text))
        .max()
        .unwrap_or(0)
}

/// Score, filter and sort `fragments` into ranked candidates.
pub fn rank(query: &Query, fragments: Vec<Fragment>, threshold: u8) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = fragments
        .into_iter()
        .filter_map(|fragment| {
            let score = score_fragment(query, &fragment);
            (score >= threshold).then(|| Candidate::new(score, fragment.link))
        })
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}
