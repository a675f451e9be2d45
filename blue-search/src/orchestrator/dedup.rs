//! Candidate deduplication by canonical link.
//!
//! A page can be reachable from several anchors on the same index page
//! (a heading link and a "read more" link, say). Deduplication keeps one
//! candidate per canonical link, the highest-scored one, and preserves the
//! order in which links were first seen.

use std::collections::HashMap;

use crate::types::Candidate;

use super::url_resolve::canonical_link;

/// Collapse candidates that point at the same page.
///
/// When two candidates share a canonical link, the higher score wins and
/// its link spelling is kept. The output keeps first-seen order, so a
/// score-sorted input stays sorted.
pub fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let key = canonical_link(&candidate.link);
        match slots.get(&key) {
            Some(&slot) => {
                if candidate.score > kept[slot].score {
                    kept[slot] = candidate;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}
