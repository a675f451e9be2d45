//! Partial-substring fuzzy matching.
//!
//! [`partial_ratio`] slides the shorter string over every position of the
//! longer one and reports the best similarity ratio found, scaled to
//! `0..=100`. A verbatim occurrence of the shorter string always scores 100.
//!
//! The per-window diff and ratio (`2·matches / total_len`) come from
//! [`similar`]. Windows whose character overlap with the shorter string
//! cannot beat the best ratio so far are skipped without diffing.

use std::collections::HashMap;

use similar::{capture_diff_slices, get_diff_ratio, Algorithm};

/// Ratio above which a window counts as a perfect match.
const PERFECT: f32 = 0.995;

/// Best-alignment partial similarity of `a` and `b`, in `0..=100`.
///
/// Identical strings score 100 (two empty strings included). Otherwise an
/// empty side scores 0.
///
/// # Examples
///
/// ```
/// use blue_search::orchestrator::fuzzy::partial_ratio;
///
/// assert_eq!(partial_ratio("phishing", "spearphishing attachment"), 100);
/// assert_eq!(partial_ratio("phishing", ""), 0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let width = shorter.len();

    if longer.windows(width).any(|window| window == shorter.as_slice()) {
        return 100;
    }

    let mut wanted: HashMap<char, usize> = HashMap::new();
    for &c in &shorter {
        *wanted.entry(c).or_default() += 1;
    }
    let mut overlap = CharOverlap::new(&wanted);
    for &c in &longer[..width] {
        overlap.push(c);
    }

    let mut best = 0.0_f32;
    for start in 0..=longer.len() - width {
        if start > 0 {
            overlap.pop(longer[start - 1]);
            overlap.push(longer[start + width - 1]);
        }
        // Matches can never exceed the shared character count.
        if overlap.shared as f32 / width as f32 <= best {
            continue;
        }
        let window = &longer[start..start + width];
        let ops = capture_diff_slices(Algorithm::Myers, &shorter, window);
        let ratio = get_diff_ratio(&ops, width, width);
        if ratio > PERFECT {
            return 100;
        }
        best = best.max(ratio);
    }

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Multiset intersection size between the shorter string and a sliding window.
struct CharOverlap<'a> {
    wanted: &'a HashMap<char, usize>,
    seen: HashMap<char, usize>,
    shared: usize,
}

impl<'a> CharOverlap<'a> {
    fn new(wanted: &'a HashMap<char, usize>) -> Self {
        Self {
            wanted,
            seen: HashMap::new(),
            shared: 0,
        }
    }

    fn push(&mut self, c: char) {
        let seen = self.seen.entry(c).or_default();
        if *seen < self.wanted.get(&c).copied().unwrap_or(0) {
            self.shared += 1;
        }
        *seen += 1;
    }

    fn pop(&mut self, c: char) {
        let seen = self.seen.entry(c).or_default();
        *seen = seen.saturating_sub(1);
        if *seen < self.wanted.get(&c).copied().unwrap_or(0) {
            self.shared -= 1;
        }
    }
}
