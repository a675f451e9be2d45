//! Lookup orchestration: fetch, fuzzy-score, filter, rank.
//!
//! [`pipeline`] runs one source end to end; [`search`] drives every
//! configured source and collects the per-source reports.

pub mod dedup;
pub mod fuzzy;
pub mod pipeline;
pub mod scoring;
pub mod search;
pub mod url_resolve;
