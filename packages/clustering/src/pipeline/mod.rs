//! The clustering pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Normalization (exact and family keys)
//! - Similarity scoring (token-set Jaccard)
//! - Two-tier grouping (exact buckets, then similarity families)
//! - Intra-family collapse of near-identical subgroups
//! - AI consolidation (prompt, tolerant parse, resolution)
//! - Orphan reconciliation
//! - Reporting projections

pub mod collapse;
pub mod grouping;
pub mod normalize;
pub mod orphans;
pub mod prompts;
pub mod proposal;
pub mod report;
pub mod resolve;
pub mod runner;
pub mod similarity;

pub use collapse::{collapse_families, collapse_family};
pub use grouping::{build_families, exact_groups};
pub use normalize::{exact_key, family_key};
pub use orphans::reconcile_once;
pub use prompts::{
    consolidate_payload, format_consolidate_prompt, orphan_payload, CONSOLIDATE_PROMPT,
    ORPHAN_PROMPT,
};
pub use proposal::{parse_merge_response, parse_orphan_response};
pub use report::inventory_summary;
pub use resolve::apply_merges;
pub use runner::Pipeline;
pub use similarity::similarity;
