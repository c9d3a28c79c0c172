//! Parsing of AI proposal responses.
//!
//! Responses are free-form JSON from the collaborator. Parsing is
//! tolerant (missing fields default, two accepted top-level shapes) and
//! callers degrade any parse failure to an empty proposal rather than
//! failing the run.

use crate::types::proposal::{MergeGroup, MergeProposal, OrphanProposal};

/// Parse a consolidation response.
///
/// Accepts the canonical `{"merges": [...]}` object as well as a bare
/// array of merge entries, which some models return despite the prompt.
pub fn parse_merge_response(json: &str) -> Result<MergeProposal, serde_json::Error> {
    if let Ok(merges) = serde_json::from_str::<Vec<MergeGroup>>(json) {
        return Ok(MergeProposal { merges });
    }

    serde_json::from_str::<MergeProposal>(json)
}

/// Parse an orphan-reconciliation response.
pub fn parse_orphan_response(json: &str) -> Result<OrphanProposal, serde_json::Error> {
    serde_json::from_str(json)
}
