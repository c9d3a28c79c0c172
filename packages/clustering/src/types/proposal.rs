//! Wire types for the AI collaborator's clustering proposals.
//!
//! The collaborator returns loosely structured JSON; these types parse it
//! strictly enough to be safe and loosely enough to survive real model
//! output: missing fields default, unknown fields are ignored, and ids
//! arrive as strings that are validated against the current snapshot
//! before use. A hallucinated id costs one skipped operation, not a
//! failed batch.

use serde::{Deserialize, Serialize};

/// Consolidation response: families merged under canonical names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeProposal {
    #[serde(default)]
    pub merges: Vec<MergeGroup>,
}

impl MergeProposal {
    /// True when the proposal contains no merges at all.
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }
}

/// One merge entry: a canonical cluster name and the batch-local family
/// indices that feed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeGroup {
    pub canonical_name: String,

    #[serde(default)]
    pub ids_to_merge: Vec<usize>,
}

/// Orphan-reconciliation response: matches to existing clusters plus
/// newly proposed groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanProposal {
    #[serde(default)]
    pub assignments: Vec<OrphanAssignment>,

    #[serde(default)]
    pub new_clusters: Vec<NewClusterProposal>,
}

impl OrphanProposal {
    /// True when the proposal assigns nothing and creates nothing.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.new_clusters.is_empty()
    }
}

/// Match one orphan to an existing cluster by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanAssignment {
    pub item_id: String,
    pub target_cluster_id: String,
}

/// Group one or more orphans into a cluster that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClusterProposal {
    pub name: String,

    #[serde(default)]
    pub item_ids: Vec<String>,
}
