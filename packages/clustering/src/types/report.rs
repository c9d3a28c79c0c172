//! Structured results returned by pipeline runs.
//!
//! A run always produces a report, even when individual batches failed,
//! so callers can inspect and re-run only the failed parts.

use serde::Serialize;

use crate::types::item::Item;

/// Outcome of one consolidation batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Position of this batch within the run.
    pub batch_index: usize,

    /// Merge entries actually applied.
    pub merges_applied: usize,

    /// Items that received a cluster assignment in this batch.
    pub items_assigned: usize,

    /// Batch-local family indices never referenced by any merge entry.
    /// Their items stay unresolved; nothing is guessed on their behalf.
    pub unresolved_families: Vec<usize>,

    /// Human-readable operation log, one line per merge.
    pub logs: Vec<String>,

    /// True when the AI collaborator could not be reached at all.
    pub failed: bool,
}

/// Outcome of one orphan reconciliation round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrphanReport {
    /// Orphans in the snapshot this round worked on.
    pub orphans_seen: usize,

    /// Orphans matched to existing clusters.
    pub assigned_existing: usize,

    /// New clusters created for grouped or singleton orphans.
    pub created_clusters: usize,

    /// Orphans still unassigned after the round.
    pub remaining_orphans: usize,

    /// Human-readable operation log.
    pub logs: Vec<String>,

    /// True when the AI collaborator could not be reached at all.
    pub failed: bool,
}

impl OrphanReport {
    /// Whether this round reduced the orphan count.
    pub fn made_progress(&self) -> bool {
        self.remaining_orphans < self.orphans_seen
    }
}

/// Aggregate outcome of a full pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Families produced by the grouping pass.
    pub families_total: usize,

    /// Per-batch consolidation outcomes, in processing order.
    pub batches: Vec<BatchReport>,

    /// Items assigned across all batches.
    pub items_assigned: usize,

    /// Families across all batches that no merge entry covered.
    pub unresolved_families: usize,

    /// Per-round orphan reconciliation outcomes.
    pub orphan_rounds: Vec<OrphanReport>,

    /// Orphans left when the run finished.
    pub remaining_orphans: usize,
}

impl RunReport {
    /// Indices of batches whose AI call failed outright.
    pub fn failed_batches(&self) -> Vec<usize> {
        self.batches
            .iter()
            .filter(|b| b.failed)
            .map(|b| b.batch_index)
            .collect()
    }
}

/// One cluster in the inventory summary, with the families that fed it.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub cluster_name: String,

    /// Distinct `original_family` values of the member items, in item
    /// order.
    pub merged_families: Vec<String>,

    /// Member items, ordered by buy date descending.
    pub items: Vec<Item>,
}

/// Read-only projection of the clustered inventory plus current orphans.
#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub summary: Vec<ClusterSummary>,
    pub unclustered: Vec<Item>,
}
