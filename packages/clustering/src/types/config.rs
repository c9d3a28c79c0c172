//! Configuration for the clustering pipeline.

use serde::{Deserialize, Serialize};

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum similarity for an exact group to join a family.
    ///
    /// Default: 0.6.
    pub family_threshold: f64,

    /// Similarity at which two subgroups within a family count as the
    /// same spelling and are merged.
    ///
    /// Kept far above the family threshold so visually distinct variants
    /// survive as separate subgroups. Default: 0.99.
    pub collapse_threshold: f64,

    /// Families per consolidation batch sent to the AI collaborator.
    ///
    /// Larger batches give the model more context per prompt at higher
    /// cost. Default: 10.
    pub batch_size: usize,

    /// Items per store update issued within a batch; updates for one
    /// family fan out concurrently in chunks of this size.
    ///
    /// Default: 25.
    pub update_chunk_size: usize,

    /// Upper bound on orphan reconciliation rounds. The loop also stops
    /// as soon as a round fails to reduce the orphan count.
    ///
    /// Default: 3.
    pub max_orphan_rounds: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            family_threshold: 0.6,
            collapse_threshold: 0.99,
            batch_size: 10,
            update_chunk_size: 25,
            max_orphan_rounds: 3,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the family threshold.
    pub fn with_family_threshold(mut self, threshold: f64) -> Self {
        self.family_threshold = threshold;
        self
    }

    /// Set the intra-family collapse threshold.
    pub fn with_collapse_threshold(mut self, threshold: f64) -> Self {
        self.collapse_threshold = threshold;
        self
    }

    /// Set the consolidation batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the store update chunk size.
    pub fn with_update_chunk_size(mut self, chunk_size: usize) -> Self {
        self.update_chunk_size = chunk_size;
        self
    }

    /// Set the orphan reconciliation round limit.
    pub fn with_max_orphan_rounds(mut self, rounds: usize) -> Self {
        self.max_orphan_rounds = rounds;
        self
    }
}
