//! The Pipeline, main entry point for the clustering library.
//!
//! Orchestrates the full flow: deterministic grouping, batched AI
//! consolidation, idempotent resolution, and the bounded orphan
//! reconciliation loop. Grouping is fully computed before any proposal
//! is sent, and batches run strictly sequentially so later batches see
//! the clusters earlier batches created.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pipeline::collapse::collapse_families;
use crate::pipeline::grouping::{build_families, exact_groups};
use crate::pipeline::orphans::reconcile_once;
use crate::pipeline::prompts::{consolidate_payload, format_consolidate_prompt};
use crate::pipeline::proposal::parse_merge_response;
use crate::pipeline::report::inventory_summary;
use crate::pipeline::resolve::apply_merges;
use crate::traits::ai::AI;
use crate::traits::store::InventoryStore;
use crate::types::config::PipelineConfig;
use crate::types::family::Family;
use crate::types::proposal::MergeProposal;
use crate::types::report::{BatchReport, InventorySummary, OrphanReport, RunReport};

/// The clustering pipeline over a store and an AI collaborator.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(store, ai);
/// let report = pipeline.run().await?;
/// println!(
///     "{} items assigned, {} orphans left",
///     report.items_assigned, report.remaining_orphans
/// );
/// ```
pub struct Pipeline<S: InventoryStore, A: AI> {
    store: S,
    ai: A,
    config: PipelineConfig,
}

impl<S: InventoryStore, A: AI> Pipeline<S, A> {
    /// Create a new pipeline with default configuration.
    pub fn new(store: S, ai: A) -> Self {
        Self {
            store,
            ai,
            config: PipelineConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(store: S, ai: A, config: PipelineConfig) -> Self {
        Self { store, ai, config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deterministic grouping pass: fetch all items, bucket exactly,
    /// agglomerate into families, collapse near-identical subgroups.
    ///
    /// Pure computation over one store read; no AI involvement.
    pub async fn group(&self) -> Result<Vec<Family>> {
        let items = self.store.list_items().await?;
        debug!(items = items.len(), "grouping items");

        let groups = exact_groups(items);
        let mut families = build_families(groups, self.config.family_threshold);
        collapse_families(&mut families, self.config.collapse_threshold);

        info!(families = families.len(), "grouping complete");
        Ok(families)
    }

    /// Consolidate families into canonical clusters, batch by batch.
    ///
    /// Each batch renders the current cluster names into the prompt, asks
    /// the collaborator, and applies the parsed proposal. An unreachable
    /// collaborator or an unparseable response degrades that batch only;
    /// the run always returns a full report.
    pub async fn consolidate(&self, families: &[Family]) -> Result<RunReport> {
        let mut report = RunReport {
            families_total: families.len(),
            ..Default::default()
        };

        let batch_size = self.config.batch_size.max(1);
        for (batch_index, batch) in families.chunks(batch_size).enumerate() {
            let mut batch_report = self.consolidate_batch(batch_index, batch).await?;
            batch_report.batch_index = batch_index;

            report.items_assigned += batch_report.items_assigned;
            report.unresolved_families += batch_report.unresolved_families.len();
            report.batches.push(batch_report);
        }

        Ok(report)
    }

    async fn consolidate_batch(&self, batch_index: usize, batch: &[Family]) -> Result<BatchReport> {
        let existing: Vec<String> = self
            .store
            .list_clusters()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        let system = format_consolidate_prompt(&existing);
        let payload = consolidate_payload(batch);
        debug!(batch = batch_index, families = batch.len(), "consolidating batch");

        let response = match self.ai.complete(&system, &payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!(batch = batch_index, error = %e, "AI call failed, batch errored");
                return Ok(BatchReport {
                    unresolved_families: (0..batch.len()).collect(),
                    logs: vec![format!("Batch {batch_index} failed: {e}")],
                    failed: true,
                    ..Default::default()
                });
            }
        };

        let proposal = match parse_merge_response(&response) {
            Ok(proposal) => proposal,
            Err(e) => {
                warn!(batch = batch_index, error = %e, "unparseable merge response, skipping batch");
                MergeProposal::default()
            }
        };

        apply_merges(
            &self.store,
            batch,
            &proposal.merges,
            self.config.update_chunk_size,
        )
        .await
    }

    /// Bounded orphan reconciliation loop.
    ///
    /// Runs rounds until no orphans remain, a round stops making
    /// progress, or `max_orphan_rounds` is reached.
    pub async fn reconcile_orphans(&self) -> Result<Vec<OrphanReport>> {
        let mut rounds = Vec::new();

        for round in 0..self.config.max_orphan_rounds {
            let report =
                reconcile_once(&self.store, &self.ai, self.config.update_chunk_size).await?;
            let remaining = report.remaining_orphans;
            let progressed = report.made_progress();
            rounds.push(report);

            if remaining == 0 || !progressed {
                break;
            }
            debug!(round, remaining, "orphans left, trying another round");
        }

        Ok(rounds)
    }

    /// Full pipeline run: group, consolidate, reconcile orphans.
    pub async fn run(&self) -> Result<RunReport> {
        let families = self.group().await?;
        let mut report = self.consolidate(&families).await?;

        report.orphan_rounds = self.reconcile_orphans().await?;
        report.remaining_orphans = match report.orphan_rounds.last() {
            Some(last) => last.remaining_orphans,
            None => self.store.unclustered_items().await?.len(),
        };

        info!(
            items_assigned = report.items_assigned,
            unresolved_families = report.unresolved_families,
            remaining_orphans = report.remaining_orphans,
            "pipeline run complete"
        );
        Ok(report)
    }

    /// Read-only inventory projection: clusters with provenance plus the
    /// current orphans.
    pub async fn summary(&self) -> Result<InventorySummary> {
        inventory_summary(&self.store).await
    }
}
