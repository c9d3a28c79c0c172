//! Orphan reconciliation: a second AI round trip for leftovers.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::prompts::{orphan_payload, ORPHAN_PROMPT};
use crate::pipeline::proposal::parse_orphan_response;
use crate::pipeline::resolve::find_or_create_cluster;
use crate::traits::ai::AI;
use crate::traits::store::InventoryStore;
use crate::types::item::{Cluster, Item};
use crate::types::proposal::OrphanProposal;
use crate::types::report::OrphanReport;

/// One reconciliation round: snapshot orphans and clusters, ask the
/// collaborator, and apply only operations whose ids exist in the
/// snapshot.
///
/// Validation is against the snapshot taken before the AI call; there is
/// no conflict detection between snapshot and apply. With no orphans the
/// round short-circuits without an AI call, so re-running after a clean
/// pass is a no-op. A failed AI call leaves the orphans for a later run
/// and is reported, not raised.
pub async fn reconcile_once<S, A>(
    store: &S,
    ai: &A,
    update_chunk_size: usize,
) -> Result<OrphanReport>
where
    S: InventoryStore + ?Sized,
    A: AI + ?Sized,
{
    let orphans = store.unclustered_items().await?;
    if orphans.is_empty() {
        return Ok(OrphanReport {
            logs: vec!["No leftover items to process.".to_string()],
            ..Default::default()
        });
    }

    let clusters = store.list_clusters().await?;
    info!(
        orphans = orphans.len(),
        clusters = clusters.len(),
        "processing leftovers"
    );

    let mut report = OrphanReport {
        orphans_seen: orphans.len(),
        remaining_orphans: orphans.len(),
        ..Default::default()
    };

    let payload = orphan_payload(&clusters, &orphans);
    let response = match ai.complete(ORPHAN_PROMPT, &payload).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "AI call failed, leaving orphans for a later run");
            report.failed = true;
            report.logs.push(format!("Reconciliation failed: {e}"));
            return Ok(report);
        }
    };

    let proposal = match parse_orphan_response(&response) {
        Ok(proposal) => proposal,
        Err(e) => {
            warn!(error = %e, "unparseable orphan response, applying nothing");
            OrphanProposal::default()
        }
    };

    let orphan_by_id: HashMap<Uuid, &Item> = orphans.iter().map(|i| (i.id, i)).collect();
    let cluster_by_id: HashMap<Uuid, &Cluster> = clusters.iter().map(|c| (c.id, c)).collect();

    // Matches to existing clusters.
    for assignment in &proposal.assignments {
        let parsed = (
            Uuid::parse_str(&assignment.item_id),
            Uuid::parse_str(&assignment.target_cluster_id),
        );
        let (Ok(item_id), Ok(cluster_id)) = parsed else {
            warn!(item = %assignment.item_id, "malformed id in assignment, skipping");
            continue;
        };
        let Some(item) = orphan_by_id.get(&item_id) else {
            warn!(item = %item_id, "assignment references an item outside the snapshot, skipping");
            continue;
        };
        let Some(cluster) = cluster_by_id.get(&cluster_id) else {
            warn!(cluster = %cluster_id, "assignment references a cluster outside the snapshot, skipping");
            continue;
        };

        let provenance = format!("Late-Assign: {}", item.name);
        match store.assign_cluster(&[item_id], cluster_id, &provenance).await {
            Ok(updated) if updated > 0 => {
                report.assigned_existing += 1;
                report.logs.push(format!(
                    "Item '{}' -> existing cluster '{}'",
                    item.name, cluster.name
                ));
            }
            Ok(_) => warn!(item = %item_id, "item vanished before update"),
            Err(e) => warn!(item = %item_id, error = %e, "assignment failed, continuing"),
        }
    }

    // New clusters for grouped or singleton orphans.
    let mut created: IndexMap<String, Uuid> = IndexMap::new();
    for proposed in &proposal.new_clusters {
        let item_ids: Vec<Uuid> = proposed
            .item_ids
            .iter()
            .filter_map(|raw| Uuid::parse_str(raw).ok())
            .filter(|id| orphan_by_id.contains_key(id))
            .collect();
        if item_ids.is_empty() {
            warn!(cluster = %proposed.name, "proposed cluster has no items in the snapshot, skipping");
            continue;
        }

        let cluster_id = match find_or_create_cluster(store, &proposed.name, &mut created).await {
            Ok(id) => id,
            Err(e) => {
                warn!(cluster = %proposed.name, error = %e, "could not create cluster, skipping");
                continue;
            }
        };

        let mut assigned = 0usize;
        for chunk in item_ids.chunks(update_chunk_size.max(1)) {
            match store.assign_cluster(chunk, cluster_id, "Late-Group").await {
                Ok(updated) => assigned += updated as usize,
                Err(e) => {
                    warn!(cluster = %proposed.name, error = %e, "item update failed, continuing")
                }
            }
        }

        report.created_clusters += 1;
        report
            .logs
            .push(format!("New cluster '{}' created with {assigned} items", proposed.name));
    }

    report.remaining_orphans = store.unclustered_items().await?.len();
    Ok(report)
}
