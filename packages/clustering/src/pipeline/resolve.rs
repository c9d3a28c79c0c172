//! Applying merge proposals to the store.

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ClusterError, Result};
use crate::traits::store::InventoryStore;
use crate::types::family::Family;
use crate::types::proposal::MergeGroup;
use crate::types::report::BatchReport;

/// Find a cluster by canonical name or create it, falling back to a
/// disambiguated name when creation loses a uniqueness race.
///
/// `created` is scoped to a single resolution call and keeps repeated
/// canonical names within one proposal from creating the cluster twice.
pub(crate) async fn find_or_create_cluster<S>(
    store: &S,
    name: &str,
    created: &mut IndexMap<String, Uuid>,
) -> Result<Uuid>
where
    S: InventoryStore + ?Sized,
{
    if let Some(id) = created.get(name) {
        return Ok(*id);
    }

    let id = match store.find_cluster_by_name(name).await? {
        Some(cluster) => cluster.id,
        None => match store.create_cluster(name, None).await {
            Ok(cluster) => cluster.id,
            Err(ClusterError::DuplicateClusterName { .. }) => {
                // Lost a create race. Retry once under a suffixed name so
                // the batch keeps moving.
                let fragment = chrono::Utc::now().timestamp_millis() % 10_000;
                let fallback = format!("{name} ({fragment})");
                warn!(name, fallback = %fallback, "cluster name taken, creating under fallback");
                store.create_cluster(&fallback, None).await?.id
            }
            Err(e) => return Err(e),
        },
    };

    created.insert(name.to_string(), id);
    Ok(id)
}

/// Apply a parsed merge proposal to the store.
///
/// Each merge entry resolves its target cluster (find-or-create), then
/// reassigns every item of every referenced family, tagging provenance
/// with that family's representative name. Stale references are skipped
/// with a log line; the rest of the batch continues. Family indices the
/// proposal never mentions are reported as unresolved, not guessed.
pub async fn apply_merges<S>(
    store: &S,
    families: &[Family],
    merges: &[MergeGroup],
    update_chunk_size: usize,
) -> Result<BatchReport>
where
    S: InventoryStore + ?Sized,
{
    let mut report = BatchReport::default();
    let mut created: IndexMap<String, Uuid> = IndexMap::new();
    let mut covered = vec![false; families.len()];
    let chunk_size = update_chunk_size.max(1);

    for merge in merges {
        let cluster_id =
            match find_or_create_cluster(store, &merge.canonical_name, &mut created).await {
                Ok(id) => id,
                Err(e) => {
                    warn!(cluster = %merge.canonical_name, error = %e, "could not resolve cluster, skipping merge");
                    report
                        .logs
                        .push(format!("Skipped cluster '{}': {e}", merge.canonical_name));
                    continue;
                }
            };

        let mut assigned = 0usize;

        for &family_index in &merge.ids_to_merge {
            let Some(family) = families.get(family_index) else {
                warn!(family_index, "merge references unknown family index, skipping");
                continue;
            };
            if covered[family_index] {
                warn!(family_index, "family referenced by more than one merge, reassigning");
            }
            covered[family_index] = true;

            let item_ids = family.item_ids();
            if item_ids.is_empty() {
                continue;
            }

            // Provenance is per source family, so updates run family by
            // family; within one family the chunks fan out concurrently.
            let updates = item_ids
                .chunks(chunk_size)
                .map(|chunk| store.assign_cluster(chunk, cluster_id, &family.family_name));
            for result in join_all(updates).await {
                match result {
                    Ok(count) => assigned += count as usize,
                    Err(e) => {
                        warn!(family = %family.family_name, error = %e, "item update failed, continuing");
                    }
                }
            }
        }

        report.merges_applied += 1;
        report.items_assigned += assigned;
        report.logs.push(format!(
            "Cluster '{}': {assigned} items assigned",
            merge.canonical_name
        ));
        info!(cluster = %merge.canonical_name, items = assigned, "merge applied");
    }

    report.unresolved_families = covered
        .iter()
        .enumerate()
        .filter_map(|(index, was_covered)| (!was_covered).then_some(index))
        .collect();
    if !report.unresolved_families.is_empty() {
        warn!(
            count = report.unresolved_families.len(),
            "families left unresolved by the proposal"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::stores::MemoryStore;
    use crate::traits::store::{ClusterStore, ItemStore};
    use crate::types::family::Subgroup;
    use crate::types::item::{Cluster, Item};

    fn family_of(names: &[&str]) -> Family {
        Family {
            family_name: names[0].to_string(),
            subgroups: names
                .iter()
                .map(|n| Subgroup {
                    name: n.to_string(),
                    items: vec![Item::new(*n)],
                    similarity: 100,
                })
                .collect(),
        }
    }

    fn seed(store: &MemoryStore, families: &[Family]) {
        for family in families {
            for sg in &family.subgroups {
                for item in &sg.items {
                    store.insert_item(item.clone());
                }
            }
        }
    }

    fn merge(name: &str, ids: &[usize]) -> MergeGroup {
        MergeGroup {
            canonical_name: name.to_string(),
            ids_to_merge: ids.to_vec(),
        }
    }

    #[tokio::test]
    async fn assigns_all_items_of_merged_families() {
        let store = MemoryStore::new();
        let families = vec![
            family_of(&["ParkTool Chain Whip SR-12.2", "Chain Whip"]),
            family_of(&["Kettenpeitsche"]),
        ];
        seed(&store, &families);

        let report = apply_merges(&store, &families, &[merge("ParkTool Chain Whip SR-12.2", &[0, 1])], 25)
            .await
            .unwrap();

        assert_eq!(report.merges_applied, 1);
        assert_eq!(report.items_assigned, 3);
        assert!(report.unresolved_families.is_empty());
        assert_eq!(store.cluster_count(), 1);
        assert!(store.unclustered_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provenance_is_per_source_family() {
        let store = MemoryStore::new();
        let families = vec![family_of(&["Shimano Disc Rotor"]), family_of(&["Bremsscheibe Shimano"])];
        seed(&store, &families);

        apply_merges(&store, &families, &[merge("Shimano Disc Rotor", &[0, 1])], 25)
            .await
            .unwrap();

        let cluster = store
            .find_cluster_by_name("Shimano Disc Rotor")
            .await
            .unwrap()
            .unwrap();
        let items = store.items_in_cluster(cluster.id).await.unwrap();
        let mut provenances: Vec<_> = items
            .iter()
            .filter_map(|i| i.original_family.clone())
            .collect();
        provenances.sort();

        assert_eq!(provenances, vec!["Bremsscheibe Shimano", "Shimano Disc Rotor"]);
    }

    #[tokio::test]
    async fn repeated_canonical_name_creates_one_cluster() {
        let store = MemoryStore::new();
        let families = vec![family_of(&["Sony WH-1000XM5"]), family_of(&["sony wh1000xm5"])];
        seed(&store, &families);

        apply_merges(
            &store,
            &families,
            &[merge("Sony WH-1000XM5", &[0]), merge("Sony WH-1000XM5", &[1])],
            25,
        )
        .await
        .unwrap();

        assert_eq!(store.cluster_count(), 1);
    }

    #[tokio::test]
    async fn existing_cluster_is_reused_not_duplicated() {
        let store = MemoryStore::new();
        store.create_cluster("Sony WH-1000XM5", None).await.unwrap();

        let families = vec![family_of(&["sony wh-1000xm5"])];
        seed(&store, &families);

        apply_merges(&store, &families, &[merge("Sony WH-1000XM5", &[0])], 25)
            .await
            .unwrap();

        assert_eq!(store.cluster_count(), 1);
    }

    #[tokio::test]
    async fn unknown_family_index_is_skipped_not_fatal() {
        let store = MemoryStore::new();
        let families = vec![family_of(&["Bike Pump"])];
        seed(&store, &families);

        let report = apply_merges(&store, &families, &[merge("Bike Pump", &[0, 7])], 25)
            .await
            .unwrap();

        assert_eq!(report.merges_applied, 1);
        assert_eq!(report.items_assigned, 1);
    }

    #[tokio::test]
    async fn omitted_families_are_reported_unresolved() {
        let store = MemoryStore::new();
        let families = vec![
            family_of(&["Apple iPhone 15 Pro"]),
            family_of(&["Patagonia Fleece Jacket"]),
            family_of(&["Bosch Hammer Drill"]),
        ];
        seed(&store, &families);

        let report = apply_merges(&store, &families, &[merge("Apple iPhone 15 Pro", &[0, 1])], 25)
            .await
            .unwrap();

        assert_eq!(report.unresolved_families, vec![2]);
        assert_eq!(store.unclustered_items().await.unwrap().len(), 1);
    }

    /// Store that reports "not found" on the first name lookup even
    /// though the cluster exists, forcing the create race.
    struct RacyStore {
        inner: MemoryStore,
        raced: AtomicBool,
    }

    #[async_trait]
    impl ItemStore for RacyStore {
        async fn list_items(&self) -> crate::error::Result<Vec<Item>> {
            self.inner.list_items().await
        }
        async fn unclustered_items(&self) -> crate::error::Result<Vec<Item>> {
            self.inner.unclustered_items().await
        }
        async fn assign_cluster(
            &self,
            item_ids: &[Uuid],
            cluster_id: Uuid,
            original_family: &str,
        ) -> crate::error::Result<u64> {
            self.inner.assign_cluster(item_ids, cluster_id, original_family).await
        }
    }

    #[async_trait]
    impl ClusterStore for RacyStore {
        async fn find_cluster_by_name(&self, name: &str) -> crate::error::Result<Option<Cluster>> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_cluster_by_name(name).await
        }
        async fn create_cluster(
            &self,
            name: &str,
            category: Option<&str>,
        ) -> crate::error::Result<Cluster> {
            self.inner.create_cluster(name, category).await
        }
        async fn list_clusters(&self) -> crate::error::Result<Vec<Cluster>> {
            self.inner.list_clusters().await
        }
        async fn items_in_cluster(&self, cluster_id: Uuid) -> crate::error::Result<Vec<Item>> {
            self.inner.items_in_cluster(cluster_id).await
        }
    }

    #[tokio::test]
    async fn create_race_falls_back_to_suffixed_name() {
        let store = RacyStore {
            inner: MemoryStore::new(),
            raced: AtomicBool::new(false),
        };
        store.inner.create_cluster("Sony WH-1000XM5", None).await.unwrap();

        let families = vec![family_of(&["sony wh-1000xm5"])];
        seed(&store.inner, &families);

        let report = apply_merges(&store, &families, &[merge("Sony WH-1000XM5", &[0])], 25)
            .await
            .unwrap();

        // Forward progress under a disambiguated name, no batch failure
        assert_eq!(report.merges_applied, 1);
        assert_eq!(store.inner.cluster_count(), 2);
        let clusters = store.inner.list_clusters().await.unwrap();
        assert!(clusters
            .iter()
            .any(|c| c.name.starts_with("Sony WH-1000XM5 (")));
    }
}
