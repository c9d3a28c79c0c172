//! Read-only reporting projections over the store.

use crate::error::Result;
use crate::traits::store::InventoryStore;
use crate::types::report::{ClusterSummary, InventorySummary};

/// Group resolved items by cluster with their merged-family provenance,
/// plus the current orphan list.
///
/// Purely a projection; nothing is mutated.
pub async fn inventory_summary<S>(store: &S) -> Result<InventorySummary>
where
    S: InventoryStore + ?Sized,
{
    let clusters = store.list_clusters().await?;
    let mut summary = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let items = store.items_in_cluster(cluster.id).await?;

        let mut merged_families: Vec<String> = Vec::new();
        for item in &items {
            if let Some(family) = &item.original_family {
                if !merged_families.contains(family) {
                    merged_families.push(family.clone());
                }
            }
        }

        summary.push(ClusterSummary {
            cluster_name: cluster.name,
            merged_families,
            items,
        });
    }

    let unclustered = store.unclustered_items().await?;
    Ok(InventorySummary { summary, unclustered })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::stores::MemoryStore;
    use crate::traits::store::{ClusterStore, ItemStore};
    use crate::types::item::Item;

    #[tokio::test]
    async fn summary_groups_items_and_dedupes_families() {
        let store = MemoryStore::new();
        let cluster = store.create_cluster("Sony WH-1000XM5", None).await.unwrap();

        let older = Item::new("sony wh-1000xm5").with_buy_date(Utc::now() - Duration::days(30));
        let newer = Item::new("Sony WH-1000XM5");
        let ids = [older.id, newer.id];
        store.insert_item(older);
        store.insert_item(newer);
        store
            .assign_cluster(&ids, cluster.id, "Sony WH-1000XM5")
            .await
            .unwrap();

        let orphan = Item::new("mystery gadget");
        store.insert_item(orphan.clone());

        let summary = inventory_summary(&store).await.unwrap();

        assert_eq!(summary.summary.len(), 1);
        let entry = &summary.summary[0];
        assert_eq!(entry.cluster_name, "Sony WH-1000XM5");
        assert_eq!(entry.merged_families, vec!["Sony WH-1000XM5"]);
        // Newest purchase first
        assert_eq!(entry.items[0].name, "Sony WH-1000XM5");
        assert_eq!(summary.unclustered.len(), 1);
        assert_eq!(summary.unclustered[0].id, orphan.id);
    }

    #[tokio::test]
    async fn distinct_source_families_are_listed_separately() {
        let store = MemoryStore::new();
        let cluster = store.create_cluster("Shimano Disc Rotor", None).await.unwrap();

        let a = Item::new("Shimano Disc Rotor");
        let b = Item::new("Bremsscheibe Shimano");
        store.insert_item(a.clone());
        store.insert_item(b.clone());
        store
            .assign_cluster(&[a.id], cluster.id, "Shimano Disc Rotor")
            .await
            .unwrap();
        store
            .assign_cluster(&[b.id], cluster.id, "Bremsscheibe Shimano")
            .await
            .unwrap();

        let summary = inventory_summary(&store).await.unwrap();

        let mut families = summary.summary[0].merged_families.clone();
        families.sort();
        assert_eq!(families, vec!["Bremsscheibe Shimano", "Shimano Disc Rotor"]);
    }
}
