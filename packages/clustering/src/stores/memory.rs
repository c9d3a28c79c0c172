//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{ClusterError, Result};
use crate::traits::store::{ClusterStore, ItemStore};
use crate::types::item::{Cluster, Item};

/// In-memory storage for items and clusters.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart. Enforces the cluster-name uniqueness
/// constraint so resolution behavior is exercised the same way as
/// against a real store.
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, Item>>,
    clusters: RwLock<HashMap<Uuid, Cluster>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            clusters: RwLock::new(HashMap::new()),
        }
    }

    /// Insert an item directly (seed helper).
    pub fn insert_item(&self, item: Item) {
        self.items.write().unwrap().insert(item.id, item);
    }

    /// Insert many items directly (seed helper).
    pub fn seed_items(&self, items: impl IntoIterator<Item = Item>) {
        let mut guard = self.items.write().unwrap();
        for item in items {
            guard.insert(item.id, item);
        }
    }

    /// Get a single item by id.
    pub fn item(&self, id: Uuid) -> Option<Item> {
        self.items.read().unwrap().get(&id).cloned()
    }

    /// Number of stored items.
    pub fn item_count(&self) -> usize {
        self.items.read().unwrap().len()
    }

    /// Number of stored clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.read().unwrap().len()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.items.write().unwrap().clear();
        self.clusters.write().unwrap().clear();
    }
}

fn newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.buy_date.cmp(&a.buy_date));
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self.items.read().unwrap().values().cloned().collect();
        newest_first(&mut items);
        Ok(items)
    }

    async fn unclustered_items(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .read()
            .unwrap()
            .values()
            .filter(|i| i.cluster_id.is_none())
            .cloned()
            .collect();
        newest_first(&mut items);
        Ok(items)
    }

    async fn assign_cluster(
        &self,
        item_ids: &[Uuid],
        cluster_id: Uuid,
        original_family: &str,
    ) -> Result<u64> {
        let mut items = self.items.write().unwrap();
        let mut updated = 0;

        for id in item_ids {
            if let Some(item) = items.get_mut(id) {
                item.cluster_id = Some(cluster_id);
                item.original_family = Some(original_family.to_string());
                updated += 1;
            }
        }

        Ok(updated)
    }
}

#[async_trait]
impl ClusterStore for MemoryStore {
    async fn find_cluster_by_name(&self, name: &str) -> Result<Option<Cluster>> {
        Ok(self
            .clusters
            .read()
            .unwrap()
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn create_cluster(&self, name: &str, category: Option<&str>) -> Result<Cluster> {
        let mut clusters = self.clusters.write().unwrap();

        if clusters.values().any(|c| c.name == name) {
            return Err(ClusterError::DuplicateClusterName {
                name: name.to_string(),
            });
        }

        let mut cluster = Cluster::new(name);
        if let Some(category) = category {
            cluster = cluster.with_category(category);
        }
        clusters.insert(cluster.id, cluster.clone());
        Ok(cluster)
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        let mut clusters: Vec<Cluster> = self.clusters.read().unwrap().values().cloned().collect();
        // Newest first; name as a deterministic tie-break
        clusters.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(clusters)
    }

    async fn items_in_cluster(&self, cluster_id: Uuid) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .read()
            .unwrap()
            .values()
            .filter(|i| i.cluster_id == Some(cluster_id))
            .cloned()
            .collect();
        newest_first(&mut items);
        Ok(items)
    }
}
