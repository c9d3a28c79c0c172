//! Storage traits for items and clusters.
//!
//! The storage layer is split into focused traits for flexibility:
//! - `ItemStore`: product item records and bulk cluster assignment
//! - `ClusterStore`: canonical clusters with a unique-name constraint
//! - `InventoryStore`: composite trait combining both
//!
//! A relational or a document store both satisfy these contracts; the
//! pipeline only relies on the operations below.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::item::{Cluster, Item};

/// Store for product item records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// List all items, ordered by buy date descending.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// List items with no cluster assignment (orphans), ordered by buy
    /// date descending.
    async fn unclustered_items(&self) -> Result<Vec<Item>>;

    /// Bulk-assign a cluster and a provenance marker to the given items.
    ///
    /// Returns the number of items actually updated; ids not present in
    /// the store are ignored, not errors.
    async fn assign_cluster(
        &self,
        item_ids: &[Uuid],
        cluster_id: Uuid,
        original_family: &str,
    ) -> Result<u64>;
}

/// Store for canonical product clusters.
#[async_trait]
pub trait ClusterStore: Send + Sync {
    /// Look up a cluster by its exact canonical name.
    async fn find_cluster_by_name(&self, name: &str) -> Result<Option<Cluster>>;

    /// Create a cluster under a unique name.
    ///
    /// Fails with [`ClusterError::DuplicateClusterName`] when the name is
    /// already taken. Callers run the find-or-create protocol rather than
    /// creating blindly.
    ///
    /// [`ClusterError::DuplicateClusterName`]: crate::error::ClusterError::DuplicateClusterName
    async fn create_cluster(&self, name: &str, category: Option<&str>) -> Result<Cluster>;

    /// List all clusters, newest first.
    async fn list_clusters(&self) -> Result<Vec<Cluster>>;

    /// Items currently assigned to a cluster, ordered by buy date
    /// descending.
    async fn items_in_cluster(&self, cluster_id: Uuid) -> Result<Vec<Item>>;
}

/// Composite storage trait combining items and clusters.
///
/// This is the main trait consumed by the pipeline.
pub trait InventoryStore: ItemStore + ClusterStore {}

// Blanket implementation: anything implementing both traits is an InventoryStore
impl<T: ItemStore + ClusterStore> InventoryStore for T {}
