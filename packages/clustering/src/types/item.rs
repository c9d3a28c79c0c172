//! Persistent records: items and clusters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single physical-product record to be clustered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable unique id, assigned at creation and never changed.
    pub id: Uuid,

    /// Free-text product name as extracted from the source document.
    pub name: String,

    /// Purchase price, if known.
    pub price: Option<f64>,

    /// Currency code for the price (e.g. "EUR").
    pub currency: Option<String>,

    /// Shop or merchant the item was bought from.
    pub shop: Option<String>,

    /// Purchase date. Doubles as the sort key and as the fallback date
    /// of record.
    pub buy_date: DateTime<Utc>,

    /// Weak back-reference to the originating extraction record.
    pub source_id: Option<String>,

    /// The cluster this item belongs to. `None` means orphan.
    pub cluster_id: Option<Uuid>,

    /// Which family (or late-assignment path) this item was clustered
    /// from. Audit trail only, never consulted for matching.
    pub original_family: Option<String>,
}

impl Item {
    /// Create a new unclustered item with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: None,
            currency: None,
            shop: None,
            buy_date: Utc::now(),
            source_id: None,
            cluster_id: None,
            original_family: None,
        }
    }

    /// Set the purchase price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the currency code.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the shop.
    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(shop.into());
        self
    }

    /// Set the purchase date.
    pub fn with_buy_date(mut self, buy_date: DateTime<Utc>) -> Self {
        self.buy_date = buy_date;
        self
    }

    /// Set the back-reference to the originating extraction record.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Whether this item is still waiting for a cluster assignment.
    pub fn is_orphan(&self) -> bool {
        self.cluster_id.is_none()
    }
}

/// A canonical, uniquely named product group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Stable unique id.
    pub id: Uuid,

    /// Canonical display name. Unique across all clusters.
    pub name: String,

    /// Optional product category (e.g. "Electronics").
    pub category: Option<String>,

    /// When the cluster was first created.
    pub created_at: DateTime<Utc>,
}

impl Cluster {
    /// Create a new cluster with the given canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            created_at: Utc::now(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
