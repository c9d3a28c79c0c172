//! Transient grouping types produced by the deterministic pipeline.
//!
//! None of these are persisted; they live for one grouping pass and are
//! the unit of exchange with the AI collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::item::Item;

/// A Tier-1 bucket: items whose names are identical modulo case and
/// surrounding whitespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactGroup {
    /// Trimmed representative spelling (taken from the first item).
    pub name: String,

    /// All items sharing the exact key.
    pub items: Vec<Item>,
}

/// One exact group inside a family, with its similarity to the family
/// representative (0-100; the representative itself carries 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subgroup {
    pub name: String,
    pub items: Vec<Item>,
    pub similarity: u8,
}

/// A family of similar exact groups: the unit offered to the AI
/// collaborator for canonicalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    /// Representative display name (the longest member's spelling).
    pub family_name: String,

    /// Member subgroups, representative first.
    pub subgroups: Vec<Subgroup>,
}

impl Family {
    /// Total number of items across all subgroups.
    pub fn item_count(&self) -> usize {
        self.subgroups.iter().map(|sg| sg.items.len()).sum()
    }

    /// Ids of every item in the family, in subgroup order.
    pub fn item_ids(&self) -> Vec<Uuid> {
        self.subgroups
            .iter()
            .flat_map(|sg| sg.items.iter().map(|i| i.id))
            .collect()
    }
}
