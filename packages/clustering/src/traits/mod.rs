//! Core trait abstractions: the AI collaborator and the persistent store.

pub mod ai;
pub mod store;

pub use ai::AI;
pub use store::{ClusterStore, InventoryStore, ItemStore};
