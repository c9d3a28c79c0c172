//! Entity-Resolution & Clustering Library
//!
//! Deduplicates and clusters loosely structured product records ("items")
//! into canonical product groups ("clusters"), combining deterministic
//! string-similarity grouping with an LLM consolidation step.
//!
//! # Design Philosophy
//!
//! - **Deterministic first.** Exact grouping, similarity families, and
//!   intra-family collapse are pure functions, fully computed before any
//!   AI call is made.
//! - **The AI proposes, the store disposes.** Proposals are parsed
//!   tolerantly, validated against snapshots, and applied through an
//!   idempotent find-or-create path, so re-running a proposal never
//!   duplicates clusters.
//! - **Degrade, don't abort.** A malformed response or an unreachable
//!   collaborator costs one batch; the run always returns a structured
//!   report callers can act on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clustering::{MemoryStore, Pipeline};
//! use clustering::testing::MockAI;
//!
//! let store = MemoryStore::new();
//! let ai = MockAI::new();
//! let pipeline = Pipeline::new(store, ai);
//!
//! let report = pipeline.run().await?;
//! println!(
//!     "{} items assigned, {} orphans left",
//!     report.items_assigned, report.remaining_orphans
//! );
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, stores)
//! - [`types`] - Domain data types
//! - [`pipeline`] - Grouping, consolidation, resolution, reconciliation
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ClusterError, Result};
pub use traits::{
    ai::AI,
    store::{ClusterStore, InventoryStore, ItemStore},
};
pub use types::{
    config::PipelineConfig,
    family::{ExactGroup, Family, Subgroup},
    item::{Cluster, Item},
    proposal::{MergeGroup, MergeProposal, NewClusterProposal, OrphanAssignment, OrphanProposal},
    report::{BatchReport, ClusterSummary, InventorySummary, OrphanReport, RunReport},
};

// Re-export pipeline components
pub use pipeline::{
    apply_merges, build_families, collapse_families, collapse_family, consolidate_payload,
    exact_groups, exact_key, family_key, format_consolidate_prompt, inventory_summary,
    orphan_payload, parse_merge_response, parse_orphan_response, reconcile_once, similarity,
    Pipeline, CONSOLIDATE_PROMPT, ORPHAN_PROMPT,
};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "openai")]
pub use ai::OpenAI;

// Re-export testing utilities
pub use testing::{MockAI, MockAICall};
