//! LLM prompts and payload builders for the clustering pipeline.
//!
//! Prompts are plain templates with `{placeholder}` slots; payloads are
//! compact JSON documents the collaborator reasons over.

use serde_json::json;

use crate::types::family::Family;
use crate::types::item::{Cluster, Item};

/// Cap on the rendered existing-cluster-name list, so the prompt stays
/// bounded even against a large store.
const EXISTING_NAMES_BUDGET: usize = 1000;

/// Prompt for consolidating redundant product families.
pub const CONSOLIDATE_PROMPT: &str = r#"You are an inventory manager. Your task is to consolidate redundant product groups ("families").

INPUT:
A JSON list of families. Each has an id and a representative name (familyName).

TASK:
1. Analyze the list. Find entries that describe the same physical product.
2. When entries belong together, merge them under one clean canonical name.
3. The canonical name should be precise (brand + model + type), e.g. "Shimano ST-R7120 Brake Lever".

MERGE RULES:
- Generic vs. specific: if one entry is "Chain Whip" and another is "ParkTool Chain Whip SR-12.2", they belong together. Fold the generic term into the specific cluster.
- Synonyms and word order: "Shimano Disc Rotor" == "Disc Rotor Shimano". Same thing - merge.
- Variants: "T-Shirt Pink M" and "T-Shirt Pink L" merge into "T-Shirt Pink" (size does not matter for the cluster).
- Be bold with tools and parts: nobody buys three different chain checkers at once. Merge them.

EXISTING PRODUCTS (reuse these names exactly when they fit):
[{existing_clusters}]

OUTPUT FORMAT (JSON):
{
  "merges": [
    {
      "canonicalName": "Cluster name",
      "idsToMerge": [0, 5, 12]
    }
  ]
}
Every input id must appear in 'idsToMerge' exactly once. Leave nobody out."#;

/// Prompt for reconciling orphaned items against existing clusters.
pub const ORPHAN_PROMPT: &str = r#"You are an inventory cleanup expert.

SITUATION:
The payload holds a list of unassigned items (orphans) and a list of existing clusters (already sorted products).

TASK:
Assign the orphans.
1. MATCH EXISTING: when an orphan belongs to an existing cluster, assign it (use the cluster id).
2. NEW GROUP: when several orphans belong together but no cluster exists yet, form ONE new cluster for them.
3. SINGLETON: when an orphan is unique and looks significant, create a new cluster for it alone.

OUTPUT FORMAT (JSON):
{
  "assignments": [
    { "itemId": "item-uuid-1", "targetClusterId": "cluster-uuid-a" }
  ],
  "newClusters": [
    { "name": "New product name", "itemIds": ["item-uuid-2", "item-uuid-3"] }
  ]
}"#;

/// Render the consolidation prompt with the existing canonical names.
///
/// The joined list is truncated to a fixed byte budget, backing off to
/// the previous character boundary.
pub fn format_consolidate_prompt(existing_names: &[String]) -> String {
    let mut joined = existing_names.join(", ");
    if joined.len() > EXISTING_NAMES_BUDGET {
        let mut end = EXISTING_NAMES_BUDGET;
        while !joined.is_char_boundary(end) {
            end -= 1;
        }
        joined.truncate(end);
    }

    CONSOLIDATE_PROMPT.replace("{existing_clusters}", &joined)
}

/// Batch payload for consolidation: one entry per family, with the
/// batch-local index as its id.
pub fn consolidate_payload(families: &[Family]) -> String {
    let entries: Vec<_> = families
        .iter()
        .enumerate()
        .map(|(id, family)| json!({ "id": id, "familyName": family.family_name }))
        .collect();

    serde_json::Value::Array(entries).to_string()
}

/// Payload for orphan reconciliation: existing clusters and unassigned
/// items, ids and names only.
pub fn orphan_payload(clusters: &[Cluster], orphans: &[Item]) -> String {
    json!({
        "existing_clusters": clusters
            .iter()
            .map(|c| json!({ "id": c.id, "name": c.name }))
            .collect::<Vec<_>>(),
        "unassigned_items": orphans
            .iter()
            .map(|i| json!({ "id": i.id, "name": i.name }))
            .collect::<Vec<_>>(),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consolidate_prompt_embeds_existing_names() {
        let prompt = format_consolidate_prompt(&[
            "Sony WH-1000XM5".to_string(),
            "T-Shirt Pink".to_string(),
        ]);

        assert!(prompt.contains("[Sony WH-1000XM5, T-Shirt Pink]"));
        assert!(!prompt.contains("{existing_clusters}"));
    }

    #[test]
    fn existing_names_are_truncated() {
        let names: Vec<String> = (0..200).map(|i| format!("Cluster Number {i}")).collect();
        let prompt = format_consolidate_prompt(&names);

        assert!(prompt.len() < CONSOLIDATE_PROMPT.len() + EXISTING_NAMES_BUDGET);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let names: Vec<String> = (0..300).map(|_| "Gepäckträger".to_string()).collect();
        // Would panic on a byte-boundary truncate inside "ä"
        let prompt = format_consolidate_prompt(&names);
        assert!(!prompt.is_empty());
    }

    #[test]
    fn consolidate_payload_uses_batch_local_ids() {
        let families = vec![
            Family {
                family_name: "Sony WH-1000XM5".to_string(),
                subgroups: vec![],
            },
            Family {
                family_name: "T-Shirt Pink".to_string(),
                subgroups: vec![],
            },
        ];

        let payload = consolidate_payload(&families);
        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(parsed[0]["id"], 0);
        assert_eq!(parsed[1]["id"], 1);
        assert_eq!(parsed[1]["familyName"], "T-Shirt Pink");
    }

    #[test]
    fn orphan_payload_carries_ids_and_names_only() {
        let clusters = vec![Cluster::new("Sony WH-1000XM5")];
        let orphans = vec![Item::new("sony headphones").with_price(199.0)];

        let payload = orphan_payload(&clusters, &orphans);
        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(parsed["existing_clusters"][0]["name"], "Sony WH-1000XM5");
        assert_eq!(parsed["unassigned_items"][0]["name"], "sony headphones");
        assert!(parsed["unassigned_items"][0].get("price").is_none());
    }
}
