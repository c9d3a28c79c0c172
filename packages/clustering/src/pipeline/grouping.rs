//! Two-tier grouping: exact buckets, then similarity families.

use indexmap::IndexMap;

use crate::pipeline::normalize::exact_key;
use crate::pipeline::similarity::similarity;
use crate::types::family::{ExactGroup, Family, Subgroup};
use crate::types::item::Item;

/// Tier 1: bucket items by exact key.
///
/// A strict partition: every item lands in exactly one group. The group
/// keeps the trimmed spelling of its first item as the display name.
pub fn exact_groups(items: Vec<Item>) -> Vec<ExactGroup> {
    let mut buckets: IndexMap<String, ExactGroup> = IndexMap::new();

    for item in items {
        let key = exact_key(&item.name);
        let group = buckets.entry(key).or_insert_with(|| ExactGroup {
            name: item.name.trim().to_string(),
            items: Vec::new(),
        });
        group.items.push(item);
    }

    buckets.into_values().collect()
}

/// Tier 2: greedy single-pass agglomeration of exact groups into
/// families.
///
/// Groups are visited in order of descending name length so long,
/// specific names become representatives and absorb shorter variants
/// rather than the reverse. A remaining group joins the open family when
/// its similarity to the representative reaches `threshold`; the stored
/// score is rounded to 0-100 and the representative carries 100.
///
/// O(n^2) in the number of exact groups, which stays orders of magnitude
/// below the raw item count.
pub fn build_families(mut groups: Vec<ExactGroup>, threshold: f64) -> Vec<Family> {
    groups.sort_by(|a, b| b.name.len().cmp(&a.name.len()));

    let mut assigned = vec![false; groups.len()];
    let mut families = Vec::new();

    for i in 0..groups.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;

        let representative = &groups[i];
        let mut family = Family {
            family_name: representative.name.clone(),
            subgroups: vec![Subgroup {
                name: representative.name.clone(),
                items: representative.items.clone(),
                similarity: 100,
            }],
        };

        for j in (i + 1)..groups.len() {
            if assigned[j] {
                continue;
            }

            let score = similarity(&representative.name, &groups[j].name);
            if score >= threshold {
                family.subgroups.push(Subgroup {
                    name: groups[j].name.clone(),
                    items: groups[j].items.clone(),
                    similarity: (score * 100.0).round() as u8,
                });
                assigned[j] = true;
            }
        }

        families.push(family);
    }

    // Largest, most significant groupings surface first.
    families.sort_by(|a, b| b.item_count().cmp(&a.item_count()));
    families
}
