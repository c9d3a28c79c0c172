//! Intra-family collapse of near-identical subgroups.

use crate::pipeline::similarity::similarity;
use crate::types::family::{Family, Subgroup};

/// Merge subgroups of a family whose names are effectively the same
/// spelling (similarity at or above `threshold`).
///
/// Catches case- and whitespace-only duplicates that slipped past exact
/// grouping. Subgroups are re-sorted by descending similarity first, so
/// the representative stays in front and absorbs its doubles.
pub fn collapse_family(family: &mut Family, threshold: f64) {
    if family.subgroups.len() <= 1 {
        return;
    }

    family.subgroups.sort_by(|a, b| b.similarity.cmp(&a.similarity));

    let subgroups = std::mem::take(&mut family.subgroups);
    let mut consumed = vec![false; subgroups.len()];
    let mut merged: Vec<Subgroup> = Vec::with_capacity(subgroups.len());

    for i in 0..subgroups.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut base = subgroups[i].clone();
        for j in (i + 1)..subgroups.len() {
            if consumed[j] {
                continue;
            }
            if similarity(&base.name, &subgroups[j].name) >= threshold {
                base.items.extend(subgroups[j].items.iter().cloned());
                consumed[j] = true;
            }
        }
        merged.push(base);
    }

    family.subgroups = merged;
}

/// Collapse every family in place.
pub fn collapse_families(families: &mut [Family], threshold: f64) {
    for family in families.iter_mut() {
        collapse_family(family, threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::item::Item;

    fn subgroup(name: &str, count: usize, similarity: u8) -> Subgroup {
        Subgroup {
            name: name.to_string(),
            items: (0..count).map(|_| Item::new(name)).collect(),
            similarity,
        }
    }

    #[test]
    fn whitespace_only_doubles_merge_into_one_subgroup() {
        let mut family = Family {
            family_name: "Sony WH-1000XM5 Black".to_string(),
            subgroups: vec![
                subgroup("Sony WH-1000XM5 Black", 1, 100),
                subgroup("Sony  WH-1000XM5", 2, 67),
                subgroup("sony wh-1000xm5", 1, 67),
            ],
        };

        collapse_family(&mut family, 0.99);

        assert_eq!(family.subgroups.len(), 2);
        assert_eq!(family.subgroups[0].name, "Sony WH-1000XM5 Black");
        assert_eq!(family.subgroups[1].items.len(), 3);
    }

    #[test]
    fn distinct_variants_stay_separate() {
        let mut family = Family {
            family_name: "T-Shirt Pink Logo".to_string(),
            subgroups: vec![
                subgroup("T-Shirt Pink Logo", 1, 100),
                subgroup("T-Shirt Pink", 1, 67),
            ],
        };

        collapse_family(&mut family, 0.99);

        assert_eq!(family.subgroups.len(), 2);
    }

    #[test]
    fn representative_is_sorted_to_the_front() {
        let mut family = Family {
            family_name: "Chain Checker".to_string(),
            subgroups: vec![
                subgroup("chain checker pro", 1, 72),
                subgroup("Chain Checker", 1, 100),
            ],
        };

        collapse_family(&mut family, 0.99);

        assert_eq!(family.subgroups[0].similarity, 100);
    }

    #[test]
    fn single_subgroup_is_untouched() {
        let mut family = Family {
            family_name: "Solo".to_string(),
            subgroups: vec![subgroup("Solo Item Name", 2, 100)],
        };

        collapse_family(&mut family, 0.99);

        assert_eq!(family.subgroups.len(), 1);
        assert_eq!(family.subgroups[0].items.len(), 2);
    }
}
