//! Stock-aware recipe feasibility.
//!
//! Pure functions over an in-memory catalog and an available-quantity map.
//! An ingredient absent from the map counts as quantity zero.

use std::collections::{HashMap, HashSet};

use larder_shared::recipe::RecipeLine;
use serde::Serialize;

pub const DEFAULT_MAX_MISSING: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub recipe_id: String,
    pub lines: Vec<RecipeLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableLine {
    pub ingredient_id: String,
    pub required: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingLine {
    pub ingredient_id: String,
    pub required: f64,
    pub available: f64,
    pub needed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlmostMakeable {
    pub recipe_id: String,
    pub available: Vec<AvailableLine>,
    pub missing: Vec<MissingLine>,
    pub missing_count: usize,
}

fn available_for(quantities: &HashMap<String, f64>, ingredient_id: &str) -> f64 {
    quantities.get(ingredient_id).copied().unwrap_or(0.0)
}

/// Ids of the recipes whose every line is covered by the available
/// quantities, in catalog order. A recipe with no lines is trivially
/// makeable.
pub fn makeable(catalog: &[CatalogEntry], quantities: &HashMap<String, f64>) -> Vec<String> {
    catalog
        .iter()
        .filter(|entry| {
            entry
                .lines
                .iter()
                .all(|line| available_for(quantities, &line.ingredient_id) >= line.quantity)
        })
        .map(|entry| entry.recipe_id.to_owned())
        .collect()
}

/// Recipes missing between one and `max_missing` ingredients, ranked by how
/// few are missing. The sort is stable, so ties keep catalog order. Recipes
/// already in `makeable_ids` are never included.
pub fn almost_makeable(
    catalog: &[CatalogEntry],
    makeable_ids: &HashSet<String>,
    quantities: &HashMap<String, f64>,
    max_missing: usize,
) -> Vec<AlmostMakeable> {
    let mut ranked = catalog
        .iter()
        .filter(|entry| !makeable_ids.contains(&entry.recipe_id))
        .map(|entry| {
            let mut available = Vec::new();
            let mut missing = Vec::new();

            for line in &entry.lines {
                let on_hand = available_for(quantities, &line.ingredient_id);

                if on_hand >= line.quantity {
                    available.push(AvailableLine {
                        ingredient_id: line.ingredient_id.to_owned(),
                        required: line.quantity,
                        available: on_hand,
                    });
                } else {
                    missing.push(MissingLine {
                        ingredient_id: line.ingredient_id.to_owned(),
                        required: line.quantity,
                        available: on_hand,
                        needed: (line.quantity - on_hand).max(0.0),
                    });
                }
            }

            AlmostMakeable {
                recipe_id: entry.recipe_id.to_owned(),
                missing_count: missing.len(),
                available,
                missing,
            }
        })
        .filter(|entry| entry.missing_count > 0 && entry.missing_count <= max_missing)
        .collect::<Vec<_>>();

    ranked.sort_by_key(|entry| entry.missing_count);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(recipe_id: &str, lines: &[(&str, f64)]) -> CatalogEntry {
        CatalogEntry {
            recipe_id: recipe_id.to_owned(),
            lines: lines
                .iter()
                .map(|(ingredient_id, quantity)| RecipeLine {
                    ingredient_id: (*ingredient_id).to_owned(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    fn quantities(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(id, quantity)| ((*id).to_owned(), *quantity))
            .collect()
    }

    #[test]
    fn recipe_without_lines_is_always_makeable() {
        let catalog = vec![entry("empty", &[])];

        assert_eq!(makeable(&catalog, &HashMap::new()), vec!["empty"]);
    }

    #[test]
    fn partial_flour_blocks_only_the_bigger_recipe() {
        let catalog = vec![
            entry("a", &[("flour", 2.0), ("sugar", 1.0)]),
            entry("b", &[("flour", 1.0)]),
        ];
        let stock = quantities(&[("flour", 1.0), ("sugar", 1.0)]);

        let makeable_ids = makeable(&catalog, &stock);
        assert_eq!(makeable_ids, vec!["b"]);

        let almost = almost_makeable(
            &catalog,
            &makeable_ids.iter().cloned().collect(),
            &stock,
            DEFAULT_MAX_MISSING,
        );
        assert_eq!(almost.len(), 1);
        assert_eq!(almost[0].recipe_id, "a");
        assert_eq!(almost[0].missing_count, 1);
        assert_eq!(
            almost[0].missing,
            vec![MissingLine {
                ingredient_id: "flour".to_owned(),
                required: 2.0,
                available: 1.0,
                needed: 1.0,
            }]
        );
        assert_eq!(
            almost[0].available,
            vec![AvailableLine {
                ingredient_id: "sugar".to_owned(),
                required: 1.0,
                available: 1.0,
            }]
        );
    }

    #[test]
    fn unknown_ingredient_counts_as_zero() {
        let catalog = vec![entry("a", &[("saffron", 0.5)])];
        let almost = almost_makeable(&catalog, &HashSet::new(), &HashMap::new(), 3);

        assert_eq!(almost[0].missing[0].available, 0.0);
        assert_eq!(almost[0].missing[0].needed, 0.5);
    }

    #[test]
    fn makeable_iff_every_line_is_satisfied() {
        let catalog = vec![entry("a", &[("flour", 2.0), ("milk", 1.0)])];

        assert!(makeable(&catalog, &quantities(&[("flour", 2.0), ("milk", 1.0)])).contains(&"a".to_owned()));
        assert!(makeable(&catalog, &quantities(&[("flour", 2.0), ("milk", 0.5)])).is_empty());
        assert!(makeable(&catalog, &quantities(&[("flour", 1.9), ("milk", 1.0)])).is_empty());
    }

    #[test]
    fn never_returns_makeable_or_too_far_off_recipes() {
        let catalog = vec![
            entry("done", &[("flour", 1.0)]),
            entry("far", &[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)]),
            entry("close", &[("a", 1.0)]),
        ];
        let stock = quantities(&[("flour", 1.0)]);

        let makeable_ids: HashSet<String> = makeable(&catalog, &stock).into_iter().collect();
        let almost = almost_makeable(&catalog, &makeable_ids, &stock, DEFAULT_MAX_MISSING);

        let ids = almost
            .iter()
            .map(|entry| entry.recipe_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["close"]);
    }

    #[test]
    fn ranking_is_ascending_and_stable() {
        let catalog = vec![
            entry("two_missing_first", &[("a", 1.0), ("b", 1.0)]),
            entry("one_missing", &[("a", 1.0)]),
            entry("two_missing_second", &[("c", 1.0), ("d", 1.0)]),
        ];

        let almost = almost_makeable(&catalog, &HashSet::new(), &HashMap::new(), 3);
        let ids = almost
            .iter()
            .map(|entry| entry.recipe_id.as_str())
            .collect::<Vec<_>>();

        assert_eq!(
            ids,
            vec!["one_missing", "two_missing_first", "two_missing_second"]
        );
    }

    #[test]
    fn max_missing_bounds_the_result() {
        let catalog = vec![
            entry("one", &[("a", 1.0)]),
            entry("two", &[("a", 1.0), ("b", 1.0)]),
        ];

        let almost = almost_makeable(&catalog, &HashSet::new(), &HashMap::new(), 1);
        assert_eq!(almost.len(), 1);
        assert_eq!(almost[0].recipe_id, "one");
    }

    #[test]
    fn empty_inputs_yield_empty_results() {
        assert!(makeable(&[], &HashMap::new()).is_empty());
        assert!(almost_makeable(&[], &HashSet::new(), &HashMap::new(), 3).is_empty());
    }
}
