//! Expiration classification of a user's stock.
//!
//! Pure functions over in-memory lots and a reference calendar day. A lot
//! expiring exactly on the reference day is always `expiring_today`, never
//! expired or expiring soon.

use std::collections::HashMap;

use larder_shared::ingredient::Unit;
use serde::Serialize;
use time::Date;

pub const EXPIRING_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockItem {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub unit: Unit,
    pub quantity: f64,
    pub expires_on: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessTier {
    Expired,
    ExpiringToday,
    ExpiringSoon,
    Fresh,
}

pub fn tier(expires_on: Date, today: Date) -> FreshnessTier {
    if expires_on == today {
        FreshnessTier::ExpiringToday
    } else if expires_on < today {
        FreshnessTier::Expired
    } else if (expires_on - today).whole_days() <= EXPIRING_SOON_DAYS {
        FreshnessTier::ExpiringSoon
    } else {
        FreshnessTier::Fresh
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ClassifiedStock {
    pub expired: Vec<StockItem>,
    pub expiring_today: Vec<StockItem>,
    pub expiring_soon: Vec<StockItem>,
    pub fresh: Vec<StockItem>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    pub total: usize,
    pub expired: usize,
    pub expiring_today: usize,
    pub expiring_soon: usize,
    pub fresh: usize,
}

impl ClassifiedStock {
    pub fn summary(&self) -> StockSummary {
        StockSummary {
            total: self.expired.len()
                + self.expiring_today.len()
                + self.expiring_soon.len()
                + self.fresh.len(),
            expired: self.expired.len(),
            expiring_today: self.expiring_today.len(),
            expiring_soon: self.expiring_soon.len(),
            fresh: self.fresh.len(),
        }
    }
}

/// Partitions every item into exactly one tier.
pub fn classify(items: Vec<StockItem>, today: Date) -> ClassifiedStock {
    let mut classified = ClassifiedStock::default();

    for item in items {
        match tier(item.expires_on, today) {
            FreshnessTier::Expired => classified.expired.push(item),
            FreshnessTier::ExpiringToday => classified.expiring_today.push(item),
            FreshnessTier::ExpiringSoon => classified.expiring_soon.push(item),
            FreshnessTier::Fresh => classified.fresh.push(item),
        }
    }

    classified
}

/// Summed quantity per ingredient over every lot. Expired lots count too:
/// classification never subtracts from availability.
pub fn available_quantities(items: &[StockItem]) -> HashMap<String, f64> {
    let mut quantities = HashMap::new();

    for item in items {
        *quantities.entry(item.ingredient_id.to_owned()).or_insert(0.0) += item.quantity;
    }

    quantities
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::date};

    const TODAY: Date = date!(2026 - 08 - 07);

    fn item(ingredient_id: &str, quantity: f64, expires_on: Date) -> StockItem {
        StockItem {
            ingredient_id: ingredient_id.to_owned(),
            ingredient_name: ingredient_id.to_owned(),
            unit: Unit::G,
            quantity,
            expires_on,
        }
    }

    #[test]
    fn boundary_days_land_in_the_documented_tiers() {
        assert_eq!(tier(TODAY - Duration::days(1), TODAY), FreshnessTier::Expired);
        assert_eq!(tier(TODAY, TODAY), FreshnessTier::ExpiringToday);
        assert_eq!(
            tier(TODAY + Duration::days(1), TODAY),
            FreshnessTier::ExpiringSoon
        );
        assert_eq!(
            tier(TODAY + Duration::days(3), TODAY),
            FreshnessTier::ExpiringSoon
        );
        assert_eq!(tier(TODAY + Duration::days(4), TODAY), FreshnessTier::Fresh);
    }

    #[test]
    fn buckets_are_disjoint_and_exhaustive() {
        let items = (-5i64..=5)
            .map(|offset| item("milk", 1.0, TODAY + Duration::days(offset)))
            .collect::<Vec<_>>();
        let total = items.len();

        let classified = classify(items, TODAY);
        let summary = classified.summary();

        assert_eq!(summary.total, total);
        assert_eq!(
            summary.expired + summary.expiring_today + summary.expiring_soon + summary.fresh,
            total
        );
        assert_eq!(summary.expired, 5);
        assert_eq!(summary.expiring_today, 1);
        assert_eq!(summary.expiring_soon, 3);
        assert_eq!(summary.fresh, 2);
    }

    #[test]
    fn expiring_exactly_today_is_never_expired() {
        let classified = classify(vec![item("milk", 1.0, TODAY)], TODAY);

        assert!(classified.expired.is_empty());
        assert_eq!(classified.expiring_today.len(), 1);
        assert!(classified.expiring_soon.is_empty());
    }

    #[test]
    fn quantities_sum_across_lots_including_expired_ones() {
        let items = vec![
            item("flour", 2.0, TODAY - Duration::days(10)),
            item("flour", 3.0, TODAY + Duration::days(10)),
            item("sugar", 1.0, TODAY),
        ];

        let quantities = available_quantities(&items);

        assert_eq!(quantities.get("flour"), Some(&5.0));
        assert_eq!(quantities.get("sugar"), Some(&1.0));
        assert_eq!(quantities.get("salt"), None);
    }

    #[test]
    fn empty_stock_is_not_an_error() {
        let classified = classify(vec![], TODAY);

        assert_eq!(classified.summary().total, 0);
        assert!(available_quantities(&[]).is_empty());
    }
}
