//! Derived dashboard views, computed from whatever rows were last fetched.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use millet_types::{Adoption, MilletType, Notification, Product, Reward, ValidationError};
use uuid::Uuid;

/// Millet selector on the consumer dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MilletFilter {
    #[default]
    All,
    Only(MilletType),
}

impl MilletFilter {
    pub fn matches(&self, millet: MilletType) -> bool {
        match self {
            MilletFilter::All => true,
            MilletFilter::Only(selected) => *selected == millet,
        }
    }
}

impl fmt::Display for MilletFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilletFilter::All => f.write_str("all"),
            MilletFilter::Only(millet) => f.write_str(millet.as_str()),
        }
    }
}

impl FromStr for MilletFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(MilletFilter::All)
        } else {
            s.parse().map(MilletFilter::Only)
        }
    }
}

pub fn reward_total(rewards: &[Reward]) -> i64 {
    rewards.iter().map(|r| r.points).sum()
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

/// Search predicate: case-insensitive substring of the millet name or the
/// description, and the millet selector.
pub fn product_matches(product: &Product, search: &str, filter: &MilletFilter) -> bool {
    let needle = search.to_lowercase();
    let in_name = product.millet_type.as_str().to_lowercase().contains(&needle);
    let in_description = product
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(&needle));

    (in_name || in_description) && filter.matches(product.millet_type)
}

/// Products passing [`product_matches`], in their original order.
pub fn filter_products(products: &[Product], search: &str, filter: &MilletFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| product_matches(p, search, filter))
        .cloned()
        .collect()
}

/// Selector options: `All` followed by each millet present, first-seen order.
pub fn millet_options(products: &[Product]) -> Vec<MilletFilter> {
    let mut seen = HashSet::new();
    std::iter::once(MilletFilter::All)
        .chain(
            products
                .iter()
                .filter(|p| seen.insert(p.millet_type))
                .map(|p| MilletFilter::Only(p.millet_type)),
        )
        .collect()
}

/// Distinct owners of the listed products, first-seen order.
pub fn farmer_ids(products: &[Product]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.farmer_id))
        .map(|p| p.farmer_id)
        .collect()
}

/// Whether any adoption row points at this farmer. Display only; it does
/// not stop a second adoption from being submitted.
pub fn is_adopted(adoptions: &[Adoption], farmer_id: Uuid) -> bool {
    adoptions.iter().any(|a| a.farmer_id == farmer_id)
}
