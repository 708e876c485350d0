use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Dropdown value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
}

impl FilterState {
    /// Case-insensitive title search AND category match. Empty search matches everything.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search_text.to_lowercase();
        (needle.is_empty() || product.title.to_lowercase().contains(&needle))
            && self.category.matches(&product.category)
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|product| self.matches(product)).cloned().collect()
    }
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}
