use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::{
    catalog::Catalog,
    models::{
        filter::{FilterState, Selection},
        part::{Part, PartId},
    },
};

/// Distinct brands in first-seen order, behind a leading `All`.
pub fn list_brands(parts: &[Part]) -> Vec<Selection> {
    distinct_in_order(parts.iter().map(|part| part.brand.as_str()))
}

/// Distinct categories in first-seen order, behind a leading `All`.
pub fn list_categories(parts: &[Part]) -> Vec<Selection> {
    distinct_in_order(parts.iter().map(|part| part.category.as_str()))
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Selection> {
    let mut seen = HashSet::new();
    let mut options = vec![Selection::All];
    for value in values {
        if seen.insert(value) {
            options.push(Selection::only(value));
        }
    }
    options
}

/// Ordered subsequence of `parts` passing all three predicates.
pub fn filter_parts<'a>(
    parts: &'a [Part],
    query: &str,
    brand: &Selection,
    category: &Selection,
) -> Vec<&'a Part> {
    let needle = query.to_lowercase();
    parts
        .iter()
        .filter(|part| {
            brand.accepts(&part.brand)
                && category.accepts(&part.category)
                && part.matches_query(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_parts: usize,
    pub in_stock: usize,
    pub brands: usize,
    pub categories: usize,
}

/// Read-only view over a loaded catalog. Cheap to clone and share between sessions.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn parts(&self) -> &[Part] {
        self.catalog.parts()
    }

    pub fn find(&self, id: PartId) -> Option<&Part> {
        self.catalog.find(id)
    }

    pub fn brands(&self) -> Vec<Selection> {
        list_brands(self.catalog.parts())
    }

    pub fn categories(&self) -> Vec<Selection> {
        list_categories(self.catalog.parts())
    }

    pub fn filter(&self, state: &FilterState) -> Vec<&Part> {
        let parts = filter_parts(
            self.catalog.parts(),
            &state.query,
            &state.brand,
            &state.category,
        );
        debug!(
            "Filter {:?} matched {} of {} parts",
            state,
            parts.len(),
            self.catalog.len()
        );
        parts
    }

    pub fn stats(&self) -> CatalogStats {
        let parts = self.catalog.parts();
        CatalogStats {
            total_parts: parts.len(),
            in_stock: parts.iter().filter(|part| part.in_stock).count(),
            brands: list_brands(parts).len() - 1,
            categories: list_categories(parts).len() - 1,
        }
    }
}
