//! Product listing: search filtering, pagination and layout.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Products shown per listing page.
pub const PAGE_SIZE: usize = 6;

/// Listing layout. Purely presentational; never affects filtering or paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Query-string value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    #[must_use]
    pub fn is_grid(&self) -> bool {
        *self == Self::Grid
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        *self == Self::List
    }
}

/// Whether a product matches a search term.
///
/// Matches when the title or the category name contains the term, ignoring
/// case. An empty term matches everything.
#[must_use]
pub fn matches_term(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    product.title.to_lowercase().contains(&needle)
        || product.category.as_str().to_lowercase().contains(&needle)
}

/// Filter products by a search term, preserving order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| matches_term(product, term))
        .collect()
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page (at most [`PAGE_SIZE`]).
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: usize,
    /// Total pages, `ceil(total_items / PAGE_SIZE)`.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Cut page `number` out of `items`.
    ///
    /// The page number is clamped to `1..=total_pages`, so a number past the
    /// end lands on the last page. An empty listing is page 1 of 0.
    #[must_use]
    pub fn new(items: Vec<T>, number: usize) -> Self {
        let total_items = items.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE);
        let number = number.clamp(1, total_pages.max(1));
        let start = (number - 1).saturating_mul(PAGE_SIZE);

        let items = items.into_iter().skip(start).take(PAGE_SIZE).collect();

        Self {
            items,
            number,
            total_pages,
            total_items,
        }
    }

    /// 1-based index of the first item on this page, for "Showing a-b of n".
    #[must_use]
    pub const fn first_index(&self) -> usize {
        (self.number - 1).saturating_mul(PAGE_SIZE).saturating_add(1)
    }

    /// 1-based index of the last item on this page.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.number.saturating_mul(PAGE_SIZE).min(self.total_items)
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether the pagination control should be shown at all.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// All page numbers, for rendering the pager.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
