//! Listing logic: section selection, date ordering, search and lookup
//!
//! The free functions work on any slice of pages. [`Catalog`] applies them to
//! a [`ContentProvider`] using the section names from the site config.

mod catalog;

pub use catalog::{Catalog, SearchResults};

use std::sync::Arc;

use crate::content::Page;

/// Pages under `section`, matched on whole path segments, in input order
pub fn select_section(pages: &[Arc<Page>], section: &str) -> Vec<Arc<Page>> {
    pages
        .iter()
        .filter(|p| p.in_section(section))
        .cloned()
        .collect()
}

/// Keep only pages whose `published` flag is literally `true`
pub fn only_published(pages: Vec<Arc<Page>>) -> Vec<Arc<Page>> {
    pages.into_iter().filter(|p| p.is_published()).collect()
}

/// Newest first. Stable, and pages without a date go last.
pub fn sort_by_date_desc(pages: &mut [Arc<Page>]) {
    // Option orders None before Some, so reversing puts undated pages last
    pages.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// Pages whose body contains `query`, ignoring case, in input order
pub fn search_bodies(pages: &[Arc<Page>], query: &str) -> Vec<Arc<Page>> {
    let needle = query.to_lowercase();
    pages
        .iter()
        .filter(|p| p.body.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
