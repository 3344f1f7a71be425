//! Facetta store: catalog assembly, JSON loading and sample data.

#![forbid(unsafe_code)]

pub mod sample;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use facetta_core::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

pub use sample::SampleDataBuilder;

/// Collects items, enforcing id uniqueness, and freezes them into a `Catalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: Vec<Item>,
    ids: FxHashSet<ItemId>,
}

impl CatalogBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Append an item. A repeated id is rejected and the builder is left unchanged.
    pub fn insert(&mut self, item: Item) -> SearchResult<()> {
        if !self.ids.insert(item.id) {
            metrics::counter!("catalog_duplicates_total", 1u64);
            warn!(id = %item.id, name = %item.name, "duplicate item id rejected");
            return Err(SearchError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) -> SearchResult<()> {
        for it in items { self.insert(it)?; }
        Ok(())
    }

    pub fn freeze(&self) -> Arc<Catalog> {
        debug!(items = self.items.len(), "catalog frozen");
        Arc::new(Catalog { items: self.items.clone() })
    }

    pub fn into_catalog(self) -> Catalog { Catalog { items: self.items } }
}

/// Parse a JSON array of items into a catalog.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let items: Vec<Item> = serde_json::from_str(json).context("catalog is not a JSON array of items")?;
    let mut builder = CatalogBuilder::new();
    builder.extend(items).context("catalog contains a repeated item id")?;
    Ok(builder.into_catalog())
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = parse_catalog(&raw).with_context(|| format!("loading catalog {}", path.display()))?;
    info!(path = %path.display(), items = catalog.items.len(), "catalog loaded");
    Ok(catalog)
}
