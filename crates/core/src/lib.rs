//! Facetta core types: items, facet axes, queries, results and errors.

#![forbid(unsafe_code)]

pub mod facets;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use facets::{Color, Facet, ParseFacetError, Size};

pub type ItemId = uuid::Uuid;

/// A catalog entry: one value per facet axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display label, e.g. "Red - Small".
    pub name: String,
    pub size: Size,
    pub color: Color,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, size: Size, color: Color) -> Self {
        Self { id, name: name.into(), size, color }
    }

    /// The item's value on axis `F`.
    pub fn facet<F: FacetOf>(&self) -> F { F::of(self) }
}

/// Axes an `Item` carries a value for.
pub trait FacetOf: Facet {
    fn of(item: &Item) -> Self;
}

impl FacetOf for Color {
    fn of(item: &Item) -> Self { item.color }
}

impl FacetOf for Size {
    fn of(item: &Item) -> Self { item.size }
}

/// Immutable, id-unique list of items handed to the search engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Catalog {
    pub items: Vec<Item>,
}

/// Allowed values per axis. An empty selection leaves that axis unrestricted;
/// a field missing from serialized input is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub colors: SmallVec<[Color; 5]>,
    #[serde(default)]
    pub sizes: SmallVec<[Size; 3]>,
}

impl SearchOptions {
    pub fn new() -> Self { Self::default() }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }

    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = Size>) -> Self {
        self.sizes.extend(sizes);
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        (self.colors.is_empty() || self.colors.contains(&item.color))
            && (self.sizes.is_empty() || self.sizes.contains(&item.size))
    }
}

/// Number of result items holding `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount<F> {
    pub value: F,
    pub count: usize,
}

pub type ColorCount = FacetCount<Color>;
pub type SizeCount = FacetCount<Size>;

/// Matching items plus a facet breakdown per axis. Each breakdown holds one
/// entry per registry value in registry order, zero counts included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub items: Vec<Item>,
    pub color_counts: Vec<ColorCount>,
    pub size_counts: Vec<SizeCount>,
}

impl SearchResults {
    pub fn color_count(&self, color: Color) -> usize { count_of(&self.color_counts, color) }
    pub fn size_count(&self, size: Size) -> usize { count_of(&self.size_counts, size) }
}

fn count_of<F: Facet>(counts: &[FacetCount<F>], value: F) -> usize {
    counts.iter().find(|c| c.value == value).map(|c| c.count).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A required argument was absent; carries the parameter name.
    #[error("invalid argument: {0} cannot be absent")]
    InvalidArgument(&'static str),
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),
}

pub type SearchResult<T> = Result<T, SearchError>;

pub mod prelude {
    pub use super::{
        Catalog, Color, ColorCount, Facet, FacetCount, FacetOf, Item, ItemId, SearchError, SearchOptions,
        SearchResult, SearchResults, Size, SizeCount,
    };
}
