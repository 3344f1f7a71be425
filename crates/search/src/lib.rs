//! Facetta search: in-RAM facet index and query over a fixed catalog.
//! Built once; every query is a read over immutable postings.

#![forbid(unsafe_code)]

use facetta_core::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Position of an item in catalog order.
pub type DocId = u32;

/// How the per-axis candidate sets are combined for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePlan {
    /// Both axes constrain: intersect their unions.
    Both,
    ColorsOnly,
    SizesOnly,
    /// No axis constrains: every item matches.
    All,
}

impl CandidatePlan {
    pub fn from_constraints(colors: bool, sizes: bool) -> Self {
        match (colors, sizes) {
            (true, true) => CandidatePlan::Both,
            (true, false) => CandidatePlan::ColorsOnly,
            (false, true) => CandidatePlan::SizesOnly,
            (false, false) => CandidatePlan::All,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchDebugInfo {
    pub total: usize,
    pub plan: CandidatePlan,
    /// Union size for the color selection, when colors constrain.
    pub color_candidates: Option<usize>,
    pub size_candidates: Option<usize>,
    pub matched: usize,
}

// value -> ascending doc ids holding that value
#[derive(Debug)]
struct Postings<F> {
    by_value: FxHashMap<F, Vec<DocId>>,
}

impl<F: FacetOf> Postings<F> {
    fn build(items: &[Item]) -> Self {
        let mut by_value: FxHashMap<F, Vec<DocId>> = FxHashMap::default();
        for (i, it) in items.iter().enumerate() {
            by_value.entry(it.facet::<F>()).or_default().push(i as DocId);
        }
        Self { by_value }
    }

    /// Sorted, de-duplicated union of the postings for `selected`.
    /// Values without postings contribute nothing.
    fn union(&self, selected: &[F]) -> Vec<DocId> {
        let mut out: Vec<DocId> = Vec::new();
        let mut seen: Vec<F> = Vec::with_capacity(selected.len());
        for v in selected.iter().copied() {
            if seen.contains(&v) { continue; }
            seen.push(v);
            if let Some(post) = self.by_value.get(&v) {
                out = if out.is_empty() { post.clone() } else { union_sorted(&out, post) };
            }
        }
        out
    }

    fn keys(&self) -> usize { self.by_value.len() }
}

fn intersect_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut i = 0usize;
    let mut j = 0usize;
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => { out.push(a[i]); i += 1; j += 1; }
        }
    }
    out
}

fn union_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut i = 0usize;
    let mut j = 0usize;
    let mut out = Vec::with_capacity(a.len() + b.len());
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => { out.push(a[i]); i += 1; }
            std::cmp::Ordering::Greater => { out.push(b[j]); j += 1; }
            std::cmp::Ordering::Equal => { out.push(a[i]); i += 1; j += 1; }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

fn breakdown<F: Facet>(counts: &[usize]) -> Vec<FacetCount<F>> {
    F::ALL.iter().map(|v| FacetCount { value: *v, count: counts[v.ordinal()] }).collect()
}

pub struct SearchEngine {
    items: Vec<Item>,
    by_id: FxHashMap<ItemId, DocId>,
    colors: Postings<Color>,
    sizes: Postings<Size>,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("items", &self.items.len())
            .field("color_keys", &self.colors.keys())
            .field("size_keys", &self.sizes.keys())
            .finish()
    }
}

impl SearchEngine {
    /// Index `items`. Fails if two items share an id.
    pub fn new(items: Vec<Item>) -> SearchResult<Self> {
        let mut by_id: FxHashMap<ItemId, DocId> = FxHashMap::default();
        by_id.reserve(items.len());
        for (i, it) in items.iter().enumerate() {
            if by_id.insert(it.id, i as DocId).is_some() {
                metrics::counter!("catalog_duplicates_total", 1u64);
                warn!(id = %it.id, "duplicate item id; index not built");
                return Err(SearchError::DuplicateItem(it.id));
            }
        }
        let colors = Postings::<Color>::build(&items);
        let sizes = Postings::<Size>::build(&items);
        metrics::gauge!("index_docs", items.len() as f64);
        debug!(docs = items.len(), color_keys = colors.keys(), size_keys = sizes.keys(), "index built");
        Ok(Self { items, by_id, colors, sizes })
    }

    /// Like [`SearchEngine::new`], for callers whose catalog may be absent.
    pub fn from_catalog(items: Option<Vec<Item>>) -> SearchResult<Self> {
        match items {
            Some(items) => Self::new(items),
            None => Err(SearchError::InvalidArgument("items")),
        }
    }

    pub fn from_snapshot(catalog: &Catalog) -> SearchResult<Self> {
        Self::new(catalog.items.clone())
    }

    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn items(&self) -> &[Item] { &self.items }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.by_id.get(id).map(|d| &self.items[*d as usize])
    }

    pub fn search(&self, options: &SearchOptions) -> SearchResults {
        self.search_with_debug(options).0
    }

    /// Fails with `InvalidArgument` when `options` is absent, before any lookup.
    pub fn try_search(&self, options: Option<&SearchOptions>) -> SearchResult<SearchResults> {
        let options = options.ok_or(SearchError::InvalidArgument("options"))?;
        Ok(self.search(options))
    }

    pub fn search_with_debug(&self, options: &SearchOptions) -> (SearchResults, SearchDebugInfo) {
        let started = std::time::Instant::now();
        let plan = CandidatePlan::from_constraints(!options.colors.is_empty(), !options.sizes.is_empty());
        let mut color_candidates = None;
        let mut size_candidates = None;

        let candidates: Vec<DocId> = match plan {
            CandidatePlan::Both => {
                let c = self.colors.union(&options.colors);
                let s = self.sizes.union(&options.sizes);
                color_candidates = Some(c.len());
                size_candidates = Some(s.len());
                intersect_sorted(&c, &s)
            }
            CandidatePlan::ColorsOnly => {
                let c = self.colors.union(&options.colors);
                color_candidates = Some(c.len());
                c
            }
            CandidatePlan::SizesOnly => {
                let s = self.sizes.union(&options.sizes);
                size_candidates = Some(s.len());
                s
            }
            CandidatePlan::All => (0..self.items.len() as DocId).collect(),
        };
        metrics::histogram!("search_candidates", candidates.len() as f64);

        // Materialize and count in one pass; counters are seeded for every registry value.
        let mut color_counts = vec![0usize; Color::ALL.len()];
        let mut size_counts = vec![0usize; Size::ALL.len()];
        let mut items = Vec::with_capacity(candidates.len());
        for doc in candidates {
            let it = &self.items[doc as usize];
            color_counts[it.color.ordinal()] += 1;
            size_counts[it.size.ordinal()] += 1;
            items.push(it.clone());
        }

        let dbg = SearchDebugInfo {
            total: self.items.len(),
            plan,
            color_candidates,
            size_candidates,
            matched: items.len(),
        };
        let results = SearchResults {
            items,
            color_counts: breakdown::<Color>(&color_counts),
            size_counts: breakdown::<Size>(&size_counts),
        };
        let elapsed = started.elapsed();
        metrics::histogram!("search_eval_ms", elapsed.as_secs_f64() * 1_000.0);
        debug!(?plan, matched = dbg.matched, total = dbg.total, "search evaluated");
        (results, dbg)
    }
}
