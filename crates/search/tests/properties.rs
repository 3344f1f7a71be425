#![forbid(unsafe_code)]

use facetta_core::prelude::*;
use facetta_search::{CandidatePlan, SearchEngine};
use facetta_store::SampleDataBuilder;

fn catalog(count: usize, seed: u64) -> Vec<Item> {
    SampleDataBuilder::new(count).seed(seed).build()
}

// Facet counts must agree with a linear scan over the catalog.
fn assert_consistent(items: &[Item], opts: &SearchOptions, res: &SearchResults) {
    let expected: Vec<&Item> = items.iter().filter(|i| opts.matches(i)).collect();
    assert_eq!(res.items.len(), expected.len(), "result size for {:?}", opts);
    for it in res.items.iter() {
        assert!(opts.matches(it), "{:?} does not satisfy {:?}", it, opts);
    }

    let colors: Vec<Color> = res.color_counts.iter().map(|c| c.value).collect();
    assert_eq!(colors.as_slice(), Color::ALL);
    let sizes: Vec<Size> = res.size_counts.iter().map(|c| c.value).collect();
    assert_eq!(sizes.as_slice(), Size::ALL);

    for c in res.color_counts.iter() {
        assert_eq!(c.count, expected.iter().filter(|i| i.color == c.value).count(), "color {}", c.value);
    }
    for s in res.size_counts.iter() {
        assert_eq!(s.count, expected.iter().filter(|i| i.size == s.value).count(), "size {}", s.value);
    }
    assert_eq!(res.color_counts.iter().map(|c| c.count).sum::<usize>(), res.items.len());
    assert_eq!(res.size_counts.iter().map(|c| c.count).sum::<usize>(), res.items.len());
}

#[test]
fn no_criteria_returns_every_item_once() {
    let items = catalog(10, 1);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let res = engine.search(&SearchOptions::default());
    assert_eq!(res.items, items);
    assert_consistent(&items, &SearchOptions::default(), &res);
}

#[test]
fn all_colors_without_sizes_filters_by_color_only() {
    let items = catalog(10, 2);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_colors(Color::ALL.iter().copied());
    let res = engine.search(&opts);
    assert_eq!(res.items.len(), items.len());
    assert_consistent(&items, &opts, &res);
}

#[test]
fn all_sizes_without_colors_filters_by_size_only() {
    let items = catalog(10, 3);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_sizes(Size::ALL.iter().copied());
    let res = engine.search(&opts);
    assert_eq!(res.items.len(), items.len());
    assert_consistent(&items, &opts, &res);
}

#[test]
fn one_size_returns_only_that_size() {
    let items = catalog(1000, 4);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_sizes([Size::Large]);
    let res = engine.search(&opts);
    assert!(!res.items.is_empty());
    assert!(res.items.iter().all(|i| i.size == Size::Large));
    assert_eq!(res.size_count(Size::Large), res.items.len());
    assert_consistent(&items, &opts, &res);
}

#[test]
fn one_color_returns_only_that_color() {
    let items = catalog(1000, 5);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_colors([Color::Black]);
    let res = engine.search(&opts);
    assert!(res.items.iter().all(|i| i.color == Color::Black));
    assert_eq!(res.color_count(Color::Black), res.items.len());
    assert_consistent(&items, &opts, &res);
}

#[test]
fn color_and_size_intersect() {
    let items = catalog(1000, 6);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_colors([Color::Black]).with_sizes([Size::Large]);
    let (res, dbg) = engine.search_with_debug(&opts);
    assert_eq!(dbg.plan, CandidatePlan::Both);
    assert!(res.items.iter().all(|i| i.color == Color::Black && i.size == Size::Large));
    assert!(dbg.matched <= dbg.color_candidates.unwrap().min(dbg.size_candidates.unwrap()));
    assert_consistent(&items, &opts, &res);
}

#[test]
fn no_matches_yield_zero_counts_for_every_value() {
    let mut items = catalog(1000, 7);
    for it in items.iter_mut() { it.color = Color::Red; }
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_colors([Color::Black]);
    let res = engine.search(&opts);
    assert!(res.items.is_empty());
    assert_eq!(res.color_counts.len(), Color::ALL.len());
    assert_eq!(res.size_counts.len(), Size::ALL.len());
    assert!(res.color_counts.iter().all(|c| c.count == 0));
    assert!(res.size_counts.iter().all(|c| c.count == 0));
    assert_consistent(&items, &opts, &res);
}

#[test]
fn every_selection_agrees_with_linear_scan() {
    let items = catalog(300, 8);
    let engine = SearchEngine::new(items.clone()).unwrap();
    // all 2^5 color subsets against all 2^3 size subsets
    for cmask in 0u32..(1 << Color::ALL.len()) {
        for smask in 0u32..(1 << Size::ALL.len()) {
            let colors = Color::ALL.iter().enumerate().filter(|(i, _)| cmask & (1u32 << *i) != 0).map(|(_, c)| *c);
            let sizes = Size::ALL.iter().enumerate().filter(|(i, _)| smask & (1u32 << *i) != 0).map(|(_, s)| *s);
            let opts = SearchOptions::new().with_colors(colors).with_sizes(sizes);
            let res = engine.search(&opts);
            assert_consistent(&items, &opts, &res);
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let items = catalog(500, 9);
    let engine = SearchEngine::new(items).unwrap();
    let opts = SearchOptions::new().with_colors([Color::Blue, Color::White]).with_sizes([Size::Medium]);
    assert_eq!(engine.search(&opts), engine.search(&opts.clone()));
}

#[test]
fn results_follow_catalog_order() {
    let items = catalog(200, 10);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts = SearchOptions::new().with_colors([Color::Yellow, Color::Red]);
    let res = engine.search(&opts);
    let expected: Vec<Item> = items.into_iter().filter(|i| opts.matches(i)).collect();
    assert_eq!(res.items, expected);
}

#[test]
fn query_read_from_json_treats_missing_axis_as_unrestricted() {
    let items = catalog(100, 11);
    let engine = SearchEngine::new(items.clone()).unwrap();
    let opts: SearchOptions = serde_json::from_str(r#"{"sizes":["small"]}"#).unwrap();
    let res = engine.try_search(Some(&opts)).unwrap();
    assert!(res.items.iter().all(|i| i.size == Size::Small));
    assert_consistent(&items, &opts, &res);
}
