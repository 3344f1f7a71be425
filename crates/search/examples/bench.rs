use facetta_core::prelude::*;
use facetta_search::SearchEngine;
use facetta_store::SampleDataBuilder;
use std::time::Instant;

fn percentile_us(xs: &mut [u128], p: f64) -> u128 {
    xs.sort_unstable();
    let idx = ((xs.len() as f64 - 1.0) * p).round() as usize;
    xs[idx]
}

fn main() {
    let n: usize = std::env::var("FACETTA_BENCH_DOCS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);
    let rounds: usize = std::env::var("FACETTA_BENCH_ROUNDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);

    eprintln!("building catalog: {} items", n);
    let t0 = Instant::now();
    let items = SampleDataBuilder::new(n).build();
    let build_catalog_ms = t0.elapsed().as_secs_f64() * 1_000.0;

    eprintln!("building index...");
    let t1 = Instant::now();
    let engine = match SearchEngine::new(items) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("index build failed: {}", e);
            std::process::exit(1);
        }
    };
    let build_idx_ms = t1.elapsed().as_secs_f64() * 1_000.0;

    let no_filter = vec![SearchOptions::default()];
    let colors_only: Vec<SearchOptions> = Color::ALL.iter().map(|c| SearchOptions::new().with_colors([*c])).collect();
    let sizes_only: Vec<SearchOptions> = Size::ALL.iter().map(|s| SearchOptions::new().with_sizes([*s])).collect();
    let mut both: Vec<SearchOptions> = Vec::new();
    for c in Color::ALL {
        for s in Size::ALL {
            both.push(SearchOptions::new().with_colors([*c]).with_sizes([*s]));
        }
    }

    let run = |label: &str, qs: &[SearchOptions]| {
        let mut times: Vec<u128> = Vec::with_capacity(qs.len() * rounds);
        for _ in 0..rounds {
            for q in qs {
                let t = Instant::now();
                let _ = engine.search(q);
                times.push(t.elapsed().as_micros());
            }
        }
        let p50 = percentile_us(&mut times.clone(), 0.50) as f64 / 1000.0;
        let p99 = percentile_us(&mut times, 0.99) as f64 / 1000.0;
        println!("{}: p50={:.3}ms p99={:.3}ms ({} queries x {} rounds)", label, p50, p99, qs.len(), rounds);
    };

    println!("index_build: catalog={:.1}ms index={:.1}ms docs={}", build_catalog_ms, build_idx_ms, n);
    run("no_filter", &no_filter);
    run("colors_only", &colors_only);
    run("sizes_only", &sizes_only);
    run("color+size", &both);
}
