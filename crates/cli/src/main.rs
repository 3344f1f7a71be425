use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use facetta_core::prelude::*;
use facetta_search::{SearchDebugInfo, SearchEngine};
use facetta_store::{load_catalog, SampleDataBuilder};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "facettactl", version, about = "Facetta CLI")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, global = true, default_value_t = Output::Human)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Output { Human, Json }

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a random sample catalog as JSON
    Sample {
        /// Number of items
        #[arg(long = "count", default_value_t = 10)]
        count: usize,
        /// RNG seed; same seed, same catalog
        #[arg(long = "seed")]
        seed: Option<u64>,
    },
    /// Filter a catalog by color/size and print facet counts
    Search {
        /// Catalog file (JSON array of items)
        #[arg(long = "catalog", env = "FACETTA_CATALOG")]
        catalog: PathBuf,
        /// Allowed color; repeat for several (none = any color)
        #[arg(long = "color")]
        colors: Vec<Color>,
        /// Allowed size; repeat for several (none = any size)
        #[arg(long = "size")]
        sizes: Vec<Size>,
        /// Explain candidate plan and counts
        #[arg(long = "explain", action = ArgAction::SetTrue)]
        explain: bool,
    },
}

fn init_tracing() {
    let env = std::env::var("FACETTA_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}

fn init_metrics() {
    if let Ok(addr) = std::env::var("FACETTA_METRICS_ADDR") {
        if let Ok(sock) = addr.parse::<std::net::SocketAddr>() {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            match builder.with_http_listener(sock).install() {
                Ok(_) => tracing::info!(addr = %addr, "Prometheus metrics exporter listening"),
                Err(e) => tracing::warn!(error = %e, "failed to install metrics exporter"),
            }
        } else {
            tracing::warn!(addr = %addr, "invalid FACETTA_METRICS_ADDR; expected host:port");
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    init_metrics();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { count, seed } => {
            info!(count, seed = ?seed, "sample invoked");
            let mut builder = SampleDataBuilder::new(count);
            if let Some(seed) = seed { builder = builder.seed(seed); }
            let items = builder.build();
            // A catalog is always JSON, whatever the output mode.
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Search { catalog, colors, sizes, explain } => {
            info!(catalog = %catalog.display(), colors = ?colors, sizes = ?sizes, "search invoked");
            let snap = load_catalog(&catalog)?;
            let engine = SearchEngine::from_snapshot(&snap).context("building index")?;
            let options = SearchOptions::new().with_colors(colors).with_sizes(sizes);
            let (results, dbg) = engine.search_with_debug(&options);

            match cli.output {
                Output::Human => print_human(&results),
                Output::Json => {
                    if explain {
                        #[derive(serde::Serialize)]
                        struct Explain<'a> { results: &'a SearchResults, debug: &'a SearchDebugInfo }
                        println!("{}", serde_json::to_string_pretty(&Explain { results: &results, debug: &dbg })?);
                    } else {
                        println!("{}", serde_json::to_string_pretty(&results)?);
                    }
                }
            }
            if explain && matches!(cli.output, Output::Human) {
                eprintln!(
                    "debug: total={} plan={:?} color_candidates={} size_candidates={} matched={}",
                    dbg.total,
                    dbg.plan,
                    render_opt(dbg.color_candidates),
                    render_opt(dbg.size_candidates),
                    dbg.matched
                );
            }
        }
    }

    Ok(())
}

fn print_human(results: &SearchResults) {
    println!("ID                                    COLOR   SIZE    NAME");
    for it in results.items.iter() {
        println!("{:<37} {:<7} {:<7} {}", it.id.to_string(), it.color, it.size, it.name);
    }
    println!();
    println!("COLOR   COUNT");
    for c in results.color_counts.iter() {
        println!("{:<7} {}", c.value, c.count);
    }
    println!();
    println!("SIZE    COUNT");
    for s in results.size_counts.iter() {
        println!("{:<7} {}", s.value, s.count);
    }
}

fn render_opt(v: Option<usize>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}
