// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jetdeck_core::asset_probe::{AssetProbe, AssetTransport, FsAssetTransport, HttpAssetTransport};
use jetdeck_core::enrichment::{EnrichmentCache, EnrichmentView, WikipediaSummarySource};
use jetdeck_core::radar::svg_points;
use jetdeck_core::{
    Aircraft, Catalog, CatalogFilter, ComparisonReport, ComparisonSet, JetDeckConfig, MetricSet,
    Toggle,
};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the aircraft dataset (JSON)
    #[arg(short, long, env = "JETDECK_DATA", default_value = "data/aircraft.json")]
    data: PathBuf,

    /// Path to config.json (defaults to the user config directory)
    #[arg(short, long, env = "JETDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List aircraft, optionally filtered
    List {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List the distinct roles in the dataset
    Roles,
    /// Score and rank a set of aircraft by id
    Compare {
        ids: Vec<String>,
        /// Print radar polygons for a square chart of this size
        #[arg(long)]
        radar_size: Option<f64>,
    },
    /// Fetch summaries for aircraft ids (or raw page titles)
    Summary { ids: Vec<String> },
    /// Resolve a model path against the asset root
    Probe {
        path: String,
        /// URL or directory; defaults to the configured asset root
        #[arg(long)]
        asset_root: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

    let config_path = cli.config.clone().unwrap_or_else(JetDeckConfig::default_path);
    let config = JetDeckConfig::load(&config_path)?;

    match &cli.command {
        Commands::List { role, search } => {
            let catalog = load_catalog(&cli.data)?;
            let filter = CatalogFilter {
                search: search.clone(),
                role: role.clone(),
            };
            for aircraft in catalog.filter(&filter) {
                println!(
                    "{:<12} {:<32} {:<18} {}",
                    aircraft.id,
                    aircraft.name,
                    aircraft.role.as_deref().unwrap_or("-"),
                    aircraft.country.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Roles => {
            for role in load_catalog(&cli.data)?.roles() {
                println!("{}", role);
            }
        }
        Commands::Compare { ids, radar_size } => {
            let catalog = load_catalog(&cli.data)?;
            compare(&catalog, &config, ids, *radar_size)?;
        }
        Commands::Summary { ids } => {
            let catalog = load_catalog(&cli.data).ok();
            summarize(catalog.as_ref(), &config, ids).await?;
        }
        Commands::Probe { path, asset_root } => {
            let root = asset_root.clone().unwrap_or_else(|| config.asset_root.clone());
            if root.starts_with("http://") || root.starts_with("https://") {
                probe(HttpAssetTransport::new(&root, &config)?, &config, path).await;
            } else {
                probe(FsAssetTransport::new(&root), &config, path).await;
            }
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn compare(
    catalog: &Catalog,
    config: &JetDeckConfig,
    ids: &[String],
    radar_size: Option<f64>,
) -> Result<()> {
    let metrics = MetricSet::fighter_default();
    let mut set = ComparisonSet::new(config.comparison_limit);
    for id in ids {
        if catalog.get(id).is_none() {
            anyhow::bail!("Unknown aircraft id '{}'", id);
        }
        if set.toggle(id) == Toggle::Full {
            println!("Comparison is limited to {} aircraft; skipping {}", set.limit(), id);
        }
    }

    let report = ComparisonReport::build(catalog, &set, &metrics);

    println!("Leaderboard");
    for (pos, entry) in report.leaderboard.iter().enumerate() {
        println!("  {:>2}. {:<32} {:>3}", pos + 1, entry.aircraft.name, entry.score);
    }

    println!("Metric leaders");
    for leader in &report.leaders {
        let name = leader.leader.map(|a| a.name.as_str()).unwrap_or("-");
        println!("  {:<18} {}", leader.metric.label, name);
    }

    println!("Best value for cost");
    for entry in &report.best_value {
        println!("  {:<32} {:>8.2}", entry.aircraft.name, entry.value);
    }

    if let Some(size) = radar_size {
        let layout = report.radar_layout(size, size * 0.12);
        println!("Radar ({}x{})", size, size);
        println!("  grid {}", svg_points(&layout.ring(1.0)));
        for (axis, metric) in report.metrics.iter().enumerate() {
            let anchor = layout.label_anchor(axis, size * 0.04);
            println!("  label {:<18} {:.2},{:.2}", metric.label, anchor.x, anchor.y);
        }
        for series in report.radar(&layout)? {
            println!("  {:<32} {}", series.aircraft.name, svg_points(&series.points));
        }
    }

    Ok(())
}

async fn summarize(catalog: Option<&Catalog>, config: &JetDeckConfig, ids: &[String]) -> Result<()> {
    let lookup = |id: &String| catalog.and_then(|c| c.get(id));
    let known: Vec<&Aircraft> = ids.iter().filter_map(lookup).collect();
    // Ids outside the dataset are treated as raw page titles.
    let mut keys = Catalog::enrichment_keys(&known);
    keys.extend(ids.iter().filter(|&id| lookup(id).is_none()).cloned());

    let source = WikipediaSummarySource::new(config)?;
    let cache = Arc::new(EnrichmentCache::new(source).remember_failures(config.remember_failures));
    let view = EnrichmentView::new(cache);

    let summaries = tokio::select! {
        result = view.show(&keys) => result?,
        _ = tokio::signal::ctrl_c() => {
            view.teardown();
            println!("Cancelled.");
            return Ok(());
        }
    };

    for key in &keys {
        match summaries.get(key) {
            Some(Some(record)) => {
                println!("{}\n  {}\n  {}", key, record.text, record.source_url);
                if let Some(image) = &record.image_url {
                    println!("  image: {}", image);
                }
            }
            Some(None) => println!("{}\n  (no summary available)", key),
            None => {}
        }
    }

    Ok(())
}

async fn probe<T: AssetTransport>(transport: T, config: &JetDeckConfig, path: &str) {
    let probe = AssetProbe::new(transport, config.model_layout());
    match probe.resolve(Some(path)).await {
        Some(resolution) if resolution.is_ready() => {
            println!("ready: {}", resolution.path().unwrap_or(path));
        }
        Some(resolution) => {
            println!("missing: {}", resolution.path().unwrap_or(path));
        }
        None => println!("cancelled"),
    }
}
