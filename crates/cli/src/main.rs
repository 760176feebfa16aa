//! SpecRank CLI for ranking device catalogs.
//!
//! Usage:
//!     specrank --catalog data/devices.json rank --budget 25000 --battery 0.4 --camera 0.6
//!     specrank --catalog https://example.com/devices.json rank --weights weights.json -n 10
//!     specrank diagnose --limit 20
//!     specrank health

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use specrank_catalog::{Catalog, CatalogSource};
use specrank_explain::{diagnose_catalog, summarize_scores};
use specrank_filter::{PriceFilter, RecordFilter};
use specrank_model::{Category, CategoryWeights, ScoredRecord};
use specrank_scoring::{ScoringConfig, ScoringEngine};

#[derive(Parser)]
#[command(name = "specrank")]
#[command(about = "Rank smartphones by weighted specification scores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog file path or http(s) URL
    #[arg(long, global = true, default_value = "data/devices.json")]
    catalog: String,

    /// Scoring configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct WeightArgs {
    /// Weights document (JSON, camelCase category keys)
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Battery endurance weight
    #[arg(long)]
    battery: Option<f64>,

    /// Display quality weight
    #[arg(long)]
    display: Option<f64>,

    /// CPU performance weight
    #[arg(long)]
    cpu: Option<f64>,

    /// GPU performance weight
    #[arg(long)]
    gpu: Option<f64>,

    /// Camera quality weight
    #[arg(long)]
    camera: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank the catalog
    Rank {
        #[command(flatten)]
        weights: WeightArgs,

        /// Maximum results (defaults to the configured top-N)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Lowest acceptable price
        #[arg(long, default_value = "0")]
        min_price: f64,

        /// Budget; results may exceed it by the extension
        #[arg(long)]
        budget: Option<f64>,

        /// Amount allowed above the budget
        #[arg(long)]
        extension: Option<f64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Report which records validation drops and why
    Diagnose {
        /// Dropped records to list
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check the catalog source
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("specrank=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let engine = ScoringEngine::new(config);
    let catalog = Catalog::from_location(&cli.catalog)?;

    match cli.command {
        Commands::Rank {
            weights,
            top_n,
            min_price,
            budget,
            extension,
            format,
        } => {
            let weights = resolve_weights(&weights)?;
            let filter = PriceFilter::new(min_price, budget, extension)?;
            let top_n = top_n.unwrap_or(engine.default_top_n());
            run_rank(&engine, &catalog, &weights, &filter, top_n, &format).await?;
        }
        Commands::Diagnose { limit, format } => {
            run_diagnose(&engine, &catalog, limit, &format).await?;
        }
        Commands::Health => {
            run_health(&catalog).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    let Some(path) = path else {
        return Ok(ScoringConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scoring config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing scoring config {}", path.display()))
}

/// Start from the weights file (or the balanced default) and apply flag overrides.
fn resolve_weights(args: &WeightArgs) -> Result<CategoryWeights> {
    let mut weights = match &args.weights {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading weights {}", path.display()))?;
            CategoryWeights::from_json(&text)?
        }
        None => CategoryWeights::default(),
    };

    let overrides = [
        (Category::BatteryEndurance, args.battery),
        (Category::DisplayQuality, args.display),
        (Category::CpuPerformance, args.cpu),
        (Category::GpuPerformance, args.gpu),
        (Category::CameraQuality, args.camera),
    ];
    for (category, value) in overrides {
        if let Some(value) = value {
            weights = weights.with(category, value);
        }
    }

    if let Err(e) = weights.check() {
        tracing::warn!(error = %e, "Weights outside [0, 1]; scores may not be meaningful");
    }
    if !weights.is_normalized() {
        tracing::warn!(total = weights.total(), "Weights do not sum to 1.0");
    }

    Ok(weights)
}

async fn run_rank(
    engine: &ScoringEngine,
    catalog: &Catalog,
    weights: &CategoryWeights,
    filter: &PriceFilter,
    top_n: usize,
    format: &str,
) -> Result<()> {
    let records = catalog.load().await?;
    let loaded = records.len();
    let records = filter.apply(records);

    tracing::info!(
        source = catalog.name(),
        loaded,
        in_price_range = records.len(),
        "Loaded catalog"
    );

    let ranked = engine.score_and_rank(&records, weights, top_n);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if let Some(max) = filter.effective_max_price() {
        println!("Price range: {:.0} - {:.0}", filter.min_price(), max);
    }
    println!("Ranking {} of {} devices", ranked.len(), records.len());
    println!("---");

    for (i, hit) in ranked.iter().enumerate() {
        print_hit(i + 1, hit);
    }

    println!("\n---");
    println!("Total: {} results", ranked.len());

    Ok(())
}

fn print_hit(position: usize, hit: &ScoredRecord) {
    println!("\n{}. {} ({})", position, hit.title, hit.brand);
    if let Some(price) = hit.price {
        println!("   Price: {:.0}", price);
    }
    println!("   {}", summarize_scores(hit));
    for score in &hit.scores.categories {
        println!(
            "   - {:<18} raw {:.2} | weighted {:.3}",
            score.category.label(),
            score.raw_score,
            score.weighted_score
        );
    }
    println!("   {}", hit.link);
}

async fn run_diagnose(
    engine: &ScoringEngine,
    catalog: &Catalog,
    limit: usize,
    format: &str,
) -> Result<()> {
    let records = catalog.load().await?;
    let summary = diagnose_catalog(engine.registry(), &records);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} records, {} valid, {} dropped",
        summary.total,
        summary.valid,
        summary.dropped.len()
    );

    if !summary.failures_by_category.is_empty() {
        println!("\nFailures by category:");
        for (category, count) in &summary.failures_by_category {
            println!("   {:<18} {}", category.label(), count);
        }
    }

    for report in summary.dropped.iter().take(limit) {
        let failed: Vec<&str> = report.failed.iter().map(|c| c.key()).collect();
        println!("\n{} ({})", report.title, report.link);
        println!("   Missing: {}", failed.join(", "));
    }

    Ok(())
}

async fn run_health(catalog: &Catalog) -> Result<()> {
    print!("Checking {} catalog... ", catalog.name());

    match catalog.health_check().await {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(e) => {
            println!("FAILED: {}", e);
            std::process::exit(1);
        }
    }
}
