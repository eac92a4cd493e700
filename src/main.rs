use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricecheck::loader::{load_corpus, load_feed, CorpusLoad};
use pricecheck::models::OutlierPass;
use pricecheck::{
    Config, CurrencyTable, FeatureEncoder, OutlierAnalyzer, OutlierReport, PatternTable,
    RecordBuilder,
};

#[derive(Parser)]
#[command(name = "poe-pricecheck")]
#[command(about = "Parse item listings and inspect per-affix price distributions")]
struct Cli {
    /// TOML config file (defaults to $PRICECHECK_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Sources {
    /// Plain-text corpus, one item per blank-line separated block
    #[arg(long = "text")]
    text: Vec<PathBuf>,

    /// Shop-index JSON dump
    #[arg(long = "feed")]
    feed: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Strictly parse a single item (from a file, or stdin) and print it as JSON
    Parse { file: Option<PathBuf> },
    /// Load corpora and report price outliers per affix
    Analyze {
        #[command(flatten)]
        sources: Sources,
        /// Emit the reports as JSON
        #[arg(long)]
        json: bool,
        /// Only list affixes whose prices contained outliers
        #[arg(long)]
        outliers_only: bool,
    },
    /// Load corpora and print feature vectors and normalized prices as JSON
    Vectors {
        #[command(flatten)]
        sources: Sources,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::from_env().await?,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let builder = RecordBuilder::new(PatternTable::standard(), CurrencyTable::standard())
        .with_price_marker(&config.parser.price_marker);

    match cli.command {
        Commands::Parse { file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };
            let record = builder.parse_strict(text.trim_end())?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Analyze { sources, json, outliers_only } => {
            let load = load_sources(&builder, &sources).await?;
            let analyzer = OutlierAnalyzer::new(config.fences());
            let mut reports = analyzer.analyze(&load.records);
            if outliers_only {
                reports.retain(|_, r| r.cleaned.is_some());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_reports(&reports);
            }
        }
        Commands::Vectors { sources } => {
            let load = load_sources(&builder, &sources).await?;
            let set = FeatureEncoder::new(builder.patterns()).training_set(&load.records);
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
    }

    Ok(())
}

async fn load_sources(builder: &RecordBuilder<'_>, sources: &Sources) -> anyhow::Result<CorpusLoad> {
    if sources.text.is_empty() && sources.feed.is_empty() {
        bail!("no input given, pass --text and/or --feed");
    }

    let mut load = CorpusLoad::default();
    for path in &sources.text {
        let part = load_corpus(builder, path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?;
        load.merge(part);
    }
    for path in &sources.feed {
        let part = load_feed(builder, path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?;
        load.merge(part);
    }

    info!(
        records = load.records.len(),
        rejected = load.rejected.len(),
        warnings = load.warnings.len(),
        "items loaded"
    );
    Ok(load)
}

fn print_reports(reports: &BTreeMap<String, OutlierReport>) {
    println!(
        "{:<45} {:>5} {:>9} {:>9} {:>9} {:>9}  outliers",
        "affix", "n", "min", "max", "mean", "std"
    );
    for (affix, report) in reports {
        print_pass(affix, &report.raw);
        if let Some(cleaned) = &report.cleaned {
            print_pass("  cleaned", cleaned);
        }
    }
}

fn print_pass(label: &str, pass: &OutlierPass) {
    let s = &pass.stats;
    println!(
        "{:<45} {:>5} {:>9.2} {:>9.2} {:>9.2} {:>9.2}  mild {:?} extreme {:?}",
        label, s.count, s.min, s.max, s.mean, s.std_dev, pass.mild, pass.extreme
    );
}
