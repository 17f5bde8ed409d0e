//! # docmeta CLI
//!
//! Reads a metadata bag produced by a content-extraction engine, classifies
//! it and prints the typed record as JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! # Bag only
//! docmeta report.json
//!
//! # With body text, embedded XMP packet and a config file
//! docmeta report.json --body report.txt --xmp report.xmp --config docmeta.yaml
//! ```
//!
//! The bag file is a JSON object whose values are strings or arrays of
//! strings: `{"Content-Type": "application/pdf", "dc:creator": ["A", "B"]}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use docmeta::{DocmetaConfig, LoggingConfig, MetadataBag, RawDocument, process_document};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docmeta")]
#[command(about = "Classify document metadata into a typed record")]
#[command(version)]
struct Cli {
    /// Metadata bag (JSON object)
    bag: PathBuf,

    /// Extracted body text
    #[arg(long)]
    body: Option<PathBuf>,

    /// Embedded XMP packet to mine for rights fields
    #[arg(long)]
    xmp: Option<PathBuf>,

    /// Caller-supplied document ID
    #[arg(long)]
    doc_id: Option<String>,

    /// Version string of the engine that produced the bag
    #[arg(long, default_value = concat!("docmeta ", env!("CARGO_PKG_VERSION")))]
    engine_version: String,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DocmetaConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DocmetaConfig::default(),
    };
    init_tracing(&config.logging);

    let metadata: MetadataBag = serde_json::from_str(&read(&cli.bag)?)
        .with_context(|| format!("parsing metadata bag {}", cli.bag.display()))?;
    let body = cli.body.as_deref().map(read).transpose()?;
    let xmp_packet = cli.xmp.as_deref().map(read).transpose()?;

    let raw = RawDocument {
        doc_id: cli.doc_id,
        metadata,
        body,
        engine_version: cli.engine_version,
        xmp_packet,
    };
    let record = process_document(raw, &config.extract)?;

    let json = if cli.compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };
    println!("{json}");
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
