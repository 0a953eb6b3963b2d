use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kintree_data::Snapshot;
use kintree_layout::LayoutEngine;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

mod config;
mod render;
mod style;

use config::Config;

/// Lay out a family tree and print the positioned graph as JSON
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Person records, as a `.json` or `.ron` snapshot
    input: PathBuf,
    /// Write the graph here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Layout metrics and colours, as a `.ron` file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Attach card and edge colours to the output
    #[arg(long)]
    styled: bool,
    /// Single line JSON
    #[arg(long)]
    compact: bool,
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let snapshot = Snapshot::load(&args.input)
        .with_context(|| format!("Can't load records from {}", args.input.display()))?;
    debug!("Loaded {} records", snapshot.len());

    let graph = config.layout.layout(&snapshot.records[..])?;
    info!(
        "Laid out {} cards and {} edges",
        graph.positions.len(),
        graph.edges.len()
    );

    let json = if args.styled {
        to_json(&render::style_graph(graph, &config.style), args.compact)
    } else {
        to_json(&graph, args.compact)
    };
    json.context("Can't serialize the graph")
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let json = run(&args)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Can't write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
