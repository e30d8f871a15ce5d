use crate::config::{Config, load_config};
use crate::depth::Classification;
use crate::document::GraphDocument;
use crate::graph::MindMap;
use crate::layout::auto_layout;
use crate::layout_dump::write_layout_dump;
use crate::text::{default_measurer, resize_nodes};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mmlayout", version, about = "Automatic layout for bidirectional mind maps")]
pub struct Args {
    /// Input document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output document. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file with layout overrides
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Recompute node sizes from their text before laying out
    #[arg(long = "measure")]
    pub measure: bool,

    /// Also write a JSON dump of the computed layout
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", args.config))?;

    let input = read_input(args.input.as_deref())?;
    let (map, classification) = layout_document(&input, &config, args.measure)?;

    let output = GraphDocument::from_mind_map(&map).to_json_pretty()?;
    write_output(&output, args.output.as_deref())?;

    if let Some(path) = args.dump.as_deref() {
        write_layout_dump(path, &map, &classification, &config.bounds)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Loads a document, optionally re-measures it, and runs one layout pass.
pub fn layout_document(input: &str, config: &Config, measure: bool) -> Result<(MindMap, Classification)> {
    let document = GraphDocument::from_json(input)?;
    let mut map = document.into_mind_map(config.node.clone())?;
    if measure {
        let measurer = default_measurer(&config.node);
        resize_nodes(&mut map, measurer.as_ref());
    }
    let classification = auto_layout(&mut map, &config.layout)?.unwrap_or_default();
    tracing::info!(nodes = map.len(), "layout complete");
    Ok((map, classification))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(contents: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
