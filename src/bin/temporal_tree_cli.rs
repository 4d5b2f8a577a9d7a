use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use temporal_tree::input::{parse_timestamp, read_rows, InputFormat};
use temporal_tree::tree::{build_index_tree_all, nodes_to_json, TemporalTreeBuilder, TreeNode};
use temporal_tree::TreeConfig;

#[derive(Parser)]
#[command(
    name = "temporal-tree-cli",
    version,
    about = "Build lazily expandable trees from record files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group records by day, hour and minute in a zone
    Temporal {
        #[command(flatten)]
        input: InputArgs,

        /// Field holding epoch milliseconds or an RFC 3339 timestamp
        #[arg(long = "timestamp-field", default_value = "ts")]
        timestamp_field: String,

        /// Zone identifier (e.g. US/Eastern); overrides the config zone
        #[arg(long)]
        zone: Option<String>,

        /// JSON tree config (default: day → hour → minute)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Page records into a bounded fan-out index tree
    Index {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Input NDJSON or CSV path, optionally .gz
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = InputFormat::Ndjson)]
    format: InputFormat,

    /// Field used as leaf key and title (default: record number)
    #[arg(long = "key-field")]
    key_field: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Temporal {
            input,
            timestamp_field,
            zone,
            config,
        } => {
            let config = match config {
                Some(path) => TreeConfig::from_path(&path)
                    .with_context(|| format!("load config {}", path.display()))?,
                None => TreeConfig::default(),
            };
            let mut builder = config.builder().context("compile tree config")?;
            if let Some(zone) = zone {
                builder = TemporalTreeBuilder::for_zone(&zone)
                    .with_context(|| format!("parse zone {zone}"))?
                    .with_chain(builder.chain().clone());
            }

            let rows = read_rows(
                &input.input,
                input.format,
                input.key_field.as_deref(),
                Some(&timestamp_field),
            )?;
            let mut stamped = Vec::with_capacity(rows.len());
            for (idx, row) in rows.into_iter().enumerate() {
                let raw = row
                    .ts
                    .ok_or_else(|| anyhow!("record {idx}: missing field {timestamp_field}"))?;
                let ts = parse_timestamp(&raw).with_context(|| format!("record {idx}"))?;
                stamped.push((ts, row.key));
            }
            // stable, so equal timestamps keep input order
            stamped.sort_by_key(|(ts, _)| *ts);

            log::info!(
                "building temporal tree: records={} zone={}",
                stamped.len(),
                builder.zone().name()
            );
            let nodes = builder.build(
                &stamped,
                |(ts, _)| *ts,
                |(_, key)| Some(TreeNode::leaf(key.as_str(), key.as_str())),
            )?;
            write_output(&nodes_to_json(&nodes)?, input.pretty)
        }
        Commands::Index { input } => {
            let rows = read_rows(&input.input, input.format, input.key_field.as_deref(), None)?;
            log::info!("building index tree: records={}", rows.len());
            let root = build_index_tree_all(&rows, |row| {
                Some(TreeNode::leaf(row.key.as_str(), row.key.as_str()))
            });
            write_output(&root.to_json()?, input.pretty)
        }
    }
}

fn write_output(value: &Value, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
