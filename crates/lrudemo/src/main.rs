//! lrudemo - touch a stream of keys and print the cache after each one

mod output;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lrucache::{LruCache, Touch};
use tracing::{debug, info};

use crate::output::{Step, Summary};

const DEFAULT_STREAM: [&str; 9] = ["a", "b", "a", "c", "d", "b", "a", "s", "a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of keys)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print hit/miss/eviction counters after the stream
    #[arg(long)]
    stats: bool,

    /// Keys to touch, in order (defaults to a b a c d b a s a)
    keys: Vec<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries snapshots
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting lrudemo v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let keys: Vec<String> = if args.keys.is_empty() {
        DEFAULT_STREAM.iter().map(|k| k.to_string()).collect()
    } else {
        args.keys.clone()
    };

    let mut cache = LruCache::new(args.capacity).context("failed to create cache")?;

    for key in &keys {
        if let Touch::Evicted(old) = cache.touch(key.clone()) {
            debug!("touch {} evicted {}", key, old);
        }

        let snapshot = cache.snapshot();
        let step = Step {
            key: key.as_str(),
            snapshot: snapshot.iter().map(String::as_str).collect(),
        };

        match args.format {
            Format::Text => writeln!(out, "{}", output::format_text(&step))?,
            Format::Json => writeln!(out, "{}", output::format_json(&step)?)?,
        }
    }

    if args.stats {
        let summary = Summary::from(cache.stats());
        match args.format {
            Format::Text => writeln!(out, "{}", output::format_summary_text(&summary))?,
            Format::Json => writeln!(out, "{}", serde_json::to_string(&summary)?)?,
        }
    }

    info!("Processed {} keys, {} resident", keys.len(), cache.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(argv: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(argv)?;
        let mut buf = Vec::new();
        run(&args, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn test_default_stream_json() {
        let out = run_to_string(&["lrudemo", "--format", "json"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], r#"{"key":"a","snapshot":["a"]}"#);
        assert_eq!(lines[4], r#"{"key":"d","snapshot":["d","c","a"]}"#);
        assert_eq!(lines[8], r#"{"key":"a","snapshot":["a","s","b"]}"#);
    }

    #[test]
    fn test_text_output() {
        let out = run_to_string(&["lrudemo", "-c", "2", "x", "y", "x"]).unwrap();

        assert_eq!(
            out,
            "Items in cache -------------\nx\n----------------------------\n\
             Items in cache -------------\ny\nx\n----------------------------\n\
             Items in cache -------------\nx\ny\n----------------------------\n"
        );
    }

    #[test]
    fn test_stats_summary() {
        let out = run_to_string(&["lrudemo", "--stats"]).unwrap();

        assert_eq!(
            out.lines().last(),
            Some("hits=2 misses=7 evictions=4 hit_ratio=0.22")
        );
    }

    #[test]
    fn test_zero_capacity_fails() {
        let err = run_to_string(&["lrudemo", "--capacity", "0"]).unwrap_err();

        let root = err.root_cause().to_string();
        assert_eq!(root, "Configuration error: capacity must be greater than 0");
    }
}
