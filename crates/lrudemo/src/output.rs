//! Rendering of per-touch snapshots

use lrucache::CacheStats;
use serde::Serialize;

/// One driver step: the touched key and the resulting snapshot
#[derive(Debug, Serialize)]
pub struct Step<'a> {
    pub key: &'a str,
    pub snapshot: Vec<&'a str>,
}

/// Final counters, emitted with `--stats`
#[derive(Debug, Serialize)]
pub struct Summary {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
}

impl From<&CacheStats> for Summary {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits(),
            misses: stats.misses(),
            evictions: stats.evictions(),
            hit_ratio: stats.hit_ratio(),
        }
    }
}

pub fn format_text(step: &Step<'_>) -> String {
    let mut out = String::from("Items in cache -------------\n");
    for key in &step.snapshot {
        out.push_str(key);
        out.push('\n');
    }
    out.push_str("----------------------------");
    out
}

pub fn format_json(step: &Step<'_>) -> serde_json::Result<String> {
    serde_json::to_string(step)
}

pub fn format_summary_text(summary: &Summary) -> String {
    format!(
        "hits={} misses={} evictions={} hit_ratio={:.2}",
        summary.hits, summary.misses, summary.evictions, summary.hit_ratio
    )
}
