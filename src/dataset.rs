//! Synthetic edge-list generation for testing and benchmarking.
//!
//! Nodes are numbered `0..nodes`. Each node is dangling with probability
//! `dangling_probability`; otherwise it links to between 1 and
//! `max_outgoing` distinct random targets.

use std::io::{self, Write};

use rand::seq::index;
use rand::Rng;

use crate::errors::{RankError, Result};
use crate::graph::record::EdgeRecord;

/// Default probability that a generated node has no outgoing edges.
pub const DEFAULT_DANGLING_PROBABILITY: f64 = 0.02;
/// Default upper bound on generated out-degree.
pub const DEFAULT_MAX_OUTGOING: usize = 10;

/// Shape of a generated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub nodes: usize,
    pub max_outgoing: usize,
    pub dangling_probability: f64,
}

impl DatasetConfig {
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            max_outgoing: DEFAULT_MAX_OUTGOING,
            dangling_probability: DEFAULT_DANGLING_PROBABILITY,
        }
    }

    pub fn with_max_outgoing(mut self, max_outgoing: usize) -> Self {
        self.max_outgoing = max_outgoing;
        self
    }

    pub fn with_dangling_probability(mut self, p: f64) -> Self {
        self.dangling_probability = p;
        self
    }

    fn check(&self) -> Result<()> {
        if self.nodes == 0 {
            return Err(RankError::Config("nodes must be a positive integer".into()));
        }
        if self.max_outgoing == 0 {
            return Err(RankError::Config(
                "max_outgoing must be a positive integer".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dangling_probability) {
            return Err(RankError::Config(format!(
                "dangling probability must be between 0 and 1, got {}",
                self.dangling_probability
            )));
        }
        Ok(())
    }
}

/// Generate one record per node.
pub fn generate<R: Rng + ?Sized>(config: &DatasetConfig, rng: &mut R) -> Result<Vec<EdgeRecord>> {
    config.check()?;

    let n = config.nodes;
    let max_out = config.max_outgoing.min(n);
    let records = (0..n)
        .map(|i| {
            if rng.gen_bool(config.dangling_probability) {
                return EdgeRecord::dangling(i.to_string());
            }
            let count = rng.gen_range(1..=max_out);
            let targets = index::sample(&mut *rng, n, count)
                .into_iter()
                .map(|t| t.to_string());
            EdgeRecord::new(i.to_string(), targets)
        })
        .collect();
    Ok(records)
}

/// Write records in the `source:targets` line format.
pub fn write_records<W: Write>(records: &[EdgeRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}
