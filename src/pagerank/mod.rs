//! PageRank algorithms
//!
//! This module provides the push (scatter) and pull (gather) formulations of
//! damped power iteration. Both apply the same update rule and stop on the
//! same max-change test.

pub mod pull;
pub mod standard;

use crate::errors::{RankError, Result};

/// Result of a PageRank computation
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Max per-node change in the last iteration
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
    /// Sum of all scores
    pub sum: f64,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        let sum = scores.iter().sum();
        Self {
            scores,
            iterations,
            delta,
            converged,
            sum,
        }
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Turn a capped, unconverged run into [`RankError::NotConverged`].
    ///
    /// The error carries this result so callers can still inspect or display
    /// the last vector.
    pub fn require_converged(self) -> Result<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(RankError::NotConverged {
                iterations: self.iterations,
                delta: self.delta,
                result: Box::new(self),
            })
        }
    }
}

/// Largest absolute per-entry difference between two score vectors.
pub fn max_abs_diff(old: &[f64], new: &[f64]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
