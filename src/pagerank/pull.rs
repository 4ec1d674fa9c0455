//! Pull-based PageRank
//!
//! Each node gathers contributions over its inbound edges. Every `next[p]`
//! is written by exactly one task, so the gather can run on the rayon pool
//! without synchronization. Each node's inbound sum is accumulated in the
//! same order either way, which keeps parallel runs bit-identical to
//! sequential ones.

use rayon::prelude::*;
use tracing::{trace, warn};

use super::{max_abs_diff, PageRankResult};
use crate::graph::csr::{CsrGraph, InboundCsr};
use crate::types::{PageRankConfig, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Below this many nodes the rayon overhead outweighs the gather.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Pull-based PageRank implementation
#[derive(Debug, Clone)]
pub struct PullPageRank {
    pub damping: f64,
    pub max_iterations: usize,
    pub threshold: f64,
    /// Gather on the rayon pool when the graph is large enough
    pub parallel: bool,
}

impl Default for PullPageRank {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_TOLERANCE,
            parallel: false,
        }
    }
}

impl PullPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PageRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.tolerance,
            parallel: config.parallel,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Apply one damped update from `current` into `next`.
    ///
    /// `share` is scratch space of length `num_nodes`; it receives each
    /// node's per-edge share `current[i] / out_degree[i]`.
    fn step(
        &self,
        graph: &CsrGraph,
        inbound: &InboundCsr,
        current: &[f64],
        share: &mut [f64],
        next: &mut [f64],
    ) {
        let n = graph.num_nodes as f64;
        let teleport = (1.0 - self.damping) / n;

        let dangling_mass: f64 = graph
            .dangling_nodes()
            .iter()
            .map(|&d| current[d as usize])
            .sum();
        let base = teleport + self.damping * dangling_mass / n;

        for ((slot, &score), &degree) in share.iter_mut().zip(current).zip(&graph.out_degree) {
            *slot = if degree == 0 { 0.0 } else { score / degree as f64 };
        }
        let share: &[f64] = share;

        let gather = |(node, out): (usize, &mut f64)| {
            let inflow: f64 = inbound
                .sources(node as u32)
                .iter()
                .map(|&src| share[src as usize])
                .sum();
            *out = base + self.damping * inflow;
        };

        if self.parallel && graph.num_nodes >= PARALLEL_THRESHOLD {
            next.par_iter_mut().enumerate().for_each(gather);
        } else {
            next.iter_mut().enumerate().for_each(gather);
        }
    }

    /// Run PageRank on a graph, building the inbound adjacency once.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let inbound = graph.transpose();
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];
        let mut share = vec![0.0; n];

        let mut iterations = 0;
        let mut delta = f64::INFINITY;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            self.step(graph, &inbound, &scores, &mut share, &mut new_scores);
            delta = max_abs_diff(&scores, &new_scores);

            std::mem::swap(&mut scores, &mut new_scores);
            trace!(iteration = iterations, delta, "pull iteration");

            if delta < self.threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                iterations,
                delta,
                threshold = self.threshold,
                "pagerank stopped at the iteration cap"
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
