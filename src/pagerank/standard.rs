//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration and proper
//! handling of dangling nodes. Contributions are pushed along forward
//! edges, so only the forward CSR adjacency is needed.

use tracing::{trace, warn};

use super::{max_abs_diff, PageRankResult};
use crate::graph::csr::CsrGraph;
use crate::types::{PageRankConfig, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the max per-node change
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_TOLERANCE,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, cap and tolerance from a run configuration
    pub fn from_config(config: &PageRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.tolerance,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Apply one damped update from `current` into `next`.
    ///
    /// `next` is overwritten entirely. Dangling nodes contribute only
    /// through the uniform dangling mass, never through an edge.
    pub fn step(&self, graph: &CsrGraph, current: &[f64], next: &mut [f64]) {
        let n = graph.num_nodes as f64;
        let teleport = (1.0 - self.damping) / n;

        let dangling_mass: f64 = graph
            .dangling_nodes()
            .iter()
            .map(|&d| current[d as usize])
            .sum();
        let dangling_contribution = self.damping * dangling_mass / n;

        next.fill(teleport + dangling_contribution);

        for (node, &node_score) in current.iter().enumerate() {
            let degree = graph.degree(node as u32);
            if degree == 0 {
                continue;
            }

            let contribution = self.damping * (node_score / degree as f64);
            for &neighbor in graph.neighbors(node as u32) {
                next[neighbor as usize] += contribution;
            }
        }
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`
    /// and the last computed vector.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        let mut iterations = 0;
        let mut delta = f64::INFINITY;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            self.step(graph, &scores, &mut new_scores);
            delta = max_abs_diff(&scores, &new_scores);

            // Swap buffers; `scores` now holds the newest vector
            std::mem::swap(&mut scores, &mut new_scores);
            trace!(iteration = iterations, delta, "push iteration");

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph(lines: &[&str]) -> CsrGraph {
        GraphBuilder::from_lines(lines.iter().copied())
            .unwrap()
            .build()
            .unwrap()
    }

    fn build_triangle_graph() -> CsrGraph {
        graph(&["a:b", "b:c", "c:a"])
    }

    fn build_star_graph() -> CsrGraph {
        // Three spokes all pointing at the hub, hub dangling
        graph(&["s1:hub", "s2:hub", "s3:hub"])
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let result = StandardPageRank::new().run(&build_triangle_graph());

        assert!(result.converged);
        let expected = 1.0 / 3.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let g = build_star_graph();
        let result = StandardPageRank::new().run(&g);

        assert!(result.converged);
        let hub = g.get_node_by_key("hub").unwrap();
        let hub_score = result.score(hub);
        for (i, &score) in result.scores.iter().enumerate() {
            if i as u32 != hub {
                assert!(hub_score > score);
            }
        }
    }

    #[test]
    fn test_two_node_cycle() {
        let result = StandardPageRank::new().run(&graph(&["0:1", "1:0"]));

        assert!(result.converged);
        assert!((result.scores[0] - 0.5).abs() < 1e-12);
        assert!((result.scores[1] - 0.5).abs() < 1e-12);
        assert!((result.sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_chain_with_dangling_sink() {
        let result = StandardPageRank::new().run(&graph(&["0:1", "1:2", "2:"]));

        assert!(result.converged);
        assert!(result.scores.iter().all(|&s| s > 0.0));
        assert!((result.sum - 1.0).abs() < 1e-6);
        assert!(result.scores[2] > result.scores[1]);
        assert!(result.scores[2] > result.scores[0]);
    }

    #[test]
    fn test_self_loop_singleton() {
        let result = StandardPageRank::new().with_damping(0.3).run(&graph(&["0:0"]));

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!((result.scores[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_sum_to_one() {
        let g = graph(&["0:1,2,3", "1:2", "2:0,0", "3:", "4:3"]);
        let result = StandardPageRank::new().run(&g);

        assert!(result.converged);
        assert!((result.sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let pr = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0); // Never converge

        let result = pr.run(&graph(&["0:1", "1:2", "2:"]));

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 3);
        assert!(result.delta > 0.0);
    }

    #[test]
    fn test_zero_damping_is_uniform() {
        let result = StandardPageRank::new()
            .with_damping(0.0)
            .run(&graph(&["0:1", "1:2", "2:"]));

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_damping_factor() {
        let g = build_star_graph();
        let hub = g.get_node_by_key("hub").unwrap() as usize;
        let spoke = g.get_node_by_key("s1").unwrap() as usize;

        // Lower damping = more teleportation = more uniform scores
        let low = StandardPageRank::new().with_damping(0.5).run(&g);
        let high = StandardPageRank::new().with_damping(0.95).run(&g);

        let advantage_low = low.scores[hub] - low.scores[spoke];
        let advantage_high = high.scores[hub] - high.scores[spoke];
        assert!(advantage_high > advantage_low);
    }

    #[test]
    fn test_duplicate_targets_weigh_twice() {
        // 0 sends two thirds of its mass to 1 and one third to 2
        let result = StandardPageRank::new().run(&graph(&["0:1,1,2", "1:0", "2:0"]));
        assert!(result.scores[1] > result.scores[2]);
    }

    #[test]
    fn test_extra_step_after_convergence_is_stable() {
        let g = graph(&["0:1,2", "1:2", "2:0", "3:"]);
        let pr = StandardPageRank::new();
        let result = pr.run(&g);
        assert!(result.converged);

        let mut next = vec![0.0; g.num_nodes];
        pr.step(&g, &result.scores, &mut next);
        assert!(max_abs_diff(&result.scores, &next) < pr.threshold);
    }

    #[test]
    fn test_top_n() {
        let g = build_star_graph();
        let result = StandardPageRank::new().run(&g);

        let top_2 = result.top_n(2);
        assert_eq!(top_2.len(), 2);
        assert_eq!(top_2[0].0, g.get_node_by_key("hub").unwrap());
    }
}
