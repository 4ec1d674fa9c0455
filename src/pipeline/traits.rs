//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Implementations are
//! statically dispatched; [`RankerKind`] picks the concrete ranker from a
//! [`PageRankConfig`] at runtime.

use std::io::{self, Write};

use crate::graph::csr::CsrGraph;
use crate::pagerank::pull::PullPageRank;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::pipeline::runner::RankReport;
use crate::types::{PageRankConfig, Strategy};

// ============================================================================
// Ranker: power iteration over a built graph
// ============================================================================

/// Scores every node of a graph.
///
/// # Contract
///
/// - **Input**: a non-empty [`CsrGraph`].
/// - **Output**: one score per node in index order. A run stopped by the
///   iteration cap returns `converged = false` rather than failing.
/// - **Pure**: no I/O; identical input gives bit-identical output.
pub trait Ranker {
    fn rank(&self, graph: &CsrGraph) -> PageRankResult;
}

impl Ranker for StandardPageRank {
    fn rank(&self, graph: &CsrGraph) -> PageRankResult {
        self.run(graph)
    }
}

impl Ranker for PullPageRank {
    fn rank(&self, graph: &CsrGraph) -> PageRankResult {
        self.run(graph)
    }
}

/// The ranker selected by a configuration's [`Strategy`].
#[derive(Debug, Clone)]
pub enum RankerKind {
    Push(StandardPageRank),
    Pull(PullPageRank),
}

impl RankerKind {
    pub fn from_config(config: &PageRankConfig) -> Self {
        match config.strategy {
            Strategy::Push => Self::Push(StandardPageRank::from_config(config)),
            Strategy::Pull => Self::Pull(PullPageRank::from_config(config)),
        }
    }
}

impl Ranker for RankerKind {
    fn rank(&self, graph: &CsrGraph) -> PageRankResult {
        match self {
            Self::Push(r) => r.rank(graph),
            Self::Pull(r) => r.rank(graph),
        }
    }
}

// ============================================================================
// ResultFormatter: final rendering
// ============================================================================

/// Renders a finished ranking.
pub trait ResultFormatter {
    /// Write the rendered report to `out`.
    fn write_report(&self, report: &RankReport, out: &mut dyn Write) -> io::Result<()>;

    /// Render the report as a string.
    fn render(&self, report: &RankReport) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_report(report, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
