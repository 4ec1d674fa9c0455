//! # edgerank
//!
//! PageRank over directed graphs given as edge lists, computed by damped
//! power iteration.
//!
//! ## Quick start
//!
//! ```rust
//! use edgerank::{rank_lines, PageRankConfig};
//!
//! let report = rank_lines(["0:1", "1:0"], &PageRankConfig::default()).unwrap();
//! assert!(report.result.converged);
//! assert!((report.result.scores[0] - 0.5).abs() < 1e-9);
//! ```
//!
//! ## Input format
//!
//! One record per line, `source:target1,target2,...`. Tokens are trimmed;
//! `source:` declares a node with no outgoing edges. Node keys are sorted
//! numerically when every key is a number and lexicographically otherwise,
//! and scores are reported in that order.

pub mod dataset;
pub mod errors;
pub mod format;
pub mod graph;
pub mod pagerank;
pub mod pipeline;
pub mod types;

pub use errors::{ParseReason, RankError, Result};
pub use format::{format_score, ScoreFormatter};
pub use graph::builder::GraphBuilder;
pub use graph::csr::CsrGraph;
pub use graph::record::EdgeRecord;
pub use pagerank::pull::PullPageRank;
pub use pagerank::standard::StandardPageRank;
pub use pagerank::PageRankResult;
pub use pipeline::runner::{rank_lines, rank_records, Pipeline, RankReport};
pub use pipeline::traits::{Ranker, ResultFormatter};
pub use types::{KeyOrder, PageRankConfig, Strategy};
