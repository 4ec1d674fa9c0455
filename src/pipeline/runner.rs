//! Pipeline runner: validate, build, rank.
//!
//! [`Pipeline::run_lines`] and [`Pipeline::run_records`] are pure functions
//! of their input and the configuration. The configuration is checked before
//! any record is parsed, and every failure aborts the run with no partial
//! scores.

use tracing::{debug, warn};

use crate::errors::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::graph::record::EdgeRecord;
use crate::pagerank::PageRankResult;
use crate::pipeline::traits::{Ranker, RankerKind};
use crate::pipeline::validation::ValidationEngine;
use crate::types::PageRankConfig;

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// A finished ranking: scores together with the node keys they belong to.
#[derive(Debug, Clone)]
pub struct RankReport {
    /// Node keys in index (sorted) order
    pub keys: Vec<String>,
    pub result: PageRankResult,
}

impl RankReport {
    /// `(key, score)` pairs in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.result.scores.iter().copied())
    }

    pub fn score_of(&self, key: &str) -> Option<f64> {
        self.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }
}

/// A validated configuration ready to rank graphs.
pub struct Pipeline {
    config: PageRankConfig,
    ranker: RankerKind,
}

impl Pipeline {
    /// Validate `config` and prepare the ranker.
    ///
    /// Warnings are logged; errors fail with [`crate::RankError::Config`].
    pub fn new(config: PageRankConfig) -> Result<Self> {
        Self::with_engine(config, &ValidationEngine::with_defaults())
    }

    pub fn with_engine(config: PageRankConfig, engine: &ValidationEngine) -> Result<Self> {
        trace_stage!("validate");
        let report = engine.validate(&config);
        for diag in report.warnings() {
            warn!(%diag, "configuration warning");
        }
        report.into_result()?;

        let ranker = RankerKind::from_config(&config);
        Ok(Self { config, ranker })
    }

    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Rank a sequence of raw `source:targets` lines.
    pub fn run_lines<I, S>(&self, lines: I) -> Result<RankReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let graph = {
            trace_stage!("build_graph");
            GraphBuilder::from_lines(lines)?
                .with_key_order(self.config.key_order)
                .build()?
        };
        Ok(self.run_graph(graph))
    }

    /// Rank already-parsed records.
    pub fn run_records(&self, records: impl IntoIterator<Item = EdgeRecord>) -> Result<RankReport> {
        let graph = {
            trace_stage!("build_graph");
            GraphBuilder::from_records(records)
                .with_key_order(self.config.key_order)
                .build()?
        };
        Ok(self.run_graph(graph))
    }

    /// Rank a built graph.
    pub fn run_graph(&self, graph: CsrGraph) -> RankReport {
        trace_stage!("rank");
        let result = self.ranker.rank(&graph);
        debug!(
            iterations = result.iterations,
            converged = result.converged,
            sum = result.sum,
            strategy = self.config.strategy.as_str(),
            "ranked graph"
        );
        RankReport {
            keys: graph.keys,
            result,
        }
    }
}

/// Rank raw lines under `config`.
pub fn rank_lines<I, S>(lines: I, config: &PageRankConfig) -> Result<RankReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Pipeline::new(config.clone())?.run_lines(lines)
}

/// Rank parsed records under `config`.
pub fn rank_records(
    records: impl IntoIterator<Item = EdgeRecord>,
    config: &PageRankConfig,
) -> Result<RankReport> {
    Pipeline::new(config.clone())?.run_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ParseReason, RankError};
    use crate::types::{KeyOrder, Strategy};

    #[test]
    fn test_rank_lines_two_node_cycle() {
        let report = rank_lines(["0:1", "1:0"], &PageRankConfig::default()).unwrap();
        assert_eq!(report.keys, vec!["0", "1"]);
        assert!(report.result.converged);
        assert!((report.score_of("0").unwrap() - 0.5).abs() < 1e-12);
        assert!((report.result.sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_records() {
        let records = vec![
            EdgeRecord::new("0", ["1"]),
            EdgeRecord::new("1", ["2"]),
            EdgeRecord::dangling("2"),
        ];
        let report = rank_records(records, &PageRankConfig::default()).unwrap();
        let scores = &report.result.scores;
        assert!(scores[2] > scores[1] && scores[1] > scores[0]);
    }

    #[test]
    fn test_config_checked_before_parsing() {
        // Both the damping and the record are bad; the config error wins
        let cfg = PageRankConfig::default().with_damping(1.5);
        let err = rank_lines(["garbage-no-colon"], &cfg).unwrap_err();
        assert!(matches!(err, RankError::Config(_)));
    }

    #[test]
    fn test_parse_error_reports_record() {
        let err = rank_lines(["garbage-no-colon"], &PageRankConfig::default()).unwrap_err();
        match err {
            RankError::Parse { record, reason, .. } => {
                assert_eq!(record, 1);
                assert_eq!(reason, ParseReason::MissingSeparator);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = rank_lines(Vec::<String>::new(), &PageRankConfig::default()).unwrap_err();
        assert!(matches!(err, RankError::EmptyGraph));
    }

    #[test]
    fn test_key_order_passed_to_builder() {
        let cfg = PageRankConfig::default().with_key_order(KeyOrder::Lexicographic);
        let report = rank_lines(["10:2", "2:"], &cfg).unwrap();
        assert_eq!(report.keys, vec!["10", "2"]);

        let cfg = PageRankConfig::default().with_key_order(KeyOrder::Numeric);
        let err = rank_lines(["a:1"], &cfg).unwrap_err();
        assert!(matches!(
            err,
            RankError::Parse { reason: ParseReason::NotNumeric, .. }
        ));
    }

    #[test]
    fn test_strategies_agree() {
        let lines = ["a:b,c,c", "b:c", "c:a", "d:a", "e:"];
        let push = rank_lines(lines, &PageRankConfig::default()).unwrap();
        let pull = rank_lines(
            lines,
            &PageRankConfig::default().with_strategy(Strategy::Pull),
        )
        .unwrap();
        assert_eq!(push.keys, pull.keys);
        for (a, b) in push.result.scores.iter().zip(&pull.result.scores) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cap_is_typed_outcome() {
        let cfg = PageRankConfig::default().with_max_iterations(2);
        let report = rank_lines(["0:1,2", "1:2", "2:", "3:0"], &cfg).unwrap();
        assert!(!report.result.converged);
        assert_eq!(report.result.iterations, 2);

        let err = report.result.require_converged().unwrap_err();
        assert!(matches!(err, RankError::NotConverged { iterations: 2, .. }));
    }
}
