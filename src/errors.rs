//! Error types for graph construction and ranking.

use thiserror::Error;

use crate::pagerank::PageRankResult;

/// Error type for every stage of a ranking run.
#[derive(Error, Debug)]
pub enum RankError {
    /// A record could not be parsed. `record` is 1-based.
    #[error("Invalid record {record}: {reason} ({token:?})")]
    Parse {
        record: usize,
        token: String,
        reason: ParseReason,
    },

    /// The run configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No nodes were discovered in the input.
    #[error("Graph has no nodes")]
    EmptyGraph,

    /// The iteration cap was reached before the tolerance was met.
    #[error("PageRank did not converge after {iterations} iterations (delta {delta:e})")]
    NotConverged {
        iterations: usize,
        delta: f64,
        result: Box<PageRankResult>,
    },
}

/// What was wrong with a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    /// No `:` between the source and the target list.
    MissingSeparator,
    /// The source token is empty.
    EmptySource,
    /// A target list contains an empty entry.
    EmptyTarget,
    /// A token is not a number while numeric keys are required.
    NotNumeric,
}

impl std::fmt::Display for ParseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::MissingSeparator => "missing ':' between source and targets",
            Self::EmptySource => "empty source node",
            Self::EmptyTarget => "empty target node",
            Self::NotNumeric => "node is not a number",
        };
        f.write_str(msg)
    }
}

impl RankError {
    pub(crate) fn parse(record: usize, token: impl Into<String>, reason: ParseReason) -> Self {
        Self::Parse {
            record,
            token: token.into(),
            reason,
        }
    }

    /// The 1-based record number for parse errors.
    pub fn record(&self) -> Option<usize> {
        match self {
            Self::Parse { record, .. } => Some(*record),
            _ => None,
        }
    }
}

/// Result type for ranking operations.
pub type Result<T> = std::result::Result<T, RankError>;
