//! Core configuration types shared across graph building and ranking.

use serde::{Deserialize, Serialize};

/// Default damping factor.
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default convergence tolerance on the max per-node score change.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// How node keys are ordered before dense indices are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// Numeric if every key parses as a number, lexicographic otherwise.
    #[default]
    Auto,
    /// Every key must be numeric; ascending by value.
    Numeric,
    /// Byte-order string sort.
    Lexicographic,
}

impl KeyOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Numeric => "numeric",
            Self::Lexicographic => "lexicographic",
        }
    }
}

impl std::str::FromStr for KeyOrder {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "numeric" | "number" => Ok(Self::Numeric),
            "lexicographic" | "lex" | "string" => Ok(Self::Lexicographic),
            other => Err(format!("unknown key order: {other}")),
        }
    }
}

/// Power-iteration formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Scatter contributions along forward edges.
    #[default]
    Push,
    /// Gather contributions over inbound edges.
    Pull,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Configuration for a single ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Probability of following a real edge, in `[0, 1]`
    pub damping: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Stop once no score moves by this much or more
    pub tolerance: f64,
    /// Node key ordering
    pub key_order: KeyOrder,
    /// Solver formulation
    pub strategy: Strategy,
    /// Run the pull gather on the rayon pool for large graphs
    pub parallel: bool,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            key_order: KeyOrder::Auto,
            strategy: Strategy::Push,
            parallel: false,
        }
    }
}

impl PageRankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
