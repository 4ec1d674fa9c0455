//! Graph builder over edge records
//!
//! Construction is two-pass: the first pass validates every record and
//! collects the node key set, the second assigns each target its dense index
//! and fills the forward adjacency. FxHashMap keeps key lookups O(1).

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::csr::CsrGraph;
use super::keys;
use super::record::EdgeRecord;
use crate::errors::{ParseReason, RankError, Result};
use crate::types::KeyOrder;

/// Accumulates edge records and packs them into a [`CsrGraph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    key_order: KeyOrder,
    records: Vec<EdgeRecord>,
}

impl GraphBuilder {
    /// Create an empty builder with [`KeyOrder::Auto`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with pre-allocated record capacity
    pub fn with_capacity(record_capacity: usize) -> Self {
        Self {
            key_order: KeyOrder::Auto,
            records: Vec::with_capacity(record_capacity),
        }
    }

    /// Set the node key ordering
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    /// Build from already-parsed records
    pub fn from_records(records: impl IntoIterator<Item = EdgeRecord>) -> Self {
        Self {
            key_order: KeyOrder::Auto,
            records: records.into_iter().collect(),
        }
    }

    /// Build from raw `source:targets` lines, numbering records from 1
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for line in lines {
            builder.push_line(line.as_ref())?;
        }
        Ok(builder)
    }

    /// Append a parsed record
    pub fn push_record(&mut self, record: EdgeRecord) {
        self.records.push(record);
    }

    /// Parse and append a raw line
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let record = EdgeRecord::parse(line, self.records.len() + 1)?;
        self.records.push(record);
        Ok(())
    }

    /// Number of records collected so far
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    /// Validate the records and pack them into a CSR graph.
    ///
    /// Fails with [`RankError::Parse`] on an empty key, or on a non-numeric
    /// key when [`KeyOrder::Numeric`] is requested, and with
    /// [`RankError::EmptyGraph`] when there are no records.
    pub fn build(&self) -> Result<CsrGraph> {
        // Pass 1: validate and collect the node key set
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut distinct: Vec<&str> = Vec::new();

        for (i, record) in self.records.iter().enumerate() {
            let record_no = i + 1;
            record.check(record_no)?;

            for key in std::iter::once(&record.source).chain(record.targets.iter()) {
                if self.key_order == KeyOrder::Numeric && keys::numeric_value(key).is_none() {
                    return Err(RankError::parse(record_no, key.as_str(), ParseReason::NotNumeric));
                }
                if seen.insert(key.as_str()) {
                    distinct.push(key.as_str());
                }
            }
        }

        if distinct.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let order = keys::resolve(self.key_order, distinct.iter().copied());
        let mut sorted: Vec<String> = distinct.iter().map(|k| k.to_string()).collect();
        keys::sort_keys(&mut sorted, order);

        let index: FxHashMap<&str, u32> = sorted
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i as u32))
            .collect();

        // Pass 2: forward adjacency in record order
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); sorted.len()];
        for record in &self.records {
            let source = index[record.source.as_str()] as usize;
            adjacency[source].extend(record.targets.iter().map(|t| index[t.as_str()]));
        }

        let graph = CsrGraph::from_adjacency(sorted, adjacency);
        debug!(
            records = self.records.len(),
            nodes = graph.num_nodes,
            edges = graph.num_edges(),
            dangling = graph.dangling_nodes().len(),
            key_order = order.as_str(),
            "built graph"
        );
        Ok(graph)
    }
}
