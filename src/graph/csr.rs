//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR stores edges contiguously, making iteration over neighbors very fast.
//! Power iteration walks every edge once per iteration, so this is the
//! layout both solvers read from.

/// A directed graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Target node for each edge, in record order
    pub col_idx: Vec<u32>,
    /// Out-degree for each node (duplicates counted)
    pub out_degree: Vec<u32>,
    /// Node keys in index order
    pub keys: Vec<String>,
    /// Nodes with no outgoing edges, ascending
    dangling: Vec<u32>,
}

impl CsrGraph {
    /// Pack per-node adjacency lists into CSR format.
    ///
    /// `adjacency[i]` lists the targets of node `i`; every target must be a
    /// valid index into `keys`.
    pub fn from_adjacency(keys: Vec<String>, adjacency: Vec<Vec<u32>>) -> Self {
        let num_nodes = keys.len();
        debug_assert_eq!(adjacency.len(), num_nodes);

        let num_edges = adjacency.iter().map(Vec::len).sum();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(num_edges);
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut dangling = Vec::new();

        row_ptr.push(0);
        for (node, targets) in adjacency.into_iter().enumerate() {
            debug_assert!(targets.iter().all(|&t| (t as usize) < num_nodes));
            if targets.is_empty() {
                dangling.push(node as u32);
            }
            out_degree.push(targets.len() as u32);
            col_idx.extend(targets);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
            keys,
            dangling,
        }
    }

    /// Targets of a node's outgoing edges
    pub fn neighbors(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the key for a node
    pub fn key(&self, node: u32) -> &str {
        &self.keys[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Total number of directed edges, duplicates included
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes with no outgoing edges
    pub fn dangling_nodes(&self) -> &[u32] {
        &self.dangling
    }

    /// Get node ID by key (linear search - use sparingly)
    pub fn get_node_by_key(&self, key: &str) -> Option<u32> {
        self.keys.iter().position(|k| k == key).map(|i| i as u32)
    }

    /// Build the inbound adjacency.
    ///
    /// Each node's sources are listed in ascending source order, with one
    /// entry per edge, so duplicate edges appear repeatedly.
    pub fn transpose(&self) -> InboundCsr {
        let mut in_degree = vec![0usize; self.num_nodes];
        for &target in &self.col_idx {
            in_degree[target as usize] += 1;
        }

        let mut row_ptr = Vec::with_capacity(self.num_nodes + 1);
        row_ptr.push(0);
        for d in &in_degree {
            let last = row_ptr[row_ptr.len() - 1];
            row_ptr.push(last + d);
        }

        let mut cursor = row_ptr[..self.num_nodes].to_vec();
        let mut col_idx = vec![0u32; self.col_idx.len()];
        for source in 0..self.num_nodes as u32 {
            for &target in self.neighbors(source) {
                let slot = &mut cursor[target as usize];
                col_idx[*slot] = source;
                *slot += 1;
            }
        }

        InboundCsr { row_ptr, col_idx }
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            keys: Vec::new(),
            dangling: Vec::new(),
        }
    }
}

/// Reverse adjacency of a [`CsrGraph`], used by the pull solver.
#[derive(Debug, Clone)]
pub struct InboundCsr {
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<u32>,
}

impl InboundCsr {
    /// Sources of a node's incoming edges
    pub fn sources(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }
}
