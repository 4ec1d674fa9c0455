//! Graph construction and representation
//!
//! Edge records are parsed, their node keys ordered deterministically, and
//! the result packed into a CSR graph for power iteration.

pub mod builder;
pub mod csr;
pub mod keys;
pub mod record;
