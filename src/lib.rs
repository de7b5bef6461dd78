//! `surfrank`: PageRank by damped power iteration over sparse adjacency lists.
//!
//! The core is the sparse engine:
//! - [`SparseGraph`]: per-row `(column, weight)` storage, insertion ordered.
//! - [`normalize_in_place`] / [`dangling_indicator`]: out-degree normalization and the
//!   indicator of rows with no out-links.
//! - [`RankIterator`]: one damped power-iteration step, plus fixed-count and
//!   tolerance-bounded drivers.
//! - [`boost`]: injects edges into a target node to study rank sensitivity.
//!
//! The [`dense`] module is a small baseline of the same model on full matrices.
//!
//! Public invariants (must not drift):
//! - **Node order**: rank vectors are indexed by row id \(0..n-1\).
//! - **Mass**: a step maps a probability vector to a probability vector (up to
//!   floating-point error). Dangling mass is redistributed uniformly, never dropped.
//! - **Fresh iterates**: every step allocates its output; the input is only borrowed.
//! - **Dangling policy per path**: the sparse path leaves empty rows empty and corrects at
//!   iteration time; the dense path replaces zero rows with uniform rows up front.
//!   The two are never mixed.

pub mod boost;
pub mod dense;
pub mod format;
pub mod graph;
pub mod pagerank;
pub mod sparse;
pub mod topk;
pub mod transition;
pub mod vector;

pub use boost::{boost, BoostConfig};
pub use dense::{dense_pagerank, e_matrix, h_matrix, power_iterate, s_matrix, DenseMatrix};
pub use format::{
    load_dense_matrix, load_sparse_matrix, read_dense_matrix, read_sparse_matrix, read_vector, save_sparse_matrix,
    write_dense_matrix, write_sparse_matrix, write_vector,
};
pub use graph::{AdjacencyList, AdjacencyMatrix, Graph};
pub use pagerank::{pagerank_sparse, PageRankConfig, PageRankRun, RankIterator};
pub use sparse::{Entries, Entry, RowWriter, SparseGraph};
pub use topk::top_k;
pub use transition::{dangling_indicator, is_row_stochastic, normalize_in_place};
pub use vector::{dot, l1_distance, mass, scale_in_place, uniform};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index out of bounds: {index} (limit {limit})")]
    IndexOutOfBounds { index: usize, limit: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("graph is not normalized (normalize_in_place must run after the last edit)")]
    NotNormalized,
    #[error("duplicate entry: row {row} already links to column {col}")]
    DuplicateEntry { row: usize, col: usize },
    #[error("parse error at {context}: {message}")]
    Parse { context: String, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
