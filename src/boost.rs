//! Link injection toward a single node.
//!
//! `boost` adds an edge `i -> target` from every scanned node that lacks one. It is a
//! perturbation tool for studying how a node's rank reacts to extra in-links; it works on
//! the raw graph, so the graph has to be renormalized before iterating again.

use crate::sparse::SparseGraph;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostConfig {
    pub target: usize,
    /// Only rows `0..scan_limit` receive new edges.
    pub scan_limit: usize,
}

impl BoostConfig {
    pub const DEFAULT_SCAN_LIMIT: usize = 1000;

    pub fn new(target: usize) -> Self {
        Self { target, scan_limit: Self::DEFAULT_SCAN_LIMIT }
    }

    pub fn apply(&self, graph: &mut SparseGraph) -> Result<usize> {
        boost(graph, self.target, self.scan_limit)
    }
}

/// Ensure each row in `0..scan_limit` (except `target` itself) links to `target`.
///
/// New edges get raw weight `1.0`. Rows that already link to `target` are left as they
/// are, so repeated calls add nothing. `scan_limit` past the last row is clamped.
/// Returns the number of edges added.
pub fn boost(graph: &mut SparseGraph, target: usize, scan_limit: usize) -> Result<usize> {
    if target >= graph.cols() {
        return Err(Error::IndexOutOfBounds { index: target, limit: graph.cols() });
    }
    let limit = scan_limit.min(graph.rows());
    let mut added = 0usize;
    for row in 0..limit {
        if row == target || graph.has_entry(row, target) {
            continue;
        }
        graph.append_entry(row, target, 1.0)?;
        log::trace!("boost: added edge {row} -> {target}");
        added += 1;
    }
    log::debug!("boost: {added} new in-links for node {target} (scanned {limit} rows)");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::normalize_in_place;

    #[test]
    fn adds_missing_links_only() {
        let mut g = SparseGraph::square(4);
        g.append_entry(0, 2, 1.0).unwrap();
        g.append_entry(1, 3, 1.0).unwrap();

        let added = boost(&mut g, 2, 10).unwrap();
        assert_eq!(added, 2); // rows 1 and 3
        assert_eq!(g.entries(0).map(|e| e.col).collect::<Vec<_>>(), vec![2]);
        assert_eq!(g.entries(1).map(|e| e.col).collect::<Vec<_>>(), vec![3, 2]);
        assert!(g.row_is_empty(2));
        assert_eq!(g.entries(3).map(|e| e.col).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn invalidates_normalization() {
        let mut g = SparseGraph::square(3);
        g.append_entry(0, 1, 1.0).unwrap();
        normalize_in_place(&mut g);
        boost(&mut g, 2, 3).unwrap();
        assert!(!g.is_normalized());
    }

    #[test]
    fn rejects_out_of_range_target() {
        let mut g = SparseGraph::square(3);
        assert!(matches!(boost(&mut g, 3, 3), Err(Error::IndexOutOfBounds { index: 3, limit: 3 })));
    }

    #[test]
    fn default_scan_limit() {
        let cfg = BoostConfig::new(267);
        assert_eq!(cfg.scan_limit, 1000);

        let mut g = SparseGraph::square(5);
        let cfg = BoostConfig { target: 0, scan_limit: 3 };
        assert_eq!(cfg.apply(&mut g).unwrap(), 2);
        assert!(g.row_is_empty(3));
    }
}
