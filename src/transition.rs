//! Row-stochastic transition weights for the sparse engine.
//!
//! Rows with no out-links stay empty here. Their mass is handled at iteration time by
//! the dangling indicator (see [`RankIterator`](crate::RankIterator)), not by filling the
//! row with a uniform distribution.

use crate::sparse::SparseGraph;

/// Overwrite every stored weight with `1 / out_degree` of its row.
///
/// Raw weights are ignored; only the entry count matters. Empty rows are left alone.
pub fn normalize_in_place(graph: &mut SparseGraph) {
    for row in 0..graph.rows() {
        let count = graph.entries(row).count();
        if count == 0 {
            continue;
        }
        let w = 1.0 / count as f64;
        for entry in graph.row_mut(row) {
            entry.value = w;
        }
    }
    graph.set_normalized(true);
}

/// `1.0` for rows with no entries, `0.0` otherwise.
pub fn dangling_indicator(graph: &SparseGraph) -> Vec<f64> {
    (0..graph.rows()).map(|row| if graph.row_is_empty(row) { 1.0 } else { 0.0 }).collect()
}

/// Every nonempty row sums to 1 within `tol`.
pub fn is_row_stochastic(graph: &SparseGraph, tol: f64) -> bool {
    (0..graph.rows()).filter(|&row| !graph.row_is_empty(row)).all(|row| {
        let s: f64 = graph.entries(row).map(|e| e.value).sum();
        (s - 1.0).abs() <= tol
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_node() -> SparseGraph {
        // 0 -> {1, 2}, 1 -> {2}, 2 -> {}
        let mut g = SparseGraph::square(3);
        g.append_entry(0, 1, 1.0).unwrap().push(2, 1.0).unwrap();
        g.append_entry(1, 2, 1.0).unwrap();
        g
    }

    #[test]
    fn normalize_divides_by_out_degree() {
        let mut g = three_node();
        assert!(!g.is_normalized());
        normalize_in_place(&mut g);
        assert!(g.is_normalized());
        assert!(g.entries(0).all(|e| (e.value - 0.5).abs() < 1e-12));
        assert!(g.entries(1).all(|e| (e.value - 1.0).abs() < 1e-12));
        assert!(g.row_is_empty(2));
        assert!(is_row_stochastic(&g, 1e-9));
    }

    #[test]
    fn normalize_ignores_raw_weights() {
        let mut g = SparseGraph::square(3);
        g.append_entry(0, 1, 5.0).unwrap().push(2, 0.25).unwrap();
        assert!(!is_row_stochastic(&g, 1e-9));
        normalize_in_place(&mut g);
        assert!(g.entries(0).all(|e| (e.value - 0.5).abs() < 1e-12));
    }

    #[test]
    fn dangling_marks_empty_rows_only() {
        let mut g = three_node();
        normalize_in_place(&mut g);
        assert_eq!(dangling_indicator(&g), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn appending_after_normalize_clears_flag() {
        let mut g = three_node();
        normalize_in_place(&mut g);
        g.append_entry(2, 0, 1.0).unwrap();
        assert!(!g.is_normalized());
    }
}
