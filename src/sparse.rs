//! Sparse adjacency-list storage.
//!
//! A [`SparseGraph`] is an `rows x cols` matrix kept as one insertion-ordered
//! `Vec<Entry>` per row. Zero entries are never stored, and a row with no entries is
//! simply an empty `Vec` (the "dangling" case).

use crate::graph::Graph;
use crate::{Error, Result};

/// One stored `(column, weight)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub col: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseGraph {
    cols: usize,
    rows: Vec<Vec<Entry>>,
    normalized: bool,
}

impl SparseGraph {
    /// A `rows x cols` graph with every row empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { cols, rows: vec![Vec::new(); rows], normalized: false }
    }

    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Build from any adjacency adapter, one raw weight of `1.0` per listed neighbor.
    ///
    /// Repeated neighbors in the adapter are collapsed to a single entry.
    pub fn from_graph<G: Graph>(graph: &G) -> Result<Self> {
        let n = graph.node_count();
        let mut out = Self::square(n);
        for u in 0..n {
            for v in graph.neighbors(u) {
                if v >= n {
                    return Err(Error::IndexOutOfBounds { index: v, limit: n });
                }
                if !out.has_entry(u, v) {
                    out.rows[u].push(Entry { col: v, value: 1.0 });
                }
            }
        }
        Ok(out)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows.len() == self.cols
    }

    /// Total number of stored entries across all rows.
    pub fn total_entries(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn out_degree(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// `true` iff the row stores nothing. Out-of-range rows count as empty.
    pub fn row_is_empty(&self, row: usize) -> bool {
        self.out_degree(row) == 0
    }

    pub fn has_entry(&self, row: usize, col: usize) -> bool {
        self.entries(row).any(|e| e.col == col)
    }

    /// `true` once [`normalize_in_place`](crate::normalize_in_place) has run and no
    /// entry has been appended since.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Append `(col, value)` to `row` and return a writer that keeps appending to it.
    ///
    /// Appending clears the normalized flag.
    pub fn append_entry(&mut self, row: usize, col: usize, value: f64) -> Result<RowWriter<'_>> {
        self.check_row(row)?;
        let mut writer = RowWriter { graph: self, row };
        writer.push(col, value)?;
        Ok(writer)
    }

    /// Lazy, restartable traversal of a row in insertion order.
    pub fn entries(&self, row: usize) -> Entries<'_> {
        Entries { inner: self.rows.get(row).map(Vec::as_slice).unwrap_or(&[]).iter() }
    }

    /// Visitor form of [`entries`](Self::entries).
    pub fn for_each_entry<F: FnMut(Entry)>(&self, row: usize, f: F) {
        self.entries(row).for_each(f);
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Entry] {
        &mut self.rows[row]
    }

    pub(crate) fn set_normalized(&mut self, normalized: bool) {
        self.normalized = normalized;
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(Error::IndexOutOfBounds { index: row, limit: self.rows.len() });
        }
        Ok(())
    }
}

impl Graph for SparseGraph {
    fn node_count(&self) -> usize {
        self.rows.len()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.entries(node).map(|e| e.col).collect()
    }
    fn out_degree(&self, node: usize) -> usize {
        SparseGraph::out_degree(self, node)
    }
}

/// Appending handle returned by [`SparseGraph::append_entry`].
#[derive(Debug)]
pub struct RowWriter<'a> {
    graph: &'a mut SparseGraph,
    row: usize,
}

impl<'a> RowWriter<'a> {
    pub fn row(&self) -> usize {
        self.row
    }

    /// Append another `(col, value)` to the same row.
    ///
    /// Rejects out-of-range columns, negative or non-finite weights, and a column the
    /// row already stores.
    pub fn push(&mut self, col: usize, value: f64) -> Result<&mut Self> {
        let cols = self.graph.cols;
        if col >= cols {
            return Err(Error::IndexOutOfBounds { index: col, limit: cols });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "entry weights must be finite and non-negative (row={} col={} value={})",
                self.row, col, value
            )));
        }
        if self.graph.has_entry(self.row, col) {
            return Err(Error::DuplicateEntry { row: self.row, col });
        }
        self.graph.rows[self.row].push(Entry { col, value });
        self.graph.normalized = false;
        Ok(self)
    }
}

/// Iterator over a row's entries, see [`SparseGraph::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Entries<'a> {}
