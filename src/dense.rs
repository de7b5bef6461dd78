//! Dense baseline: the same random-surfer model on full matrices.
//!
//! - `H`: nonzero entries of row `i` become `1 / nnz(i)`; zero rows stay zero.
//! - `S`: `H` with every zero row replaced by the uniform row `1/n`.
//! - `E = alpha * S + (1 - alpha) * J / n`.
//!
//! Dangling rows are fixed up at the matrix level (in `S`), unlike the sparse path.
//! Only suitable for small graphs: everything here is `O(n^2)` per step.

use crate::graph::{AdjacencyMatrix, Graph};
use crate::sparse::SparseGraph;
use crate::vector::uniform;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl DenseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: (0..rows).map(|_| vec![0.0; cols]).collect() }
    }

    /// Fails if the rows are ragged.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().find(|r| r.len() != cols) {
            return Err(Error::DimensionMismatch { expected: cols, actual: bad.len() });
        }
        Ok(Self { rows: data.len(), cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// Expand a sparse graph, keeping stored weights.
    pub fn from_sparse(graph: &SparseGraph) -> Self {
        let mut out = Self::zeros(graph.rows(), graph.cols());
        for i in 0..graph.rows() {
            for e in graph.entries(i) {
                out.data[i][e.col] = e.value;
            }
        }
        out
    }

    /// The sparse form of this matrix's nonzero pattern (raw weight `1.0` per edge).
    pub fn to_sparse(&self) -> Result<SparseGraph> {
        if self.rows != self.cols {
            return Err(Error::DimensionMismatch { expected: self.rows, actual: self.cols });
        }
        SparseGraph::from_graph(&AdjacencyMatrix(&self.data))
    }
}

fn nonzero_count(row: &[f64]) -> usize {
    row.iter().filter(|&&x| x != 0.0).count()
}

/// Out-degree normalized adjacency; zero rows stay zero.
pub fn h_matrix(m: &DenseMatrix) -> DenseMatrix {
    let mut out = DenseMatrix::zeros(m.rows, m.cols);
    for (src, dst) in m.data.iter().zip(out.data.iter_mut()) {
        let count = nonzero_count(src);
        if count == 0 {
            continue;
        }
        let w = 1.0 / count as f64;
        for (x, y) in src.iter().zip(dst.iter_mut()) {
            if *x != 0.0 {
                *y = w;
            }
        }
    }
    out
}

/// [`h_matrix`] with zero rows replaced by the uniform row.
pub fn s_matrix(m: &DenseMatrix) -> DenseMatrix {
    let mut out = h_matrix(m);
    let fill = if m.cols == 0 { 0.0 } else { 1.0 / m.cols as f64 };
    for (src, dst) in m.data.iter().zip(out.data.iter_mut()) {
        if nonzero_count(src) == 0 {
            dst.fill(fill);
        }
    }
    out
}

/// `alpha * S + (1 - alpha) / n` elementwise, `n` being the column count.
pub fn e_matrix(s: &DenseMatrix, alpha: f64) -> DenseMatrix {
    let teleport = if s.cols == 0 { 0.0 } else { (1.0 - alpha) / s.cols as f64 };
    let data = s
        .data
        .iter()
        .map(|row| row.iter().map(|&x| alpha * x + teleport).collect())
        .collect();
    DenseMatrix { rows: s.rows, cols: s.cols, data }
}

/// Row vector times matrix, `v M`.
pub fn vec_mul(v: &[f64], m: &DenseMatrix) -> Result<Vec<f64>> {
    if v.len() != m.rows {
        return Err(Error::DimensionMismatch { expected: m.rows, actual: v.len() });
    }
    let mut out = vec![0.0; m.cols];
    for (&vi, row) in v.iter().zip(&m.data) {
        for (o, &x) in out.iter_mut().zip(row) {
            *o += vi * x;
        }
    }
    Ok(out)
}

/// `v E^p`, one fresh vector per multiplication. No convergence test.
pub fn power_iterate(v: &[f64], e: &DenseMatrix, p: usize) -> Result<Vec<f64>> {
    if e.rows != e.cols {
        return Err(Error::DimensionMismatch { expected: e.rows, actual: e.cols });
    }
    let mut r = v.to_vec();
    for _ in 0..p {
        r = vec_mul(&r, e)?;
    }
    Ok(r)
}

/// H/S/E pipeline from the uniform start, `p` multiplications.
pub fn dense_pagerank(m: &DenseMatrix, alpha: f64, p: usize) -> Result<Vec<f64>> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidParameter(format!("damping must be in (0, 1) (got {alpha})")));
    }
    let e = e_matrix(&s_matrix(m), alpha);
    power_iterate(&uniform(m.cols), &e, p)
}

impl Graph for DenseMatrix {
    fn node_count(&self) -> usize {
        self.rows
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        AdjacencyMatrix(&self.data).neighbors(node)
    }
}
