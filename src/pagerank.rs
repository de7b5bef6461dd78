//! PageRank power iteration over a normalized [`SparseGraph`].
//!
//! One step maps a rank vector `r` to
//! \[
//!   r'_j = \alpha \sum_i r_i P_{ij} + \frac{\alpha\, (r \cdot d) + (1 - \alpha)}{n}
//! \]
//! where `P` is the out-degree normalized graph and `d` the dangling indicator. The second
//! term fuses dangling-mass redistribution and teleportation into one uniform offset.

use crate::sparse::SparseGraph;
use crate::transition::dangling_indicator;
use crate::vector::{dot, l1_distance, scale_in_place, uniform};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// Number of steps for a fixed-count run; the upper bound when `tolerance` is set.
    pub max_iterations: usize,
    /// Stop early once the L1 change between consecutive iterates drops below this.
    /// `None` runs exactly `max_iterations` steps.
    pub tolerance: Option<f64>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, max_iterations: 100, tolerance: None }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "tolerance must be finite and > 0 (got {tol})"
                )));
            }
        }
        Ok(())
    }
}

fn validate_damping(damping: f64) -> Result<()> {
    if !(damping > 0.0 && damping < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "damping must be in (0, 1) (got {damping})"
        )));
    }
    Ok(())
}

/// Outcome of [`RankIterator::run_until`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankRun {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// L1 change produced by the last step (`0.0` if no step ran).
    pub diff_l1: f64,
    /// `true` iff a tolerance was configured and met.
    pub converged: bool,
}

/// Drives power iteration over a borrowed, normalized graph.
#[derive(Debug, Clone)]
pub struct RankIterator<'a> {
    graph: &'a SparseGraph,
    damping: f64,
    dangling: Vec<f64>,
}

impl<'a> RankIterator<'a> {
    /// Fails unless the graph is square and normalized and `damping` is in `(0, 1)`.
    pub fn new(graph: &'a SparseGraph, damping: f64) -> Result<Self> {
        validate_damping(damping)?;
        if !graph.is_square() {
            return Err(Error::DimensionMismatch { expected: graph.rows(), actual: graph.cols() });
        }
        if !graph.is_normalized() {
            return Err(Error::NotNormalized);
        }
        Ok(Self { graph, damping, dangling: dangling_indicator(graph) })
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn node_count(&self) -> usize {
        self.graph.rows()
    }

    pub fn dangling(&self) -> &[f64] {
        &self.dangling
    }

    /// One power-iteration step. `prev` is only read; the result is a new vector.
    pub fn step(&self, prev: &[f64]) -> Result<Vec<f64>> {
        let n = self.node_count();
        if prev.len() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: prev.len() });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut next = vec![0.0; n];
        for (i, &mass_i) in prev.iter().enumerate() {
            for e in self.graph.entries(i) {
                next[e.col] += mass_i * e.value;
            }
        }
        scale_in_place(&mut next, self.damping);

        let dangling_mass = dot(prev, &self.dangling);
        let offset = (self.damping * dangling_mass + (1.0 - self.damping)) / n as f64;
        for x in &mut next {
            *x += offset;
        }
        Ok(next)
    }

    /// Apply [`step`](Self::step) exactly `iterations` times.
    pub fn run(&self, initial: &[f64], iterations: usize) -> Result<Vec<f64>> {
        let n = self.node_count();
        if initial.len() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: initial.len() });
        }
        let mut rank = initial.to_vec();
        for _ in 0..iterations {
            rank = self.step(&rank)?;
        }
        Ok(rank)
    }

    /// Iterate up to `config.max_iterations` steps, stopping early once the
    /// configured tolerance is met. `config.damping` is ignored in favor of the
    /// iterator's own.
    pub fn run_until(&self, initial: &[f64], config: &PageRankConfig) -> Result<PageRankRun> {
        config.validate()?;
        let n = self.node_count();
        if initial.len() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: initial.len() });
        }

        let mut scores = initial.to_vec();
        let mut iters = 0usize;
        let mut last_diff = 0.0;
        let mut converged = false;
        for _ in 0..config.max_iterations {
            let next = self.step(&scores)?;
            iters += 1;
            last_diff = l1_distance(&scores, &next);
            scores = next;
            log::trace!("iteration {iters}: l1 diff {last_diff:e}");
            if config.tolerance.is_some_and(|tol| last_diff < tol) {
                converged = true;
                break;
            }
        }

        if config.tolerance.is_some() && !converged {
            log::warn!(
                "no convergence after {iters} iterations (last l1 diff {last_diff:e})"
            );
        }
        log::debug!("rank iteration finished: n={n} iterations={iters} diff_l1={last_diff:e}");
        Ok(PageRankRun { scores, iterations: iters, diff_l1: last_diff, converged })
    }
}

/// PageRank of a normalized graph from the uniform start vector.
pub fn pagerank_sparse(graph: &SparseGraph, config: PageRankConfig) -> Result<PageRankRun> {
    config.validate()?;
    let iter = RankIterator::new(graph, config.damping)?;
    iter.run_until(&uniform(graph.rows()), &config)
}
