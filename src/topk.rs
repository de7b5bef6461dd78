//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest finite, positive scores as `(node, score)`, best first.
///
/// When equal scores straddle the cutoff, the lower node ids are the ones kept.
/// Equal scores in the output are listed higher node id first.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() { return Vec::new(); }
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score <= 0.0 { continue; }
        let Ok(s) = NotNan::new(score) else { continue };
        if heap.len() < k {
            heap.push(Reverse((s, i)));
        } else if let Some(&Reverse((min_score, _))) = heap.peek() {
            if s > min_score {
                heap.pop();
                heap.push(Reverse((s, i)));
            }
        }
    }
    let mut results: Vec<(usize, f64)> = heap.into_iter().map(|Reverse((s, i))| (i, s.into_inner())).collect();
    results.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(b.0.cmp(&a.0)));
    results
}
