//! Dense vector helpers shared by the sparse and dense paths.

/// The uniform start vector, `1/n` everywhere. Empty for `n == 0`.
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn scale_in_place(v: &mut [f64], factor: f64) {
    for x in v {
        *x *= factor;
    }
}

/// Sum of all entries (total probability mass for a rank vector).
pub fn mass(v: &[f64]) -> f64 {
    v.iter().sum()
}

pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
