//! Jenks natural breaks.
//!
//! Exact dynamic-programming partition of sorted values into `k` contiguous
//! classes minimizing the total within-class squared deviation. Prefix sums
//! make each class cost O(1), so the whole table is O(k·n²).

use crate::error::{EngineError, Result};

/// Sums of x and x² over prefixes of a sorted slice.
struct PrefixSums {
    s1: Vec<f64>,
    s2: Vec<f64>,
}

impl PrefixSums {
    fn new(values: &[f64]) -> Self {
        let mut s1 = Vec::with_capacity(values.len() + 1);
        let mut s2 = Vec::with_capacity(values.len() + 1);
        s1.push(0.0);
        s2.push(0.0);
        for v in values {
            s1.push(s1[s1.len() - 1] + v);
            s2.push(s2[s2.len() - 1] + v * v);
        }
        Self { s1, s2 }
    }

    /// Squared deviation of `values[i..=j]` around its mean.
    #[inline]
    fn ssd(&self, i: usize, j: usize) -> f64 {
        let n = (j - i + 1) as f64;
        let sum = self.s1[j + 1] - self.s1[i];
        let sq = self.s2[j + 1] - self.s2[i];
        (sq - sum * sum / n).max(0.0)
    }
}

fn sorted_finite(values: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(EngineError::invalid(format!("cannot classify non-finite value {}", bad)));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Lower bounds of classes 2..=k, ascending (`k - 1` values).
///
/// A value `v` falls in class `breaks.iter().filter(|b| **b <= v).count()`.
/// Equal values always share a class, so at least `k` distinct values are
/// required. Among equally good partitions the one with the earliest split
/// wins.
pub fn jenks_breaks(values: &[f64], k: usize) -> Result<Vec<f64>> {
    if k == 0 {
        return Err(EngineError::invalid("class count must be at least 1"));
    }
    if values.len() < k {
        return Err(EngineError::invalid(format!(
            "cannot split {} values into {} classes",
            values.len(),
            k
        )));
    }
    let x = sorted_finite(values)?;
    if k == 1 {
        return Ok(Vec::new());
    }
    let distinct = 1 + x.windows(2).filter(|w| w[0] < w[1]).count();
    if distinct < k {
        return Err(EngineError::invalid(format!(
            "cannot split {} distinct values into {} classes",
            distinct, k
        )));
    }

    let n = x.len();
    let sums = PrefixSums::new(&x);

    // cost[c][j]: best cost of c + 1 classes over x[0..=j]
    // start[c][j]: index where the last of those classes begins
    let mut cost = vec![vec![f64::INFINITY; n]; k];
    let mut start = vec![vec![0usize; n]; k];
    for j in 0..n {
        cost[0][j] = sums.ssd(0, j);
    }
    for c in 1..k {
        for j in c..n {
            for i in c..=j {
                // A class may only start where the value changes
                if x[i] == x[i - 1] {
                    continue;
                }
                let candidate = cost[c - 1][i - 1] + sums.ssd(i, j);
                if candidate < cost[c][j] {
                    cost[c][j] = candidate;
                    start[c][j] = i;
                }
            }
        }
    }

    let mut breaks = Vec::with_capacity(k - 1);
    let mut j = n - 1;
    for c in (1..k).rev() {
        let i = start[c][j];
        breaks.push(x[i]);
        j = i - 1;
    }
    breaks.reverse();
    Ok(breaks)
}

/// Class index of `value` given ascending breaks.
#[inline]
pub fn class_of(value: f64, breaks: &[f64]) -> usize {
    breaks.partition_point(|b| *b <= value)
}

/// Goodness of variance fit: 1 for a perfect partition, 0 for none.
pub fn goodness_of_variance_fit(values: &[f64], breaks: &[f64]) -> Result<f64> {
    let x = sorted_finite(values)?;
    if x.is_empty() {
        return Ok(1.0);
    }
    let sums = PrefixSums::new(&x);
    let total = sums.ssd(0, x.len() - 1);
    if total == 0.0 {
        return Ok(1.0);
    }

    let mut within = 0.0;
    let mut lo = 0;
    while lo < x.len() {
        let class = class_of(x[lo], breaks);
        let hi = x.partition_point(|v| class_of(*v, breaks) <= class);
        within += sums.ssd(lo, hi - 1);
        lo = hi;
    }
    Ok((total - within) / total)
}
