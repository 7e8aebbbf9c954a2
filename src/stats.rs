//! Statistical primitives shared across the comparison engines.
//!
//! Everything in this module is a pure free function over slices or
//! [`ndarray`] views. The correlation battery (Pearson, Spearman, Kendall)
//! operates on pairwise-complete observations: element pairs where either
//! side is NaN are dropped before computing, and fewer than two remaining
//! pairs yields NaN rather than an error. Degenerate denominators (zero
//! variance, all-zero Gram matrices) are deliberately left to produce
//! Inf/NaN — callers expose degeneracy instead of masking it.

use ndarray::{Array2, ArrayView2};

/// Scale factor converting MAD to a consistent estimate of σ for
/// Gaussian data: σ ≈ 1.4826 · MAD.
pub const MAD_SCALE: f64 = 1.4826;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). NaN when fewer than
/// two values are given.
pub fn sample_sd(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Median of a slice (sorts a copy). NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Median absolute deviation scaled by [`MAD_SCALE`].
pub fn mad(values: &[f64]) -> f64 {
    let med = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
    MAD_SCALE * median(&deviations)
}

/// Average-method ranks (1-based). Tied values receive the mean of the
/// positions they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j (0-based) hold equal values; average their 1-based ranks.
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        i = j + 1;
    }
    ranks
}

/// Empirical CDF of `values` evaluated at each element of `values`:
/// the fraction of entries less than or equal to the element.
pub fn ecdf_values(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values
        .iter()
        .map(|&v| sorted.partition_point(|&s| s <= v) as f64 / n as f64)
        .collect()
}

/// Numerically stable log-sum-exp: `max + ln(Σ exp(v − max))`.
///
/// Subtracting the maximum before exponentiating prevents overflow for
/// large inputs. Returns −∞ for an all-−∞ or empty input.
pub fn logsumexp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Collect the pairwise-complete observations: pairs where either side
/// is NaN are dropped. Infinite values are kept.
fn complete_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(x.len());
    let mut ys = Vec::with_capacity(y.len());
    for (&a, &b) in x.iter().zip(y.iter()) {
        if !a.is_nan() && !b.is_nan() {
            xs.push(a);
            ys.push(b);
        }
    }
    (xs, ys)
}

/// Pearson correlation over complete cases; NaN under two valid pairs
/// or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys) = complete_pairs(x, y);
    pearson_complete(&xs, &ys)
}

fn pearson_complete(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        let da = a - mx;
        let db = b - my;
        cov += da * db;
        vx += da * da;
        vy += db * db;
    }
    cov / (vx * vy).sqrt()
}

/// Spearman rank correlation: Pearson over average-method ranks of the
/// complete cases.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys) = complete_pairs(x, y);
    if xs.len() < 2 {
        return f64::NAN;
    }
    pearson_complete(&average_ranks(&xs), &average_ranks(&ys))
}

/// Kendall rank correlation (tau-b, tie-corrected) over complete cases.
pub fn kendall(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys) = complete_pairs(x, y);
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let mut concordant = 0u64;
    let mut discordant = 0u64;
    let mut ties_x = 0u64;
    let mut ties_y = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = xs[i] - xs[j];
            let dy = ys[i] - ys[j];
            if dx == 0.0 && dy == 0.0 {
                // Tied in both: contributes to neither denominator term.
            } else if dx == 0.0 {
                ties_x += 1;
            } else if dy == 0.0 {
                ties_y += 1;
            } else if dx * dy > 0.0 {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }
    let num = concordant as f64 - discordant as f64;
    let den = ((concordant + discordant + ties_x) as f64
        * (concordant + discordant + ties_y) as f64)
        .sqrt();
    num / den
}

/// Distance correlation between two vectors of equal length.
///
/// Builds the full pairwise-distance matrix of each vector, double-centers
/// each (subtract row mean, subtract column mean, add grand mean), and
/// normalizes the mean elementwise product by the geometric mean of the
/// two distance variances. The result lies in [0, 1]; a constant vector
/// has zero distance variance and yields 0 by convention. Requires
/// length ≥ 2 (NaN otherwise).
pub fn distance_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || y.len() != n {
        return f64::NAN;
    }
    let a = centered_distance_matrix(x);
    let b = centered_distance_matrix(y);

    let n2 = (n * n) as f64;
    let mut dcov2 = 0.0;
    let mut dvar_x = 0.0;
    let mut dvar_y = 0.0;
    for (va, vb) in a.iter().zip(b.iter()) {
        dcov2 += va * vb;
        dvar_x += va * va;
        dvar_y += vb * vb;
    }
    dcov2 /= n2;
    dvar_x /= n2;
    dvar_y /= n2;

    let denom = (dvar_x * dvar_y).sqrt();
    if denom <= 0.0 {
        return 0.0;
    }
    (dcov2.max(0.0) / denom).sqrt()
}

/// Pairwise absolute-distance matrix, double-centered.
fn centered_distance_matrix(v: &[f64]) -> Array2<f64> {
    let n = v.len();
    let mut d = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            d[[i, j]] = (v[i] - v[j]).abs();
        }
    }
    let grand = d.sum() / (n * n) as f64;
    let row_means: Vec<f64> = (0..n).map(|i| d.row(i).sum() / n as f64).collect();
    let col_means: Vec<f64> = (0..n).map(|j| d.column(j).sum() / n as f64).collect();
    for i in 0..n {
        for j in 0..n {
            d[[i, j]] = d[[i, j]] - row_means[i] - col_means[j] + grand;
        }
    }
    d
}

/// RV coefficient between two matrices with matched rows.
///
/// Mean-centers the columns of each matrix, forms the self-Gram matrices
/// S = Xc·Xcᵀ, and returns trace(S1·S2) / √(trace(S1²)·trace(S2²)).
/// Degenerates to NaN when either Gram matrix is all-zero.
pub fn rv_coefficient(x: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>) -> f64 {
    let gx = centered_gram(x);
    let gy = centered_gram(y);

    let mut cross = 0.0;
    let mut self_x = 0.0;
    let mut self_y = 0.0;
    // Gram matrices are symmetric, so trace(S1·S2) = Σ S1∘S2.
    for (a, b) in gx.iter().zip(gy.iter()) {
        cross += a * b;
        self_x += a * a;
        self_y += b * b;
    }
    cross / (self_x * self_y).sqrt()
}

/// Column-centered self-Gram matrix Xc·Xcᵀ.
fn centered_gram(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let (rows, cols) = x.dim();
    let mut centered = x.to_owned();
    for j in 0..cols {
        let m = centered.column(j).sum() / rows as f64;
        for i in 0..rows {
            centered[[i, j]] -= m;
        }
    }
    let mut gram = Array2::zeros((rows, rows));
    for i in 0..rows {
        for k in 0..rows {
            let mut dot = 0.0;
            for j in 0..cols {
                dot += centered[[i, j]] * centered[[k, j]];
            }
            gram[[i, k]] = dot;
        }
    }
    gram
}
