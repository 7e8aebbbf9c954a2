//! Aggregate summary metrics over the full edge set.
//!
//! Five metric categories are computed from the two scaled weight
//! matrices and concatenated into one ordered table: weight deviations,
//! correlations, dissimilarities, similarities, and pattern similarities.
//! Degenerate inputs produce Inf/NaN values in the affected cells; no
//! metric is silently dropped or clamped.

use serde::{Deserialize, Serialize};

use crate::matrix::WeightMatrix;
use crate::stats::{
    distance_correlation, kendall, mean, median, pearson, rv_coefficient, sample_sd, spearman,
};

/// Category tag for a summary metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Absolute and relative magnitudes of the edge-weight differences
    WeightDeviations,
    /// Correlation coefficients between the two weight vectors
    Correlations,
    /// Distance-style dissimilarity measures
    Dissimilarities,
    /// Similarity coefficients
    Similarities,
    /// Agreement of weight patterns (trends and signs)
    PatternSimilarities,
}

impl MetricCategory {
    /// Human-readable category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::WeightDeviations => "Weight Deviations",
            MetricCategory::Correlations => "Correlations",
            MetricCategory::Dissimilarities => "Dissimilarities",
            MetricCategory::Similarities => "Similarities",
            MetricCategory::PatternSimilarities => "Pattern Similarities",
        }
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (category, metric, value) entry of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetricRecord {
    /// Metric category
    pub category: MetricCategory,
    /// Metric name
    pub metric: String,
    /// Metric value; may be Inf/NaN for degenerate inputs
    pub value: f64,
}

/// Compute the full five-category summary table for a scaled pair.
pub fn compute_summary_metrics(x: &WeightMatrix, y: &WeightMatrix) -> Vec<SummaryMetricRecord> {
    let xs = x.flat();
    let ys = y.flat();
    let abs_diff: Vec<f64> = xs.iter().zip(ys.iter()).map(|(a, b)| (a - b).abs()).collect();

    let mut table = Vec::with_capacity(22);
    let mut push = |category, metric: &str, value| {
        table.push(SummaryMetricRecord {
            category,
            metric: metric.to_string(),
            value,
        });
    };

    // Weight deviations
    use MetricCategory::*;
    let abs_y: Vec<f64> = ys.iter().map(|v| v.abs()).collect();
    push(WeightDeviations, "Mean Absolute Difference", mean(&abs_diff));
    push(WeightDeviations, "Median Absolute Difference", median(&abs_diff));
    push(
        WeightDeviations,
        "RMS Difference",
        (abs_diff.iter().map(|d| d * d).sum::<f64>() / abs_diff.len() as f64).sqrt(),
    );
    push(
        WeightDeviations,
        "Maximum Absolute Difference",
        abs_diff.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );
    push(
        WeightDeviations,
        "Relative Mean Difference",
        mean(&abs_diff) / mean(&abs_y),
    );
    push(
        WeightDeviations,
        "CV Ratio",
        sample_sd(&xs) * mean(&ys) / (mean(&xs) * sample_sd(&ys)),
    );

    // Correlations
    push(Correlations, "Pearson Correlation", pearson(&xs, &ys));
    push(Correlations, "Spearman Correlation", spearman(&xs, &ys));
    push(Correlations, "Kendall Correlation", kendall(&xs, &ys));
    push(
        Correlations,
        "Distance Correlation",
        distance_correlation(&xs, &ys),
    );

    // Dissimilarities
    push(
        Dissimilarities,
        "Euclidean Distance",
        abs_diff.iter().map(|d| d * d).sum::<f64>().sqrt(),
    );
    push(Dissimilarities, "Manhattan Distance", abs_diff.iter().sum());
    push(Dissimilarities, "Canberra Distance", canberra(&xs, &ys));
    push(
        Dissimilarities,
        "Bray-Curtis Dissimilarity",
        abs_diff.iter().sum::<f64>() / xs.iter().zip(ys.iter()).map(|(a, b)| a + b).sum::<f64>(),
    );
    push(
        Dissimilarities,
        "Frobenius Distance",
        abs_diff.iter().map(|d| d * d).sum::<f64>().sqrt() / (x.order() as f64 / 2.0).sqrt(),
    );

    // Similarities
    push(Similarities, "Cosine Similarity", cosine(&xs, &ys));
    let min_sum: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(a, b)| a.abs().min(b.abs()))
        .sum();
    let max_sum: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(a, b)| a.abs().max(b.abs()))
        .sum();
    let abs_sum_x: f64 = xs.iter().map(|v| v.abs()).sum();
    let abs_sum_y: f64 = abs_y.iter().sum();
    push(Similarities, "Jaccard Index", min_sum / max_sum);
    push(
        Similarities,
        "Dice Coefficient",
        2.0 * min_sum / (abs_sum_x + abs_sum_y),
    );
    push(
        Similarities,
        "Overlap Coefficient",
        min_sum / abs_sum_x.min(abs_sum_y),
    );
    push(
        Similarities,
        "RV Coefficient",
        rv_coefficient(x.weights().view(), y.weights().view()),
    );

    // Pattern similarities
    push(PatternSimilarities, "Rank Agreement", trend_agreement(&xs, &ys));
    push(PatternSimilarities, "Sign Agreement", sign_agreement(&xs, &ys));

    table
}

/// Canberra-style sum restricted to entries where both magnitudes are
/// strictly positive.
fn canberra(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y.iter())
        .filter(|(a, b)| a.abs() > 0.0 && b.abs() > 0.0)
        .map(|(a, b)| (a - b).abs() / (a.abs() + b.abs()))
        .sum()
}

fn cosine(x: &[f64], y: &[f64]) -> f64 {
    let dot: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let nx: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    let ny: f64 = y.iter().map(|v| v * v).sum::<f64>().sqrt();
    dot / (nx * ny)
}

/// Three-valued sign; unlike `f64::signum`, zero maps to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fraction of consecutive-difference sign agreements between the two
/// flattened vectors.
fn trend_agreement(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let agree = (1..n)
        .filter(|&i| sign(x[i] - x[i - 1]) == sign(y[i] - y[i - 1]))
        .count();
    agree as f64 / (n - 1) as f64
}

/// Fraction of elementwise sign agreements over positions where at
/// least one operand is nonzero. NaN when every pair is (0, 0).
fn sign_agreement(x: &[f64], y: &[f64]) -> f64 {
    let mut agree = 0usize;
    let mut total = 0usize;
    for (&a, &b) in x.iter().zip(y.iter()) {
        if a == 0.0 && b == 0.0 {
            continue;
        }
        total += 1;
        if sign(a) == sign(b) {
            agree += 1;
        }
    }
    agree as f64 / total as f64
}
