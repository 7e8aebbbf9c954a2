//! Per-edge comparison metrics.
//!
//! One [`EdgeRecord`] is produced for every ordered (source, target)
//! pair including self-loops, so an n-node network yields exactly n²
//! records. Ratio metrics (strength similarity, difference index,
//! z-score ratio) divide by the second input and are intentionally not
//! guarded: zero denominators surface as Inf/NaN rather than being
//! suppressed, and the asymmetry under swapping x and y is by contract.

use serde::{Deserialize, Serialize};

use crate::matrix::WeightMatrix;
use crate::stats::{average_ranks, ecdf_values, mean, sample_sd};

/// Comparison quantities for one ordered node pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node label
    pub source: String,
    /// Target node label
    pub target: String,
    /// Scaled weight under the first model
    pub weight_x: f64,
    /// Scaled weight under the second model
    pub weight_y: f64,
    /// Raw difference `x − y`
    pub difference: f64,
    /// Absolute difference `|x − y|`
    pub abs_difference: f64,
    /// Squared difference `(x − y)²`
    pub squared_difference: f64,
    /// Relative difference `|x − y| / (x + y)`
    pub relative_difference: f64,
    /// Strength-similarity index `x / y`
    pub strength_similarity: f64,
    /// Difference index `(x − y) / y`
    pub difference_index: f64,
    /// Absolute rank difference over the flattened vectors
    pub rank_difference: f64,
    /// Absolute percentile difference `|ECDF_x(x) − ECDF_y(y)|`
    pub percentile_difference: f64,
    /// Logarithmic ratio `ln(1 + x) − ln(1 + y)`
    pub log_ratio: f64,
    /// Weight standardized (z-scored) within the first matrix
    pub zscore_x: f64,
    /// Weight standardized (z-scored) within the second matrix
    pub zscore_y: f64,
    /// Ratio of the two standardized weights
    pub zscore_ratio: f64,
}

/// Compute the full edge-metric table for a scaled, validated pair.
///
/// Node labels are taken from `x`; iteration is row-major, so records
/// are ordered source-major.
pub fn compute_edge_metrics(x: &WeightMatrix, y: &WeightMatrix) -> Vec<EdgeRecord> {
    let n = x.order();
    let flat_x = x.flat();
    let flat_y = y.flat();

    let ranks_x = average_ranks(&flat_x);
    let ranks_y = average_ranks(&flat_y);
    let ecdf_x = ecdf_values(&flat_x);
    let ecdf_y = ecdf_values(&flat_y);

    let mean_x = mean(&flat_x);
    let mean_y = mean(&flat_y);
    let sd_x = sample_sd(&flat_x);
    let sd_y = sample_sd(&flat_y);

    let labels = x.labels();
    let mut records = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let flat = i * n + j;
            let wx = flat_x[flat];
            let wy = flat_y[flat];
            let diff = wx - wy;
            let zx = (wx - mean_x) / sd_x;
            let zy = (wy - mean_y) / sd_y;
            records.push(EdgeRecord {
                source: labels[i].clone(),
                target: labels[j].clone(),
                weight_x: wx,
                weight_y: wy,
                difference: diff,
                abs_difference: diff.abs(),
                squared_difference: diff * diff,
                relative_difference: diff.abs() / (wx + wy),
                strength_similarity: wx / wy,
                difference_index: diff / wy,
                rank_difference: (ranks_x[flat] - ranks_y[flat]).abs(),
                percentile_difference: (ecdf_x[flat] - ecdf_y[flat]).abs(),
                log_ratio: wx.ln_1p() - wy.ln_1p(),
                zscore_x: zx,
                zscore_y: zy,
                zscore_ratio: zx / zy,
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn pair() -> (WeightMatrix, WeightMatrix) {
        let x = WeightMatrix::unlabeled(array![[0.0, 1.0], [2.0, 3.0]]);
        let y = WeightMatrix::unlabeled(array![[0.0, 3.0], [1.0, 2.0]]);
        (x, y)
    }

    #[test]
    fn one_record_per_ordered_pair() {
        let (x, y) = pair();
        let records = compute_edge_metrics(&x, &y);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].source, "V1");
        assert_eq!(records[0].target, "V1");
        assert_eq!(records[3].source, "V2");
        assert_eq!(records[3].target, "V2");
    }

    #[test]
    fn difference_columns_are_consistent() {
        let (x, y) = pair();
        let records = compute_edge_metrics(&x, &y);
        // V1 -> V2: x = 1, y = 3
        let r = &records[1];
        assert_abs_diff_eq!(r.difference, -2.0);
        assert_abs_diff_eq!(r.abs_difference, 2.0);
        assert_abs_diff_eq!(r.squared_difference, 4.0);
        assert_abs_diff_eq!(r.relative_difference, 0.5);
        assert_abs_diff_eq!(r.log_ratio, 2.0_f64.ln() - 4.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn ratio_metrics_keep_non_finite_outcomes() {
        let (x, y) = pair();
        let records = compute_edge_metrics(&x, &y);
        // V1 -> V1: both weights zero.
        let self_loop = &records[0];
        assert!(self_loop.relative_difference.is_nan());
        assert!(self_loop.strength_similarity.is_nan());
        // V2 -> V1: x = 2, y = 1.
        let r = &records[2];
        assert_abs_diff_eq!(r.strength_similarity, 2.0);
        assert_abs_diff_eq!(r.difference_index, 1.0);
    }

    #[test]
    fn division_by_zero_weight_is_infinite() {
        let x = WeightMatrix::unlabeled(array![[0.0, 2.0], [0.0, 0.0]]);
        let y = WeightMatrix::unlabeled(array![[0.0, 0.0], [0.0, 0.0]]);
        let records = compute_edge_metrics(&x, &y);
        assert!(records[1].strength_similarity.is_infinite());
        assert!(records[1].difference_index.is_infinite());
    }

    #[test]
    fn rank_and_percentile_differences() {
        let (x, y) = pair();
        let records = compute_edge_metrics(&x, &y);
        // x flat = [0,1,2,3] -> ranks [1,2,3,4]; y flat = [0,3,1,2] -> ranks [1,4,2,3]
        assert_abs_diff_eq!(records[0].rank_difference, 0.0);
        assert_abs_diff_eq!(records[1].rank_difference, 2.0);
        assert_abs_diff_eq!(records[2].rank_difference, 1.0);
        // ECDFs over four distinct values step by 0.25.
        assert_abs_diff_eq!(records[1].percentile_difference, 0.5);
    }

    #[test]
    fn identical_inputs_zero_out_differences() {
        let m = WeightMatrix::unlabeled(array![[1.0, 2.0], [3.0, 4.0]]);
        for record in compute_edge_metrics(&m, &m) {
            assert_abs_diff_eq!(record.difference, 0.0);
            assert_abs_diff_eq!(record.abs_difference, 0.0);
            assert_abs_diff_eq!(record.rank_difference, 0.0);
            assert_abs_diff_eq!(record.percentile_difference, 0.0);
            assert_abs_diff_eq!(record.strength_similarity, 1.0);
        }
    }

    #[test]
    fn zscores_use_each_matrix_independently() {
        let (x, y) = pair();
        let records = compute_edge_metrics(&x, &y);
        let flat_x = x.flat();
        let expected = (flat_x[1] - mean(&flat_x)) / sample_sd(&flat_x);
        assert_abs_diff_eq!(records[1].zscore_x, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(records[1].zscore_ratio, records[1].zscore_x / records[1].zscore_y);
    }
}
