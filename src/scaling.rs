//! Weight-rescaling transforms applied before comparison.
//!
//! Each transform operates on a matrix's values treated as one flat
//! vector and writes the result back in place, so the shape is always
//! preserved. Transforms are applied to each matrix of a comparison
//! independently, never jointly. Degenerate inputs (zero range, zero
//! variance, zero weights under `log`) are not trapped: the transform
//! produces Inf/NaN and downstream consumers tolerate them.

use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::CompareError;
use crate::stats::{average_ranks, ecdf_values, logsumexp, mad, mean, median, sample_sd};

/// All valid scaling names, in the order reported to callers.
pub const SCALING_NAMES: [&str; 9] = [
    "none", "minmax", "rank", "zscore", "robust", "log", "log1p", "softmax", "quantile",
];

/// Named weight-rescaling transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaling {
    /// Identity: weights are compared as-is.
    #[default]
    None,
    /// `(w − min) / (max − min)` onto [0, 1].
    MinMax,
    /// Min-max applied to average-method ranks.
    Rank,
    /// `(w − mean) / sd` (sample standard deviation).
    ZScore,
    /// `(w − median) / MAD`.
    Robust,
    /// Natural logarithm `ln(w)`.
    Log,
    /// `ln(1 + w)`.
    Log1p,
    /// `exp(w − logsumexp(w))`.
    Softmax,
    /// Empirical CDF of the weights evaluated at each weight.
    Quantile,
}

impl Scaling {
    /// Canonical name of this scaling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scaling::None => "none",
            Scaling::MinMax => "minmax",
            Scaling::Rank => "rank",
            Scaling::ZScore => "zscore",
            Scaling::Robust => "robust",
            Scaling::Log => "log",
            Scaling::Log1p => "log1p",
            Scaling::Softmax => "softmax",
            Scaling::Quantile => "quantile",
        }
    }

    /// Apply the transform to `matrix` in place, treating its values as
    /// one flat vector.
    pub fn apply(&self, matrix: &mut Array2<f64>) {
        match self {
            Scaling::None => {}
            Scaling::MinMax => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                write_back(matrix, &minmax(&values));
            }
            Scaling::Rank => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                write_back(matrix, &minmax(&average_ranks(&values)));
            }
            Scaling::ZScore => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                let m = mean(&values);
                let sd = sample_sd(&values);
                for w in matrix.iter_mut() {
                    *w = (*w - m) / sd;
                }
            }
            Scaling::Robust => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                let med = median(&values);
                let scale = mad(&values);
                for w in matrix.iter_mut() {
                    *w = (*w - med) / scale;
                }
            }
            Scaling::Log => {
                for w in matrix.iter_mut() {
                    *w = w.ln();
                }
            }
            Scaling::Log1p => {
                for w in matrix.iter_mut() {
                    *w = w.ln_1p();
                }
            }
            Scaling::Softmax => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                let lse = logsumexp(&values);
                for w in matrix.iter_mut() {
                    *w = (*w - lse).exp();
                }
            }
            Scaling::Quantile => {
                let values: Vec<f64> = matrix.iter().copied().collect();
                write_back(matrix, &ecdf_values(&values));
            }
        }
    }
}

fn minmax(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values.iter().map(|v| (v - min) / range).collect()
}

fn write_back(matrix: &mut Array2<f64>, values: &[f64]) {
    for (slot, &v) in matrix.iter_mut().zip(values.iter()) {
        *slot = v;
    }
}

impl FromStr for Scaling {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Scaling::None),
            "minmax" => Ok(Scaling::MinMax),
            "rank" => Ok(Scaling::Rank),
            "zscore" => Ok(Scaling::ZScore),
            "robust" => Ok(Scaling::Robust),
            "log" => Ok(Scaling::Log),
            "log1p" => Ok(Scaling::Log1p),
            "softmax" => Ok(Scaling::Softmax),
            "quantile" => Ok(Scaling::Quantile),
            other => Err(CompareError::UnsupportedScaling {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Scaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn sample() -> Array2<f64> {
        array![[0.0, 1.0], [2.0, 4.0]]
    }

    #[test]
    fn every_name_round_trips() {
        for name in SCALING_NAMES {
            let scaling: Scaling = name.parse().unwrap();
            assert_eq!(scaling.as_str(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bogus".parse::<Scaling>().unwrap_err();
        assert!(matches!(err, CompareError::UnsupportedScaling { ref name } if name == "bogus"));
    }

    #[test]
    fn none_is_identity() {
        let mut m = sample();
        Scaling::None.apply(&mut m);
        assert_eq!(m, sample());
    }

    #[test]
    fn minmax_maps_onto_unit_interval() {
        let mut m = sample();
        Scaling::MinMax.apply(&mut m);
        assert_abs_diff_eq!(m[[0, 0]], 0.0);
        assert_abs_diff_eq!(m[[1, 1]], 1.0);
        for &v in m.iter() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn minmax_of_constant_vector_is_nan() {
        let mut m = array![[3.0, 3.0], [3.0, 3.0]];
        Scaling::MinMax.apply(&mut m);
        assert!(m.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rank_equals_minmax_for_monotone_input() {
        // Rank scaling of strictly increasing values spaces them evenly.
        let mut m = array![[1.0, 10.0], [100.0, 1000.0]];
        Scaling::Rank.apply(&mut m);
        let flat: Vec<f64> = m.iter().copied().collect();
        assert_eq!(flat, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn zscore_has_zero_mean_unit_sd() {
        let mut m = sample();
        Scaling::ZScore.apply(&mut m);
        let flat: Vec<f64> = m.iter().copied().collect();
        assert_abs_diff_eq!(mean(&flat), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sample_sd(&flat), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn robust_centers_on_median() {
        let mut m = sample();
        Scaling::Robust.apply(&mut m);
        let flat: Vec<f64> = m.iter().copied().collect();
        assert_abs_diff_eq!(median(&flat), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn log_of_zero_weight_is_negative_infinity() {
        let mut m = sample();
        Scaling::Log.apply(&mut m);
        assert_eq!(m[[0, 0]], f64::NEG_INFINITY);
        assert_abs_diff_eq!(m[[1, 1]], 4.0_f64.ln());
    }

    #[test]
    fn log1p_keeps_zero_at_zero() {
        let mut m = sample();
        Scaling::Log1p.apply(&mut m);
        assert_abs_diff_eq!(m[[0, 0]], 0.0);
        assert_abs_diff_eq!(m[[1, 1]], 5.0_f64.ln());
    }

    #[test]
    fn softmax_sums_to_one() {
        let mut m = sample();
        Scaling::Softmax.apply(&mut m);
        assert_abs_diff_eq!(m.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_is_ecdf_at_each_weight() {
        let mut m = sample();
        Scaling::Quantile.apply(&mut m);
        let flat: Vec<f64> = m.iter().copied().collect();
        assert_eq!(flat, vec![0.25, 0.5, 0.75, 1.0]);
    }
}
