//! Weight matrices, comparison inputs, and validation.
//!
//! A [`WeightMatrix`] is a square array of directed edge weights between
//! the nodes of a transition network, with one label per node shared by
//! rows and columns. Comparison inputs arrive either as a raw matrix, a
//! fitted model exposing one, or one cluster of a clustered model; the
//! [`CompareInput`] resolver extracts the underlying matrix so the rest
//! of the pipeline never branches on the input variant.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};

/// Square matrix of directed edge weights with node labels.
///
/// Rows are sources and columns are targets; rows and columns are
/// indexed by the same ordered label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    labels: Vec<String>,
    weights: Array2<f64>,
}

impl WeightMatrix {
    /// Create a labeled weight matrix.
    ///
    /// Fails when the label count does not match the matrix order. The
    /// matrix itself is only shape-checked here; squareness and missing
    /// values are verified when a comparison is run.
    pub fn new(labels: Vec<String>, weights: Array2<f64>) -> Result<Self> {
        if labels.len() != weights.nrows() {
            return Err(CompareError::LabelMismatch {
                order: weights.nrows(),
                labels: labels.len(),
            });
        }
        Ok(Self { labels, weights })
    }

    /// Create a weight matrix with positional labels `V1, V2, …`.
    pub fn unlabeled(weights: Array2<f64>) -> Self {
        let labels = (1..=weights.nrows()).map(|i| format!("V{i}")).collect();
        Self { labels, weights }
    }

    /// Node labels, in row/column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The underlying weight array.
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Mutable access to the underlying weight array.
    pub(crate) fn weights_mut(&mut self) -> &mut Array2<f64> {
        &mut self.weights
    }

    /// Number of nodes (matrix order).
    pub fn order(&self) -> usize {
        self.weights.nrows()
    }

    /// The weights flattened row-major into a vector.
    pub fn flat(&self) -> Vec<f64> {
        self.weights.iter().copied().collect()
    }
}

/// A fitted transition model that exposes its weight matrix.
///
/// Model construction is out of scope for this crate; callers implement
/// this trait on their own model types.
pub trait TransitionModel {
    /// The model's weight matrix.
    fn weights(&self) -> &WeightMatrix;
}

/// A clustered transition model: one weight matrix per cluster.
pub trait ClusteredModel {
    /// Number of clusters in the model.
    fn cluster_count(&self) -> usize;

    /// Weight matrix of the cluster at `index`, if it exists.
    fn cluster_weights(&self, index: usize) -> Option<&WeightMatrix>;
}

/// One side of a comparison: a raw matrix, a model, or a model cluster.
#[derive(Clone, Copy)]
pub enum CompareInput<'a> {
    /// A raw weight matrix.
    Matrix(&'a WeightMatrix),
    /// A fitted model wrapping a weight matrix.
    Model(&'a dyn TransitionModel),
    /// One cluster of a clustered model, selected by index.
    Cluster(&'a dyn ClusteredModel, usize),
}

impl<'a> CompareInput<'a> {
    /// Resolve the input to its underlying weight matrix.
    pub fn resolve(&self) -> Result<&'a WeightMatrix> {
        match *self {
            CompareInput::Matrix(m) => Ok(m),
            CompareInput::Model(m) => Ok(m.weights()),
            CompareInput::Cluster(c, index) => {
                c.cluster_weights(index)
                    .ok_or(CompareError::ClusterOutOfRange {
                        index,
                        count: c.cluster_count(),
                    })
            }
        }
    }
}

impl<'a> From<&'a WeightMatrix> for CompareInput<'a> {
    fn from(m: &'a WeightMatrix) -> Self {
        CompareInput::Matrix(m)
    }
}

impl std::fmt::Debug for CompareInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareInput::Matrix(m) => f.debug_tuple("Matrix").field(&m.order()).finish(),
            CompareInput::Model(m) => f.debug_tuple("Model").field(&m.weights().order()).finish(),
            CompareInput::Cluster(_, i) => f.debug_tuple("Cluster").field(i).finish(),
        }
    }
}

/// Validate a resolved pair of weight matrices before comparison.
///
/// Checks, in order: the first matrix is square, both have identical
/// dimensions, both have at least two nodes, and neither contains a
/// missing (NaN) value. The first failure aborts the whole comparison;
/// no partial results are produced.
pub fn validate_pair(x: &WeightMatrix, y: &WeightMatrix) -> Result<()> {
    let (xr, xc) = x.weights().dim();
    if xr != xc {
        return Err(CompareError::NonSquare {
            argument: "x",
            rows: xr,
            cols: xc,
        });
    }
    let (yr, yc) = y.weights().dim();
    if (xr, xc) != (yr, yc) {
        return Err(CompareError::DimensionMismatch {
            x_rows: xr,
            x_cols: xc,
            y_rows: yr,
            y_cols: yc,
        });
    }
    if xr < 2 {
        return Err(CompareError::TooFewNodes {
            argument: "x",
            order: xr,
        });
    }
    check_missing("x", x)?;
    check_missing("y", y)?;
    Ok(())
}

fn check_missing(argument: &'static str, m: &WeightMatrix) -> Result<()> {
    for ((row, col), value) in m.weights().indexed_iter() {
        if value.is_nan() {
            return Err(CompareError::MissingValue { argument, row, col });
        }
    }
    Ok(())
}
