//! Error types for network comparison.
//!
//! Two fatal error families exist: input validation failures (shape,
//! missing values, unresolvable inputs) and unsupported configuration
//! options (unknown scaling name). Degenerate statistics — division by
//! zero, zero variance, an all-zero Gram matrix — are *not* errors: they
//! propagate as infinite or NaN values in the affected metric cell.

use thiserror::Error;

/// A specialized `Result` type for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;

/// Errors raised while validating and configuring a comparison.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CompareError {
    /// The first resolved weight matrix is not square.
    #[error("weight matrix for argument '{argument}' is not square: {rows}x{cols}")]
    NonSquare {
        /// Which comparison argument failed (`x` or `y`)
        argument: &'static str,
        /// Number of rows found
        rows: usize,
        /// Number of columns found
        cols: usize,
    },

    /// The two weight matrices do not have identical dimensions.
    #[error("dimension mismatch: x is {x_rows}x{x_cols}, y is {y_rows}x{y_cols}")]
    DimensionMismatch {
        /// Rows of the first matrix
        x_rows: usize,
        /// Columns of the first matrix
        x_cols: usize,
        /// Rows of the second matrix
        y_rows: usize,
        /// Columns of the second matrix
        y_cols: usize,
    },

    /// A weight matrix contains a missing (NaN) value.
    #[error("weight matrix for argument '{argument}' has a missing value at ({row}, {col})")]
    MissingValue {
        /// Which comparison argument failed (`x` or `y`)
        argument: &'static str,
        /// Row of the first missing entry
        row: usize,
        /// Column of the first missing entry
        col: usize,
    },

    /// Node label count does not match the matrix order.
    #[error("expected {order} node labels, got {labels}")]
    LabelMismatch {
        /// Matrix order (rows = columns)
        order: usize,
        /// Number of labels supplied
        labels: usize,
    },

    /// A weight matrix is too small to compare.
    #[error("weight matrix for argument '{argument}' has order {order}; at least 2 nodes required")]
    TooFewNodes {
        /// Which comparison argument failed (`x` or `y`)
        argument: &'static str,
        /// Matrix order found
        order: usize,
    },

    /// A clustered model was indexed past its cluster count.
    #[error("cluster index {index} out of range for model with {count} clusters")]
    ClusterOutOfRange {
        /// Requested cluster index
        index: usize,
        /// Number of clusters available
        count: usize,
    },

    /// The requested scaling name is not recognized.
    #[error(
        "unsupported scaling '{name}'; valid options: \
         none, minmax, rank, zscore, robust, log, log1p, softmax, quantile"
    )]
    UnsupportedScaling {
        /// The unrecognized name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scaling_lists_all_options() {
        let err = CompareError::UnsupportedScaling {
            name: "bogus".into(),
        };
        let msg = err.to_string();
        for name in [
            "none", "minmax", "rank", "zscore", "robust", "log", "log1p", "softmax", "quantile",
        ] {
            assert!(msg.contains(name), "message missing option '{name}': {msg}");
        }
    }

    #[test]
    fn validation_errors_name_the_argument() {
        let err = CompareError::NonSquare {
            argument: "x",
            rows: 2,
            cols: 3,
        };
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("2x3"));
    }
}
