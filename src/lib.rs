//! # netcompare
//!
//! Comparison engine for weighted directed graphs over a shared node set,
//! aimed at quantifying how two fitted transition-network models (or two
//! clusters of one model) differ.
//!
//! Given two square weight matrices with identical node ordering, the
//! engine validates them, applies one of nine weight-rescaling transforms
//! to each matrix independently, and produces:
//!
//! - **Edge metrics**: one record per ordered node pair (differences,
//!   ratio indices, rank/percentile differences, standardized weights).
//! - **Summary metrics**: a five-category battery of weight deviations,
//!   correlations (including distance correlation), dissimilarities,
//!   similarities (including the RV coefficient), and pattern agreement.
//! - **Network and centrality comparisons**: side-by-side joins of
//!   whole-network statistics and per-node centralities obtained from
//!   caller-supplied providers, with per-measure correlations.
//!
//! Degenerate statistics (zero variance, division by zero) deliberately
//! surface as Inf/NaN values instead of being masked; only shape and
//! missing-value problems are errors.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use netcompare::{compare_matrices, Scaling, WeightMatrix};
//!
//! let x = WeightMatrix::unlabeled(array![[0.0, 0.8], [0.2, 0.0]]);
//! let y = WeightMatrix::unlabeled(array![[0.0, 0.6], [0.4, 0.0]]);
//!
//! let result = compare_matrices(&x, &y, Scaling::None).unwrap();
//! assert_eq!(result.edges.len(), 4);
//! ```

#![forbid(unsafe_code)]

pub mod compare;
pub mod edge;
pub mod error;
pub mod matrix;
pub mod network;
pub mod scaling;
pub mod stats;
pub mod summary;

// Re-export the main types at the crate root
pub use compare::{compare_matrices, Comparator, ComparisonResult};
pub use edge::{compute_edge_metrics, EdgeRecord};
pub use error::{CompareError, Result};
pub use matrix::{
    validate_pair, ClusteredModel, CompareInput, TransitionModel, WeightMatrix,
};
pub use network::{
    CentralityCorrelationRecord, CentralityProvider, CentralityRecord, CentralityTable,
    NetworkMetricRecord, NetworkSummary, NetworkSummaryProvider,
};
pub use scaling::{Scaling, SCALING_NAMES};
pub use summary::{compute_summary_metrics, MetricCategory, SummaryMetricRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compare::{compare_matrices, Comparator, ComparisonResult};
    pub use crate::matrix::{CompareInput, TransitionModel, WeightMatrix};
    pub use crate::network::{CentralityProvider, NetworkSummaryProvider};
    pub use crate::scaling::Scaling;
    pub use crate::{CompareError, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
