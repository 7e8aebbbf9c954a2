//! Comparison orchestration.
//!
//! [`Comparator`] is the top-level entry point: it resolves the two
//! inputs to weight matrices, validates them, applies the configured
//! scaling to each matrix independently, runs the edge and summary
//! engines, queries the external network/centrality providers for both
//! inputs, and assembles everything into a [`ComparisonResult`]. The
//! whole pipeline is synchronous, deterministic, and pure apart from
//! the two provider calls per input.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edge::{compute_edge_metrics, EdgeRecord};
use crate::error::Result;
use crate::matrix::{validate_pair, CompareInput, WeightMatrix};
use crate::network::{
    centrality_correlations, join_centralities, join_network_summaries, CentralityCorrelationRecord,
    CentralityProvider, CentralityRecord, NetworkMetricRecord, NetworkSummaryProvider,
};
use crate::scaling::Scaling;
use crate::summary::{compute_summary_metrics, SummaryMetricRecord};

/// Read-only bundle of everything one comparison produces.
///
/// Constructed once per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Scaling that was applied to both matrices
    pub scaling: Scaling,
    /// First weight matrix after scaling
    pub scaled_x: WeightMatrix,
    /// Second weight matrix after scaling
    pub scaled_y: WeightMatrix,
    /// Elementwise difference of the scaled pair (x − y)
    pub difference: Array2<f64>,
    /// One record per ordered node pair, self-loops included
    pub edges: Vec<EdgeRecord>,
    /// Five-category summary-metric table
    pub summary: Vec<SummaryMetricRecord>,
    /// Side-by-side whole-network statistics
    pub network: Vec<NetworkMetricRecord>,
    /// Long-format per-node centrality comparison
    pub centrality: Vec<CentralityRecord>,
    /// Per-measure centrality correlations across nodes
    pub centrality_correlations: Vec<CentralityCorrelationRecord>,
}

/// Network comparison engine wired to a pair of external providers.
#[derive(Debug, Clone)]
pub struct Comparator<S, C> {
    summary_provider: S,
    centrality_provider: C,
}

impl<S, C> Comparator<S, C>
where
    S: NetworkSummaryProvider,
    C: CentralityProvider,
{
    /// Create a comparator from the two collaborator services.
    pub fn new(summary_provider: S, centrality_provider: C) -> Self {
        Self {
            summary_provider,
            centrality_provider,
        }
    }

    /// Compare two inputs under the given scaling.
    ///
    /// Validation failures abort before any metric is computed.
    pub fn compare<'a>(
        &self,
        x: impl Into<CompareInput<'a>>,
        y: impl Into<CompareInput<'a>>,
        scaling: Scaling,
    ) -> Result<ComparisonResult> {
        let x = x.into().resolve()?;
        let y = y.into().resolve()?;
        validate_pair(x, y)?;
        debug!(order = x.order(), scaling = %scaling, "inputs validated");

        let (scaled_x, scaled_y) = scale_pair(x, y, scaling);
        let (difference, edges, summary) = compare_scaled(&scaled_x, &scaled_y);

        debug!("querying network and centrality providers");
        let network = join_network_summaries(
            &self.summary_provider.network_summary(x),
            &self.summary_provider.network_summary(y),
        );
        let centrality = join_centralities(
            &self.centrality_provider.centralities(x),
            &self.centrality_provider.centralities(y),
        );
        let centrality_correlations = centrality_correlations(&centrality);

        Ok(ComparisonResult {
            scaling,
            scaled_x,
            scaled_y,
            difference,
            edges,
            summary,
            network,
            centrality,
            centrality_correlations,
        })
    }

    /// [`Comparator::compare`] with the scaling given by name.
    ///
    /// Unknown names fail with the unsupported-option error listing the
    /// valid choices.
    pub fn compare_by_name<'a>(
        &self,
        x: impl Into<CompareInput<'a>>,
        y: impl Into<CompareInput<'a>>,
        scaling: &str,
    ) -> Result<ComparisonResult> {
        self.compare(x, y, scaling.parse()?)
    }
}

/// Compare two raw weight matrices without external providers.
///
/// The network and centrality tables of the result are empty; every
/// other field is identical to what [`Comparator::compare`] produces.
pub fn compare_matrices(
    x: &WeightMatrix,
    y: &WeightMatrix,
    scaling: Scaling,
) -> Result<ComparisonResult> {
    validate_pair(x, y)?;
    let (scaled_x, scaled_y) = scale_pair(x, y, scaling);
    let (difference, edges, summary) = compare_scaled(&scaled_x, &scaled_y);
    Ok(ComparisonResult {
        scaling,
        scaled_x,
        scaled_y,
        difference,
        edges,
        summary,
        network: Vec::new(),
        centrality: Vec::new(),
        centrality_correlations: Vec::new(),
    })
}

/// Apply `scaling` to each matrix independently, never jointly.
fn scale_pair(x: &WeightMatrix, y: &WeightMatrix, scaling: Scaling) -> (WeightMatrix, WeightMatrix) {
    let mut scaled_x = x.clone();
    let mut scaled_y = y.clone();
    scaling.apply(scaled_x.weights_mut());
    scaling.apply(scaled_y.weights_mut());
    (scaled_x, scaled_y)
}

fn compare_scaled(
    scaled_x: &WeightMatrix,
    scaled_y: &WeightMatrix,
) -> (Array2<f64>, Vec<EdgeRecord>, Vec<SummaryMetricRecord>) {
    let difference = scaled_x.weights() - scaled_y.weights();
    let edges = compute_edge_metrics(scaled_x, scaled_y);
    let summary = compute_summary_metrics(scaled_x, scaled_y);
    debug!(edges = edges.len(), metrics = summary.len(), "tables assembled");
    (difference, edges, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn difference_matrix_is_antisymmetric_under_swap() {
        let x = WeightMatrix::unlabeled(array![[0.0, 1.0], [2.0, 0.5]]);
        let y = WeightMatrix::unlabeled(array![[0.3, 0.0], [1.0, 0.5]]);
        let xy = compare_matrices(&x, &y, Scaling::None).unwrap();
        let yx = compare_matrices(&y, &x, Scaling::None).unwrap();
        for (a, b) in xy.difference.iter().zip(yx.difference.iter()) {
            assert_abs_diff_eq!(*a, -*b);
        }
    }

    #[test]
    fn mismatched_dimensions_abort_before_metrics() {
        let x = WeightMatrix::unlabeled(Array2::zeros((2, 2)));
        let y = WeightMatrix::unlabeled(Array2::zeros((3, 3)));
        assert!(matches!(
            compare_matrices(&x, &y, Scaling::None),
            Err(CompareError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn edge_table_has_n_squared_rows() {
        let x = WeightMatrix::unlabeled(Array2::from_elem((3, 3), 0.25));
        let y = WeightMatrix::unlabeled(Array2::from_elem((3, 3), 0.5));
        let result = compare_matrices(&x, &y, Scaling::None).unwrap();
        assert_eq!(result.edges.len(), 9);
    }

    #[test]
    fn scaling_is_applied_to_each_matrix_separately() {
        let x = WeightMatrix::unlabeled(array![[0.0, 10.0], [5.0, 2.5]]);
        let y = WeightMatrix::unlabeled(array![[0.0, 100.0], [50.0, 25.0]]);
        let result = compare_matrices(&x, &y, Scaling::MinMax).unwrap();
        // Min-max is per matrix, so both rescale onto [0, 1] independently.
        assert_abs_diff_eq!(result.scaled_x.weights()[[0, 1]], 1.0);
        assert_abs_diff_eq!(result.scaled_y.weights()[[0, 1]], 1.0);
        assert_abs_diff_eq!(result.difference[[0, 1]], 0.0);
    }

    #[test]
    fn matrix_only_comparison_has_empty_provider_tables() {
        let x = WeightMatrix::unlabeled(Array2::from_elem((2, 2), 1.0));
        let result = compare_matrices(&x, &x, Scaling::None).unwrap();
        assert!(result.network.is_empty());
        assert!(result.centrality.is_empty());
        assert!(result.centrality_correlations.is_empty());
    }
}
