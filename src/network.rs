//! Whole-network and node-centrality comparison.
//!
//! Network summary statistics and centrality algorithms are external
//! collaborators: callers supply implementations of
//! [`NetworkSummaryProvider`] and [`CentralityProvider`], and this
//! module joins their outputs for the two inputs into side-by-side and
//! long-format comparison tables. Joins are explicit merge-by-key
//! operations; a metric or (node, measure) pair missing on one side is
//! reported with a NaN counterpart rather than dropped silently.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::matrix::WeightMatrix;
use crate::stats::pearson;

/// One named whole-network statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    /// Metric name
    pub metric: String,
    /// Metric value
    pub value: f64,
}

/// Per-node centrality table: one row per node, one column per measure.
///
/// Node ordering and measure names must match between the two tables
/// being compared; the join is keyed on both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityTable {
    /// Node labels, one per row
    pub nodes: Vec<String>,
    /// Centrality measure names, one per column
    pub measures: Vec<String>,
    /// Values, node-major: `values[[node, measure]]`
    pub values: Array2<f64>,
}

/// Provides whole-network summary statistics for a weight matrix.
///
/// Implementations must return metrics in a fixed, stable name ordering
/// shared between calls so the side-by-side join aligns.
pub trait NetworkSummaryProvider {
    /// Whole-network statistics of `matrix`.
    fn network_summary(&self, matrix: &WeightMatrix) -> Vec<NetworkSummary>;
}

/// Provides per-node centrality measures for a weight matrix.
pub trait CentralityProvider {
    /// Centrality table of `matrix`; column names and node ordering
    /// must be stable across calls.
    fn centralities(&self, matrix: &WeightMatrix) -> CentralityTable;
}

/// Side-by-side row of the network summary comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetricRecord {
    /// Metric name
    pub metric: String,
    /// Value under the first input
    pub value_x: f64,
    /// Value under the second input
    pub value_y: f64,
}

/// Long-format row of the centrality comparison: one node, one measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRecord {
    /// Node label
    pub node: String,
    /// Centrality measure name
    pub measure: String,
    /// Value under the first input
    pub value_x: f64,
    /// Value under the second input
    pub value_y: f64,
    /// `value_x − value_y`
    pub difference: f64,
}

/// Per-measure correlation of centrality values across nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityCorrelationRecord {
    /// Centrality measure name
    pub measure: String,
    /// Pearson correlation of the x- and y-values across nodes; NaN
    /// when fewer than two complete pairs exist
    pub correlation: f64,
}

/// Join two network summary tables side by side on metric name.
///
/// Row order follows the first table; metrics absent from the second
/// get a NaN `value_y`.
pub fn join_network_summaries(
    x: &[NetworkSummary],
    y: &[NetworkSummary],
) -> Vec<NetworkMetricRecord> {
    x.iter()
        .map(|rec| {
            let value_y = y
                .iter()
                .find(|other| other.metric == rec.metric)
                .map_or(f64::NAN, |other| other.value);
            NetworkMetricRecord {
                metric: rec.metric.clone(),
                value_x: rec.value,
                value_y,
            }
        })
        .collect()
}

/// Reshape two centrality tables to long form and join on (node, measure).
///
/// Rows are emitted node-major in the first table's ordering. A pair
/// missing from the second table yields NaN for `value_y` and the
/// difference.
pub fn join_centralities(x: &CentralityTable, y: &CentralityTable) -> Vec<CentralityRecord> {
    let mut records = Vec::with_capacity(x.nodes.len() * x.measures.len());
    for (i, node) in x.nodes.iter().enumerate() {
        for (j, measure) in x.measures.iter().enumerate() {
            let value_x = x.values[[i, j]];
            let value_y = lookup(y, node, measure);
            records.push(CentralityRecord {
                node: node.clone(),
                measure: measure.clone(),
                value_x,
                value_y,
                difference: value_x - value_y,
            });
        }
    }
    records
}

fn lookup(table: &CentralityTable, node: &str, measure: &str) -> f64 {
    let row = table.nodes.iter().position(|n| n == node);
    let col = table.measures.iter().position(|m| m == measure);
    match (row, col) {
        (Some(i), Some(j)) => table.values[[i, j]],
        _ => f64::NAN,
    }
}

/// Group joined centrality records by measure and correlate the x- and
/// y-values across nodes.
///
/// Correlation against fewer than two complete pairs is recovered
/// locally to NaN, never raised as an error.
pub fn centrality_correlations(records: &[CentralityRecord]) -> Vec<CentralityCorrelationRecord> {
    let mut measures: Vec<&str> = Vec::new();
    for rec in records {
        if !measures.contains(&rec.measure.as_str()) {
            measures.push(&rec.measure);
        }
    }
    measures
        .into_iter()
        .map(|measure| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = records
                .iter()
                .filter(|r| r.measure == measure)
                .map(|r| (r.value_x, r.value_y))
                .unzip();
            CentralityCorrelationRecord {
                measure: measure.to_string(),
                correlation: pearson(&xs, &ys),
            }
        })
        .collect()
}
