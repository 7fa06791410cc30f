//! Pairwise correlation analysis across players' metric histories.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{AnalysisError, Result};
use crate::stats;
use crate::types::{CorrelationPair, CorrelationStrength};

/// Default |r| threshold for a pair to count as significant.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.5;

/// A player's per-metric value histories, keyed by metric name.
#[derive(Debug, Clone)]
pub struct PlayerMetrics {
    pub name: String,
    pub metrics: FxHashMap<String, Vec<f64>>,
}

impl PlayerMetrics {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: FxHashMap::default(),
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>, values: Vec<f64>) -> Self {
        self.metrics.insert(metric.into(), values);
        self
    }

    fn series(&self, metric: &str) -> Result<&[f64]> {
        self.metrics
            .get(metric)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                AnalysisError::UnsupportedParameter(format!(
                    "player {} has no history for metric {metric}",
                    self.name
                ))
            })
    }
}

/// Build the full players x players correlation matrix.
///
/// Cell (i, j) is the mean across `metrics` of the Pearson correlation
/// between player i's and player j's history for that metric. The
/// matrix is symmetric and the diagonal is 1.0 for any non-constant
/// history (self-correlation over identical series). Rows are computed
/// in parallel.
pub fn build_matrix(players: &[PlayerMetrics], metrics: &[String]) -> Result<Vec<Vec<f64>>> {
    if players.len() < 2 {
        return Err(AnalysisError::InsufficientEntities {
            required: 2,
            actual: players.len(),
        });
    }
    if metrics.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    (0..players.len())
        .into_par_iter()
        .map(|i| {
            (0..players.len())
                .map(|j| pair_correlation(&players[i], &players[j], metrics))
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}

/// Correlation between two players, averaged across metrics.
fn pair_correlation(a: &PlayerMetrics, b: &PlayerMetrics, metrics: &[String]) -> Result<f64> {
    let mut coefficients = Vec::with_capacity(metrics.len());
    for metric in metrics {
        coefficients.push(stats::pearson_correlation(
            a.series(metric)?,
            b.series(metric)?,
        )?);
    }
    stats::mean(&coefficients)
}

/// Significant off-diagonal pairs, upper triangle only.
///
/// Pairs with |r| strictly above `threshold` are returned in row-major
/// order, tagged with a strength label.
pub fn find_significant(matrix: &[Vec<f64>], threshold: f64) -> Vec<CorrelationPair> {
    let mut pairs = Vec::new();
    for i in 0..matrix.len() {
        for j in (i + 1)..matrix[i].len() {
            let coefficient = matrix[i][j];
            if coefficient.abs() > threshold {
                pairs.push(CorrelationPair {
                    row: i,
                    col: j,
                    coefficient,
                    strength: CorrelationStrength::from_coefficient(coefficient),
                });
            }
        }
    }
    pairs
}

/// Human-readable insight lines for the shell to render.
pub fn describe(pairs: &[CorrelationPair], players: &[PlayerMetrics]) -> Vec<String> {
    pairs
        .iter()
        .map(|p| {
            format!(
                "{} correlation ({:+.2}) between {} and {}",
                p.strength.as_str(),
                p.coefficient,
                players.get(p.row).map(|pl| pl.name.as_str()).unwrap_or("?"),
                players.get(p.col).map(|pl| pl.name.as_str()).unwrap_or("?"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_player(name: &str, points: Vec<f64>, assists: Vec<f64>) -> PlayerMetrics {
        PlayerMetrics::new(name)
            .with_metric("points", points)
            .with_metric("assists", assists)
    }

    fn metric_names() -> Vec<String> {
        vec!["points".to_string(), "assists".to_string()]
    }

    #[test]
    fn test_matrix_shape_symmetry_and_diagonal() {
        let players = vec![
            make_player("a", vec![10.0, 12.0, 14.0], vec![3.0, 4.0, 5.0]),
            make_player("b", vec![14.0, 12.0, 10.0], vec![5.0, 4.0, 3.0]),
            make_player("c", vec![10.0, 14.0, 12.0], vec![4.0, 5.0, 3.0]),
        ];
        let matrix = build_matrix(&players, &metric_names()).unwrap();

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix[i].len(), 3);
            assert!(
                (matrix[i][i] - 1.0).abs() < 1e-9,
                "diagonal must be 1.0, got {}",
                matrix[i][i]
            );
            for j in 0..3 {
                assert!(
                    (matrix[i][j] - matrix[j][i]).abs() < 1e-12,
                    "matrix must be symmetric at ({i},{j})"
                );
            }
        }
    }

    #[test]
    fn test_matrix_needs_two_players() {
        let solo = vec![make_player("a", vec![1.0, 2.0], vec![1.0, 2.0])];
        assert_eq!(
            build_matrix(&solo, &metric_names()),
            Err(AnalysisError::InsufficientEntities {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_missing_metric_fails() {
        let players = vec![
            PlayerMetrics::new("a").with_metric("points", vec![1.0, 2.0]),
            PlayerMetrics::new("b").with_metric("rebounds", vec![1.0, 2.0]),
        ];
        assert!(matches!(
            build_matrix(&players, &["points".to_string()]),
            Err(AnalysisError::UnsupportedParameter(_))
        ));
    }

    #[test]
    fn test_find_significant_upper_triangle_only() {
        let matrix = vec![
            vec![1.0, 0.9, -0.7],
            vec![0.9, 1.0, 0.3],
            vec![-0.7, 0.3, 1.0],
        ];
        let pairs = find_significant(&matrix, SIGNIFICANCE_THRESHOLD);

        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].row, pairs[0].col), (0, 1));
        assert_eq!(pairs[0].strength, CorrelationStrength::VeryStrong);
        assert_eq!((pairs[1].row, pairs[1].col), (0, 2));
        assert_eq!(pairs[1].strength, CorrelationStrength::Strong);
    }

    #[test]
    fn test_describe_names_players() {
        let players = vec![
            make_player("curry", vec![1.0, 2.0], vec![1.0, 2.0]),
            make_player("thompson", vec![1.0, 2.0], vec![1.0, 2.0]),
        ];
        let pairs = vec![CorrelationPair {
            row: 0,
            col: 1,
            coefficient: 0.92,
            strength: CorrelationStrength::VeryStrong,
        }];
        let lines = describe(&pairs, &players);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("curry") && lines[0].contains("thompson"));
        assert!(lines[0].contains("very strong"));
    }
}
