/// Correlation heatmap support: the color scale and the grid reshaping.
use serde::Serialize;

use crate::api::types::CorrelationMatrix;

/// Strength bucket of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrength {
    StrongPositive,
    ModeratePositive,
    WeakPositive,
    Negligible,
    WeakNegative,
    ModerateNegative,
    StrongNegative,
}

impl CorrelationStrength {
    /// Heatmap cell color.
    pub fn color(self) -> &'static str {
        match self {
            Self::StrongPositive => "#ef4444",
            Self::ModeratePositive => "#f97316",
            Self::WeakPositive => "#84cc16",
            Self::Negligible => "#d1d5db",
            Self::WeakNegative => "#06b6d4",
            Self::ModerateNegative => "#3b82f6",
            Self::StrongNegative => "#8b5cf6",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Self::StrongPositive => "Strong positive",
            Self::ModeratePositive => "Moderate positive",
            Self::WeakPositive => "Weak positive",
            Self::Negligible => "Negligible",
            Self::WeakNegative => "Weak negative",
            Self::ModerateNegative => "Moderate negative",
            Self::StrongNegative => "Strong negative",
        }
    }

    /// All buckets, strongest positive first.
    pub const ALL: [CorrelationStrength; 7] = [
        Self::StrongPositive,
        Self::ModeratePositive,
        Self::WeakPositive,
        Self::Negligible,
        Self::WeakNegative,
        Self::ModerateNegative,
        Self::StrongNegative,
    ];
}

/// Classify a coefficient in `[-1, 1]`.
///
/// Positive thresholds are inclusive lower bounds (`0.7` is strong), the
/// negative ones are exclusive (`-0.1` is already weak negative). Total over
/// all `f64`: NaN falls through to strong negative.
pub fn correlation_strength(value: f64) -> CorrelationStrength {
    if value >= 0.7 {
        CorrelationStrength::StrongPositive
    } else if value >= 0.4 {
        CorrelationStrength::ModeratePositive
    } else if value >= 0.1 {
        CorrelationStrength::WeakPositive
    } else if value > -0.1 {
        CorrelationStrength::Negligible
    } else if value > -0.4 {
        CorrelationStrength::WeakNegative
    } else if value > -0.7 {
        CorrelationStrength::ModerateNegative
    } else {
        CorrelationStrength::StrongNegative
    }
}

/// Heatmap color for a coefficient.
pub fn correlation_color(value: f64) -> &'static str {
    correlation_strength(value).color()
}

/// One heatmap row: a feature and its coefficient against every feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub feature: String,
    /// `None` where the matrix has no entry for that column.
    pub cells: Vec<Option<f64>>,
}

/// Reshape the matrix payload into rows keyed by feature.
///
/// The row count follows `features`; a matrix shorter or narrower than the
/// feature list yields `None` cells instead of failing.
pub fn prepare_correlation_rows(corr: Option<&CorrelationMatrix>) -> Vec<CorrelationRow> {
    let Some(corr) = corr else {
        return Vec::new();
    };
    let (Some(features), Some(matrix)) = (&corr.features, &corr.matrix) else {
        return Vec::new();
    };

    features
        .iter()
        .enumerate()
        .map(|(i, feature)| CorrelationRow {
            feature: feature.clone(),
            cells: (0..features.len())
                .map(|j| matrix.get(i).and_then(|row| row.get(j)).copied())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_values() {
        assert_eq!(correlation_strength(0.75), CorrelationStrength::StrongPositive);
        assert_eq!(correlation_strength(0.5), CorrelationStrength::ModeratePositive);
        assert_eq!(correlation_strength(0.2), CorrelationStrength::WeakPositive);
        assert_eq!(correlation_strength(0.0), CorrelationStrength::Negligible);
        assert_eq!(correlation_strength(-0.2), CorrelationStrength::WeakNegative);
        assert_eq!(correlation_strength(-0.5), CorrelationStrength::ModerateNegative);
        assert_eq!(correlation_strength(-0.9), CorrelationStrength::StrongNegative);
    }

    #[test]
    fn boundary_values() {
        assert_eq!(correlation_strength(0.7), CorrelationStrength::StrongPositive);
        assert_eq!(correlation_strength(0.4), CorrelationStrength::ModeratePositive);
        assert_eq!(correlation_strength(0.1), CorrelationStrength::WeakPositive);
        assert_eq!(correlation_strength(-0.1), CorrelationStrength::WeakNegative);
        assert_eq!(correlation_strength(-0.4), CorrelationStrength::ModerateNegative);
        assert_eq!(correlation_strength(-0.7), CorrelationStrength::StrongNegative);
    }

    #[test]
    fn extremes_and_nan() {
        assert_eq!(correlation_color(1.0), "#ef4444");
        assert_eq!(correlation_color(-1.0), "#8b5cf6");
        assert_eq!(correlation_strength(f64::NAN), CorrelationStrength::StrongNegative);
    }

    #[test]
    fn rows_follow_feature_order() {
        let corr = CorrelationMatrix {
            features: Some(vec!["a".into(), "b".into()]),
            matrix: Some(vec![vec![1.0, 0.3], vec![0.3, 1.0]]),
        };
        let rows = prepare_correlation_rows(Some(&corr));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].feature, "b");
        assert_eq!(rows[1].cells, vec![Some(0.3), Some(1.0)]);
    }

    #[test]
    fn ragged_matrix_yields_empty_cells() {
        let corr = CorrelationMatrix {
            features: Some(vec!["a".into(), "b".into()]),
            matrix: Some(vec![vec![1.0]]),
        };
        let rows = prepare_correlation_rows(Some(&corr));
        assert_eq!(rows[0].cells, vec![Some(1.0), None]);
        assert_eq!(rows[1].cells, vec![None, None]);
    }

    #[test]
    fn missing_sections_yield_nothing() {
        assert!(prepare_correlation_rows(None).is_empty());
        let corr = CorrelationMatrix {
            features: Some(vec!["a".into()]),
            matrix: None,
        };
        assert!(prepare_correlation_rows(Some(&corr)).is_empty());
    }
}
