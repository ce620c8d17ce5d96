//! Data transformers: raw API payloads → flat, chart-ready records.
//!
//! Every function here is pure and total. An absent payload (or an absent
//! section inside one) produces an empty sequence, never an error. Record
//! order is part of the contract: fixed for metrics, descending importance
//! for features, and the backend's key order for anything keyed by name.

pub mod correlation;
pub mod format;

use serde::Serialize;

use crate::api::types::{
    DatasetSummary, FaultDistribution, FeatureDistributions, FeatureImportance, MetricsSummary,
    Ordered,
};

pub use correlation::{
    CorrelationRow, CorrelationStrength, correlation_color, correlation_strength,
    prepare_correlation_rows,
};
pub use format::{format_feature_name, strip_feature_prefix};

/// Number of features kept by [`prepare_feature_importance_data`].
pub const TOP_FEATURES: usize = 10;

/// Series colors for categorical charts, cycled by index.
pub const CHART_COLORS: [&str; 10] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d", "#ffc658", "#8dd1e1",
    "#a4de6c", "#d0ed57",
];

/// Color of the `index`-th series.
pub fn chart_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A labelled score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub name: &'static str,
    pub value: f64,
}

/// A feature and its importance to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportanceRecord {
    pub name: String,
    pub importance: f64,
}

/// Fault rate of one category, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultRateRecord {
    pub name: String,
    pub fault_rate: f64,
}

/// Record count of one target class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDistributionRecord {
    pub name: &'static str,
    pub value: u64,
}

/// Record count of one category of one categorical feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalCount {
    pub feature: String,
    pub category: String,
    pub count: u64,
}

/// Descriptive statistics row of a numerical feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericalSummaryRow {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// One histogram bin with its fault rate as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBinRecord {
    pub bin: usize,
    pub count: u64,
    pub range: String,
    pub fault_rate: f64,
}

// ---------------------------------------------------------------------------
// Transformers
// ---------------------------------------------------------------------------

/// Metrics → `[Accuracy, Precision, Recall, F1 Score]`, values unchanged.
pub fn prepare_metrics_data(metrics: Option<&MetricsSummary>) -> Vec<MetricRecord> {
    let Some(m) = metrics else {
        return Vec::new();
    };
    vec![
        MetricRecord {
            name: "Accuracy",
            value: m.accuracy,
        },
        MetricRecord {
            name: "Precision",
            value: m.precision,
        },
        MetricRecord {
            name: "Recall",
            value: m.recall,
        },
        MetricRecord {
            name: "F1 Score",
            value: m.f1_score,
        },
    ]
}

/// Parallel name/importance arrays → top [`TOP_FEATURES`] records, most
/// important first.
///
/// Names go through [`format_feature_name`]. The sort is stable, so equal
/// importances keep their payload order. Pairs are zipped: a name without a
/// matching importance value is dropped.
pub fn prepare_feature_importance_data(
    payload: Option<&FeatureImportance>,
) -> Vec<FeatureImportanceRecord> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    let Some(names) = payload.features.as_ref() else {
        return Vec::new();
    };

    let mut records: Vec<FeatureImportanceRecord> = names
        .iter()
        .zip(payload.importance.iter())
        .map(|(name, &importance)| FeatureImportanceRecord {
            name: format_feature_name(name),
            importance,
        })
        .collect();

    records.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    records.truncate(TOP_FEATURES);
    records
}

fn fault_rates(rates: Option<&Ordered<f64>>) -> Vec<FaultRateRecord> {
    let Some(rates) = rates else {
        return Vec::new();
    };
    rates
        .iter()
        .map(|(name, &rate)| FaultRateRecord {
            name: name.to_string(),
            fault_rate: rate * 100.0,
        })
        .collect()
}

/// Fault rate per equipment type, as percentages in payload order.
pub fn prepare_fault_by_equipment_data(dist: Option<&FaultDistribution>) -> Vec<FaultRateRecord> {
    fault_rates(dist.and_then(|d| d.by_equipment.as_ref()))
}

/// Fault rate per location, as percentages in payload order.
pub fn prepare_fault_by_location_data(dist: Option<&FaultDistribution>) -> Vec<FaultRateRecord> {
    fault_rates(dist.and_then(|d| d.by_location.as_ref()))
}

/// Class counts: key `"0"` is "Normal", any other key is "Fault".
pub fn prepare_class_distribution_data(
    summary: Option<&DatasetSummary>,
) -> Vec<ClassDistributionRecord> {
    let Some(classes) = summary.and_then(|s| s.class_distribution.as_ref()) else {
        return Vec::new();
    };
    classes
        .iter()
        .map(|(key, &count)| ClassDistributionRecord {
            name: if key == "0" { "Normal" } else { "Fault" },
            value: count,
        })
        .collect()
}

/// Feature → category → count, flattened to triples in payload order.
pub fn prepare_categorical_summary(summary: Option<&DatasetSummary>) -> Vec<CategoricalCount> {
    let Some(features) = summary.and_then(|s| s.categorical_features.as_ref()) else {
        return Vec::new();
    };
    features
        .iter()
        .flat_map(|(feature, categories)| {
            categories.iter().map(move |(category, &count)| CategoricalCount {
                feature: feature.to_string(),
                category: category.to_string(),
                count,
            })
        })
        .collect()
}

/// One statistics row per numerical feature, in payload order.
pub fn prepare_numerical_summary(summary: Option<&DatasetSummary>) -> Vec<NumericalSummaryRow> {
    let Some(features) = summary.and_then(|s| s.numerical_features.as_ref()) else {
        return Vec::new();
    };
    features
        .iter()
        .map(|(name, stats)| NumericalSummaryRow {
            name: name.to_string(),
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std: stats.std,
        })
        .collect()
}

/// Histogram bins of one feature, fault rate scaled to a percentage.
pub fn prepare_feature_distribution_data(
    dists: Option<&FeatureDistributions>,
    feature: &str,
) -> Vec<DistributionBinRecord> {
    let Some(bins) = dists.and_then(|d| d.get(feature)) else {
        return Vec::new();
    };
    bins.iter()
        .enumerate()
        .map(|(bin, b)| DistributionBinRecord {
            bin,
            count: b.count,
            range: b.range.clone(),
            fault_rate: b.fault_rate * 100.0,
        })
        .collect()
}

/// Share of class `"1"` records in the dataset, as a percentage.
///
/// `None` when the class counts or the total are missing, or the total is
/// zero.
pub fn fault_rate_pct(summary: Option<&DatasetSummary>) -> Option<f64> {
    let summary = summary?;
    let faults = *summary.class_distribution.as_ref()?.get("1")?;
    let total = summary.total_records.filter(|&t| t > 0)?;
    Some(faults as f64 / total as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
