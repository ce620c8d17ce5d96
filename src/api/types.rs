/// Wire types for the prediction API.
///
/// Every payload is decoded leniently: sections the dashboard can live
/// without are `Option` or `#[serde(default)]`, so an absent section reaches
/// the transformers as "nothing to chart" instead of failing the fetch.
/// Objects keyed by feature or category name decode into [`Ordered`], which
/// keeps the backend's key order.
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Ordered mapping
// ---------------------------------------------------------------------------

/// A JSON object decoded as `(key, value)` pairs in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<V>(pub Vec<(String, V)>);

impl<V> Ordered<V> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> FromIterator<(String, V)> for Ordered<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for Ordered<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, V>()? {
                    entries.push((k, v));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

// ---------------------------------------------------------------------------
// GET endpoints
// ---------------------------------------------------------------------------

/// `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

impl HealthStatus {
    pub fn is_online(&self) -> bool {
        self.status == "ok"
    }
}

/// `GET /metrics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    #[serde(default)]
    pub metrics: Option<MetricsSummary>,
}

/// Classifier evaluation scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// `GET /feature-importance`: parallel name / value arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub importance: Vec<f64>,
}

/// `GET /fault-distribution`: fault rates in `[0, 1]` per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultDistribution {
    #[serde(default)]
    pub by_equipment: Option<Ordered<f64>>,
    #[serde(default)]
    pub by_location: Option<Ordered<f64>>,
}

/// One point of the ROC curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
    #[serde(default)]
    pub baseline: f64,
}

/// One point of the precision-recall curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrPoint {
    pub recall: f64,
    pub precision: f64,
    #[serde(default)]
    pub baseline: f64,
}

/// `GET /visualization-data`: precomputed evaluation curves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    #[serde(default)]
    pub roc_curve: Vec<RocPoint>,
    #[serde(default)]
    pub auc: Option<f64>,
    #[serde(default)]
    pub pr_curve: Vec<PrPoint>,
    #[serde(default)]
    pub average_precision: Option<f64>,
}

/// `GET /correlation-matrix`
///
/// The matrix is expected to be `features.len()` square. Shape is not
/// checked on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub matrix: Option<Vec<Vec<f64>>>,
}

/// A histogram bin of one feature, with the fault rate of its records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionBin {
    pub count: u64,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub fault_rate: f64,
}

/// `GET /feature-distributions`: feature name → bins.
pub type FeatureDistributions = Ordered<Vec<DistributionBin>>;

/// Descriptive statistics of a numerical feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericalStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// `GET /dataset-summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub total_records: Option<u64>,
    /// Binary class label (`"0"` / `"1"`) → record count.
    #[serde(default)]
    pub class_distribution: Option<Ordered<u64>>,
    #[serde(default)]
    pub numerical_features: Option<Ordered<NumericalStats>>,
    /// Feature → category → record count.
    #[serde(default)]
    pub categorical_features: Option<Ordered<Ordered<u64>>>,
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Equipment types offered by the prediction form.
pub const EQUIPMENT_OPTIONS: [&str; 5] = ["Compressor", "Turbine", "Pump", "Valve", "Other"];

/// Locations offered by the prediction form.
pub const LOCATION_OPTIONS: [&str; 6] = [
    "Atlanta",
    "Chicago",
    "San Francisco",
    "New York",
    "Dallas",
    "Other",
];

/// Body of `POST /predict`, also returned by `GET /sample`.
///
/// Non-finite readings serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub temperature: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub humidity: f64,
    pub equipment: String,
    pub location: String,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            temperature: 85.5,
            pressure: 42.3,
            vibration: 2.1,
            humidity: 65.7,
            equipment: "Turbine".to_string(),
            location: "Chicago".to_string(),
        }
    }
}

/// Class probabilities reported alongside a prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    #[serde(default)]
    pub faulty: Option<f64>,
    #[serde(default)]
    pub normal: Option<f64>,
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// `1` for a fault, `0` for normal operation.
    #[serde(default)]
    pub prediction: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<ClassProbability>,
    /// Model-side failure reported inside a successful response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResult {
    pub fn is_fault(&self) -> bool {
        self.prediction == 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
