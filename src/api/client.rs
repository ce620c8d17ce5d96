/// Synchronous HTTP client for the prediction API.
///
/// One method per backend endpoint, each a single request against the
/// configured base URL. There are no retries and no response caching. Any
/// failure (connection refused, non-2xx status, undecodable body) comes back
/// as one `anyhow::Error` naming the endpoint.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    CorrelationMatrix, DatasetSummary, FaultDistribution, FeatureDistributions,
    FeatureImportance, HealthStatus, MetricsResponse, PredictionInput, PredictionResult,
    VisualizationData,
};
use crate::config::schema::ApiConfig;

// ---------------------------------------------------------------------------
// Seam
// ---------------------------------------------------------------------------

/// The prediction backend as seen by the pages.
///
/// [`ApiClient`] talks HTTP; tests substitute a canned implementation.
pub trait PredictionApi {
    fn health(&self) -> Result<HealthStatus>;
    fn metrics(&self) -> Result<MetricsResponse>;
    fn feature_importance(&self) -> Result<FeatureImportance>;
    fn fault_distribution(&self) -> Result<FaultDistribution>;
    fn visualization_data(&self) -> Result<VisualizationData>;
    fn correlation_matrix(&self) -> Result<CorrelationMatrix>;
    fn feature_distributions(&self) -> Result<FeatureDistributions>;
    fn dataset_summary(&self) -> Result<DatasetSummary>;
    fn sample(&self) -> Result<PredictionInput>;
    fn predict(&self, input: &PredictionInput) -> Result<PredictionResult>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP implementation of [`PredictionApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Build a client from the resolved `[api]` config section.
    ///
    /// A `timeout_ms` of zero leaves requests unbounded.
    pub fn from_config(config: &ApiConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        let mut builder = ureq::AgentBuilder::new();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent: builder.build(),
        }
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self
            .agent
            .get(&url)
            .set("Content-Type", "application/json")
            .call()
            .with_context(|| format!("GET {path} failed"))?;
        resp.into_json()
            .with_context(|| format!("failed to decode response of GET {path}"))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self
            .agent
            .post(&url)
            .send_json(body)
            .with_context(|| format!("POST {path} failed"))?;
        resp.into_json()
            .with_context(|| format!("failed to decode response of POST {path}"))
    }
}

impl PredictionApi for ApiClient {
    fn health(&self) -> Result<HealthStatus> {
        self.get_json("/health")
    }

    fn metrics(&self) -> Result<MetricsResponse> {
        self.get_json("/metrics")
    }

    fn feature_importance(&self) -> Result<FeatureImportance> {
        self.get_json("/feature-importance")
    }

    fn fault_distribution(&self) -> Result<FaultDistribution> {
        self.get_json("/fault-distribution")
    }

    fn visualization_data(&self) -> Result<VisualizationData> {
        self.get_json("/visualization-data")
    }

    fn correlation_matrix(&self) -> Result<CorrelationMatrix> {
        self.get_json("/correlation-matrix")
    }

    fn feature_distributions(&self) -> Result<FeatureDistributions> {
        self.get_json("/feature-distributions")
    }

    fn dataset_summary(&self) -> Result<DatasetSummary> {
        self.get_json("/dataset-summary")
    }

    fn sample(&self) -> Result<PredictionInput> {
        self.get_json("/sample")
    }

    fn predict(&self, input: &PredictionInput) -> Result<PredictionResult> {
        self.post_json("/predict", input)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
