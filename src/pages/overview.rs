//! Overview (`/`): API status, headline metrics, feature importance and
//! fault rates per equipment type and location.

use crate::api::PredictionApi;
use crate::api::types::{FaultDistribution, FeatureImportance, MetricsSummary};

use super::PageState;

/// Everything the overview renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub api_online: bool,
    pub metrics: Option<MetricsSummary>,
    pub feature_importance: FeatureImportance,
    pub fault_distribution: FaultDistribution,
}

/// Message shown when any overview fetch fails.
pub fn error_message(base_url: &str) -> String {
    format!("Failed to load data. Please make sure the API is running at {base_url}")
}

/// Fetch health, metrics, feature importance and fault distribution, in that
/// order.
pub fn load(api: &dyn PredictionApi, base_url: &str) -> PageState<OverviewData> {
    PageState::mount("overview", error_message(base_url), || {
        let health = api.health()?;
        let metrics = api.metrics()?.metrics;
        let feature_importance = api.feature_importance()?;
        let fault_distribution = api.fault_distribution()?;
        Ok(OverviewData {
            api_online: health.is_online(),
            metrics,
            feature_importance,
            fault_distribution,
        })
    })
}
