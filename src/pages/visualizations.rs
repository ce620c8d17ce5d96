//! Visualizations (`/visualizations`): correlation heatmap, feature
//! distributions and the ROC / precision-recall curves.

use crate::api::PredictionApi;
use crate::api::types::{CorrelationMatrix, FeatureDistributions, VisualizationData};

use super::PageState;

pub const ERROR_MESSAGE: &str =
    "Failed to load visualization data. Please make sure the API is running.";

/// Number of features charted on the distributions tab.
pub const DISTRIBUTION_CHARTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationsData {
    pub curves: VisualizationData,
    pub correlation: CorrelationMatrix,
    pub distributions: FeatureDistributions,
}

impl VisualizationsData {
    /// Features shown on the distributions tab, in payload order.
    pub fn charted_features(&self) -> impl Iterator<Item = &str> {
        self.distributions.keys().take(DISTRIBUTION_CHARTS)
    }
}

/// Fetch the curves, the correlation matrix and the feature distributions,
/// in that order. Retrying is simply loading again.
pub fn load(api: &dyn PredictionApi) -> PageState<VisualizationsData> {
    PageState::mount("visualizations", ERROR_MESSAGE, || {
        let curves = api.visualization_data()?;
        let correlation = api.correlation_matrix()?;
        let distributions = api.feature_distributions()?;
        Ok(VisualizationsData {
            curves,
            correlation,
            distributions,
        })
    })
}
