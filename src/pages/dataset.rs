//! Dataset (`/dataset`): record counts, class balance and per-feature
//! summaries of the training data.

use crate::api::PredictionApi;
use crate::api::types::DatasetSummary;
use crate::transform;

use super::PageState;

pub const ERROR_MESSAGE: &str =
    "Failed to load dataset summary. Please make sure the API is running.";

pub fn load(api: &dyn PredictionApi) -> PageState<DatasetSummary> {
    PageState::mount("dataset", ERROR_MESSAGE, || api.dataset_summary())
}

/// Number of numerical and categorical features described by the summary.
pub fn feature_counts(summary: &DatasetSummary) -> (usize, usize) {
    (
        summary.numerical_features.as_ref().map_or(0, |f| f.len()),
        summary.categorical_features.as_ref().map_or(0, |f| f.len()),
    )
}

/// Numerical summary as CSV, one row per feature in payload order.
pub fn export_csv(summary: &DatasetSummary) -> String {
    let mut out = String::from("feature,min,max,mean,median,std\n");
    for row in transform::prepare_numerical_summary(Some(summary)) {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&row.name),
            row.min,
            row.max,
            row.mean,
            row.median,
            row.std
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{NumericalStats, Ordered};

    fn stats(min: f64, max: f64) -> NumericalStats {
        NumericalStats {
            min,
            max,
            mean: (min + max) / 2.0,
            median: (min + max) / 2.0,
            std: 1.5,
        }
    }

    #[test]
    fn counts_features_by_kind() {
        let summary = DatasetSummary {
            numerical_features: Some(
                vec![("temperature".to_string(), stats(10.0, 90.0))]
                    .into_iter()
                    .collect(),
            ),
            categorical_features: Some(
                vec![
                    ("equipment".to_string(), Ordered::default()),
                    ("location".to_string(), Ordered::default()),
                ]
                .into_iter()
                .collect(),
            ),
            ..Default::default()
        };
        assert_eq!(feature_counts(&summary), (1, 2));
        assert_eq!(feature_counts(&DatasetSummary::default()), (0, 0));
    }

    #[test]
    fn export_keeps_payload_order_and_quotes_names() {
        let summary = DatasetSummary {
            numerical_features: Some(
                vec![
                    ("vibration".to_string(), stats(0.5, 4.5)),
                    ("odd, name".to_string(), stats(1.0, 3.0)),
                ]
                .into_iter()
                .collect(),
            ),
            ..Default::default()
        };
        let csv = export_csv(&summary);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "feature,min,max,mean,median,std");
        assert_eq!(lines[1], "vibration,0.5,4.5,2.5,2.5,1.5");
        assert_eq!(lines[2], "\"odd, name\",1,3,2,2,1.5");
    }

    #[test]
    fn export_of_empty_summary_is_header_only() {
        assert_eq!(
            export_csv(&DatasetSummary::default()),
            "feature,min,max,mean,median,std\n"
        );
    }
}
