//! Per-route HTML views.
//!
//! Each view takes the page's loaded state, runs the payloads through the
//! transformers and lays the records out with the components kit. A page in
//! the error state renders its banner and nothing else.

use crate::api::types::{
    DatasetSummary, EQUIPMENT_OPTIONS, LOCATION_OPTIONS, MetricsSummary, PredictionInput,
    VisualizationData,
};
use crate::pages::PageState;
use crate::pages::dataset::feature_counts;
use crate::pages::overview::OverviewData;
use crate::pages::predictions::{PredictionForm, ResultView};
use crate::pages::settings::{REFRESH_INTERVAL_RANGE, SAVED_MESSAGE, SettingsForm, THEMES};
use crate::pages::visualizations::VisualizationsData;
use crate::transform::format::{format_count, format_ratio_pct};
use crate::transform::{
    self, CorrelationStrength, chart_color, correlation_color, strip_feature_prefix,
};

use super::components::{
    Bar, Series, Trend, bar_chart, chart_container, empty_state, error_banner, escape,
    line_chart, loading, share_chart, stats_card,
};
use super::layout::{Route, render_shell};

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(state: &PageState<OverviewData>) -> String {
    let body = match state {
        PageState::Loading => loading("Loading dashboard data..."),
        PageState::Error(msg) => error_banner(Some("API Connection Error"), msg, None),
        PageState::Ready(data) => overview_ready(data),
    };
    render_shell(Some(Route::Overview), "Dashboard", &body)
}

fn overview_ready(data: &OverviewData) -> String {
    let (status_class, status_text) = if data.api_online {
        ("online", "Connected")
    } else {
        ("offline", "Disconnected")
    };
    let status = format!(
        r#"<div class="card status {status_class}"><span class="dot"></span>API Status: <strong>{status_text}</strong></div>"#
    );

    let pct = |f: fn(&MetricsSummary) -> f64| {
        data.metrics
            .as_ref()
            .map(|m| format_ratio_pct(f(m)))
            .unwrap_or_else(|| "N/A".to_string())
    };
    let cards = [
        stats_card(
            "Model Accuracy",
            &pct(|m| m.accuracy),
            None,
            Some((Trend::Up, "2.5% from previous model")),
        ),
        stats_card("Prediction Confidence", &pct(|m| m.precision), None, None),
        stats_card("Fault Detection Rate", &pct(|m| m.recall), None, None),
        stats_card("F1 Score", &pct(|m| m.f1_score), None, None),
    ]
    .concat();

    let metric_bars: Vec<Bar> = transform::prepare_metrics_data(data.metrics.as_ref())
        .into_iter()
        .map(|r| Bar {
            label: r.name.to_string(),
            display: format!("{:.4}", r.value),
            value: r.value,
            color: "#8884d8",
        })
        .collect();

    let importance_bars: Vec<Bar> =
        transform::prepare_feature_importance_data(Some(&data.feature_importance))
            .into_iter()
            .map(|r| Bar {
                display: format!("{:.4}", r.importance),
                value: r.importance,
                label: r.name,
                color: "#82ca9d",
            })
            .collect();

    let equipment_bars: Vec<Bar> =
        transform::prepare_fault_by_equipment_data(Some(&data.fault_distribution))
            .into_iter()
            .map(|r| Bar {
                display: format!("{:.2}%", r.fault_rate),
                value: r.fault_rate,
                label: r.name,
                color: "#ff7300",
            })
            .collect();

    let location_slices: Vec<(String, f64)> =
        transform::prepare_fault_by_location_data(Some(&data.fault_distribution))
            .into_iter()
            .map(|r| (r.name, r.fault_rate))
            .collect();

    format!(
        r#"{status}<div class="stats-grid">{cards}</div><div class="grid-2">{}{}</div><div class="grid-2">{}{}</div>"#,
        chart_container(
            "Model Performance Metrics",
            None,
            &bar_chart(&metric_bars, Some(1.0))
        ),
        chart_container(
            "Top Feature Importance",
            Some("Most influential factors in predictions"),
            &bar_chart(&importance_bars, None)
        ),
        chart_container(
            "Fault Rate by Equipment Type",
            None,
            &bar_chart(&equipment_bars, None)
        ),
        chart_container(
            "Fault Rate by Location",
            None,
            &share_chart(&location_slices)
        ),
    )
}

// ---------------------------------------------------------------------------
// Visualizations
// ---------------------------------------------------------------------------

pub fn visualizations(state: &PageState<VisualizationsData>) -> String {
    let body = match state {
        PageState::Loading => loading("Loading visualization data..."),
        PageState::Error(msg) => error_banner(None, msg, Some(Route::Visualizations.path())),
        PageState::Ready(data) => visualizations_ready(data),
    };
    render_shell(Some(Route::Visualizations), "Visualizations", &body)
}

fn visualizations_ready(data: &VisualizationsData) -> String {
    format!(
        r#"<div class="tabs">
<input type="radio" name="tab" id="tab-correlations" checked>
<input type="radio" name="tab" id="tab-distributions">
<input type="radio" name="tab" id="tab-performance">
<label for="tab-correlations">Feature Correlations</label>
<label for="tab-distributions">Feature Distributions</label>
<label for="tab-performance">Performance Analysis</label>
<div class="panel panel-correlations">{}</div>
<div class="panel panel-distributions">{}</div>
<div class="panel panel-performance">{}</div>
</div>"#,
        correlation_panel(data),
        distributions_panel(data),
        performance_panel(&data.curves),
    )
}

fn correlation_panel(data: &VisualizationsData) -> String {
    let rows = transform::prepare_correlation_rows(Some(&data.correlation));
    let body = if rows.is_empty() {
        empty_state("No correlation data available")
    } else {
        let names: Vec<String> = rows
            .iter()
            .map(|r| escape(&strip_feature_prefix(&r.feature)))
            .collect();
        let header: String = names.iter().map(|n| format!("<th>{n}</th>")).collect();
        let body_rows: String = rows
            .iter()
            .zip(&names)
            .map(|(row, row_name)| {
                let cells: String = row
                    .cells
                    .iter()
                    .zip(&names)
                    .map(|(cell, col_name)| match cell {
                        Some(v) => format!(
                            r#"<td class="cell" style="background:{}" title="{row_name} - {col_name}: {v:.4}">{v:.2}</td>"#,
                            correlation_color(*v)
                        ),
                        None => r#"<td class="cell"></td>"#.to_string(),
                    })
                    .collect();
                format!("<tr><th>{row_name}</th>{cells}</tr>")
            })
            .collect();
        let legend: String = CorrelationStrength::ALL
            .iter()
            .map(|s| {
                format!(
                    r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
                    s.color(),
                    s.label()
                )
            })
            .collect();
        format!(
            r#"<div class="heatmap"><table><thead><tr><th>Feature</th>{header}</tr></thead><tbody>{body_rows}</tbody></table></div><ul class="legend">{legend}</ul>"#
        )
    };
    chart_container(
        "Feature Correlation Heatmap",
        Some("Visualizing relationships between different features"),
        &body,
    )
}

fn distributions_panel(data: &VisualizationsData) -> String {
    let charts: String = data
        .charted_features()
        .map(|feature| {
            let bins = transform::prepare_feature_distribution_data(Some(&data.distributions), feature);
            let count_bars: Vec<Bar> = bins
                .iter()
                .map(|b| Bar {
                    label: b.range.clone(),
                    value: b.count as f64,
                    display: format!("{} · {:.1}%", b.count, b.fault_rate),
                    color: "#8884d8",
                })
                .collect();
            chart_container(
                &format!("{} Distribution", strip_feature_prefix(feature)),
                Some("Count per range · fault rate (%)"),
                &bar_chart(&count_bars, None),
            )
        })
        .collect();
    if charts.is_empty() {
        return empty_state("No distribution data available");
    }
    format!(r#"<div class="grid-2">{charts}</div>"#)
}

fn performance_panel(curves: &VisualizationData) -> String {
    let roc = line_chart(
        &[
            Series {
                name: "ROC Curve",
                color: "#8884d8",
                dashed: false,
                points: curves.roc_curve.iter().map(|p| (p.fpr, p.tpr)).collect(),
            },
            Series {
                name: "Baseline",
                color: "#82ca9d",
                dashed: true,
                points: curves.roc_curve.iter().map(|p| (p.fpr, p.baseline)).collect(),
            },
        ],
        "False Positive Rate",
        "True Positive Rate",
    );
    let pr = line_chart(
        &[
            Series {
                name: "PR Curve",
                color: "#ff7300",
                dashed: false,
                points: curves.pr_curve.iter().map(|p| (p.recall, p.precision)).collect(),
            },
            Series {
                name: "Baseline",
                color: "#82ca9d",
                dashed: true,
                points: curves.pr_curve.iter().map(|p| (p.recall, p.baseline)).collect(),
            },
        ],
        "Recall",
        "Precision",
    );
    let score = |label: &str, value: Option<f64>| {
        value
            .map(|v| format!(r#"<div class="curve-score">{label}: <strong>{v:.4}</strong></div>"#))
            .unwrap_or_default()
    };
    format!(
        r#"<div class="grid-2">{}{}</div>"#,
        chart_container("ROC Curve", None, &(roc + &score("AUC Score", curves.auc))),
        chart_container(
            "Precision-Recall Curve",
            None,
            &(pr + &score("Average Precision", curves.average_precision))
        ),
    )
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

pub fn dataset(state: &PageState<DatasetSummary>) -> String {
    let body = match state {
        PageState::Loading => loading("Loading dataset information..."),
        PageState::Error(msg) => error_banner(None, msg, None),
        PageState::Ready(summary) => dataset_ready(summary),
    };
    render_shell(Some(Route::Dataset), "Dataset", &body)
}

fn dataset_ready(summary: &DatasetSummary) -> String {
    let total = summary.total_records.unwrap_or(0);
    let (numerical, categorical) = feature_counts(summary);
    let fault_rate = transform::fault_rate_pct(Some(summary))
        .map(|p| format!("{p:.2}%"))
        .unwrap_or_else(|| "N/A".to_string());

    let header = format!(
        r#"<section class="card"><h2>Dataset Overview</h2><p class="description">Equipment maintenance and fault prediction dataset</p><p class="description">{} records • {numerical} numerical features • {categorical} categorical features</p><a class="btn btn-outline" href="/dataset/export.csv">Export CSV</a></section>"#,
        format_count(total)
    );
    let cards = [
        stats_card("Total Records", &format_count(total), None, None),
        stats_card("Features", &(numerical + categorical).to_string(), None, None),
        stats_card("Fault Rate", &fault_rate, None, None),
    ]
    .concat();

    let class_slices: Vec<(String, f64)> = transform::prepare_class_distribution_data(Some(summary))
        .into_iter()
        .map(|r| (r.name.to_string(), r.value as f64))
        .collect();

    let numerical_rows: String = transform::prepare_numerical_summary(Some(summary))
        .iter()
        .map(|r| {
            format!(
                r#"<tr><td>{}</td><td class="num">{:.2}</td><td class="num">{:.2}</td><td class="num">{:.2}</td><td class="num">{:.2}</td><td class="num">{:.2}</td></tr>"#,
                escape(&r.name),
                r.min,
                r.max,
                r.mean,
                r.median,
                r.std
            )
        })
        .collect();
    let numerical_table = if numerical_rows.is_empty() {
        empty_state("No numerical features")
    } else {
        format!(
            "<table><thead><tr><th>Feature</th><th>Min</th><th>Max</th><th>Mean</th><th>Median</th><th>Std Dev</th></tr></thead><tbody>{numerical_rows}</tbody></table>"
        )
    };

    let categorical_bars: Vec<Bar> = transform::prepare_categorical_summary(Some(summary))
        .into_iter()
        .enumerate()
        .map(|(i, c)| Bar {
            label: format!("{} · {}", c.feature, c.category),
            value: c.count as f64,
            display: format_count(c.count),
            color: chart_color(i),
        })
        .collect();

    format!(
        r#"{header}<div class="stats-grid">{cards}</div><div class="grid-2">{}{}</div>{}"#,
        chart_container(
            "Class Distribution",
            Some("Distribution of normal vs. fault records in the dataset"),
            &share_chart(&class_slices)
        ),
        chart_container(
            "Numerical Features Summary",
            Some("Statistical summary of numerical features"),
            &numerical_table
        ),
        chart_container(
            "Categorical Features Distribution",
            Some("Distribution of values in categorical features"),
            &bar_chart(&categorical_bars, None)
        ),
    )
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

pub fn predictions(form: &PredictionForm) -> String {
    let banner = form
        .error
        .map(|msg| error_banner(None, msg, None))
        .unwrap_or_default();
    let result = form
        .result
        .as_ref()
        .map(|r| chart_container("Prediction Result", None, &prediction_result(&ResultView::from_result(r))))
        .unwrap_or_default();
    let body = format!(
        "{banner}{}{result}",
        chart_container(
            "Input Parameters",
            Some("Enter equipment parameters to predict potential faults"),
            &prediction_inputs(&form.input)
        )
    );
    render_shell(Some(Route::Predictions), "Equipment Fault Prediction", &body)
}

/// Value attribute of a numeric input; NaN renders empty like a cleared field.
fn number_value(v: f64) -> String {
    if v.is_finite() { v.to_string() } else { String::new() }
}

fn select_options(options: &[&str], selected: &str) -> String {
    options
        .iter()
        .map(|opt| {
            let sel = if *opt == selected { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{sel}>{0}</option>"#,
                escape(opt)
            )
        })
        .collect()
}

fn prediction_inputs(input: &PredictionInput) -> String {
    let number = |name: &str, label: &str, value: f64| {
        format!(
            r#"<div class="field"><label for="{name}">{label}:</label><input type="number" step="0.01" id="{name}" name="{name}" value="{}" required></div>"#,
            number_value(value)
        )
    };
    format!(
        r#"<form method="post" action="/predictions" class="grid-form">{}{}{}{}<div class="field"><label for="equipment">Equipment Type:</label><select id="equipment" name="equipment" required>{}</select></div><div class="field"><label for="location">Location:</label><select id="location" name="location" required>{}</select></div><div class="full"><button type="submit" class="btn btn-block">Run Prediction</button></div></form>"#,
        number("temperature", "Temperature (°C)", input.temperature),
        number("pressure", "Pressure", input.pressure),
        number("vibration", "Vibration (mm/s)", input.vibration),
        number("humidity", "Humidity (%)", input.humidity),
        select_options(&EQUIPMENT_OPTIONS, &input.equipment),
        select_options(&LOCATION_OPTIONS, &input.location),
    )
}

fn prediction_result(view: &ResultView) -> String {
    let outcome = match view {
        ResultView::ModelError(err) => {
            return format!(r#"<div class="banner error">⚠ {}</div>"#, escape(err));
        }
        ResultView::Outcome(o) => o,
    };
    let (class, icon) = if outcome.fault { ("fault", "⚠") } else { ("normal", "✓") };
    let confidence_pct = outcome.confidence * 100.0;
    format!(
        r#"<div class="outcome {class}"><div class="badge">{icon}</div><div><h3>Equipment Status: <span class="label">{}</span></h3><p>{}</p></div></div>
<h4>Confidence Level:</h4><div class="confidence {class}"><div class="fill" style="width:{confidence_pct:.2}%">{confidence_pct:.2}%</div></div>
<h4>Detailed Probability:</h4><div class="probabilities"><div><p>Fault Probability:</p><p class="fault">{:.2}%</p></div><div><p>Normal Operation Probability:</p><p class="normal">{:.2}%</p></div></div>
<h4>Recommendation:</h4><p>{}</p>"#,
        escape(&outcome.label),
        outcome.summary,
        outcome.fault_probability * 100.0,
        outcome.normal_probability * 100.0,
        outcome.recommendation,
    )
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn settings(form: &SettingsForm) -> String {
    let banner = if form.saved {
        format!(r#"<div class="banner success">{SAVED_MESSAGE}</div>"#)
    } else {
        String::new()
    };
    let checked = |on: bool| if on { " checked" } else { "" };
    let themes: String = THEMES
        .iter()
        .map(|(value, label)| {
            let sel = if *value == form.theme { " selected" } else { "" };
            format!(r#"<option value="{value}"{sel}>{label}</option>"#)
        })
        .collect();
    let (min, max) = REFRESH_INTERVAL_RANGE;

    let api = format!(
        r#"<div class="field full"><label for="api_url">API Base URL</label><input type="text" id="api_url" name="api_url" value="{}" placeholder="Enter API URL"><p class="hint">The base URL for your prediction API.</p></div>"#,
        escape(&form.api_url)
    );
    let prefs = format!(
        r#"<div class="field"><label><input type="checkbox" name="auto_refresh"{}> Auto-refresh Dashboard</label><p class="hint">Automatically refresh dashboard data at set intervals</p></div>
<div class="field"><label for="refresh_interval">Refresh Interval (seconds)</label><input type="number" id="refresh_interval" name="refresh_interval" min="{min}" max="{max}" value="{}"></div>
<div class="field"><label><input type="checkbox" name="notifications"{}> Prediction Alerts</label><p class="hint">Receive alerts for high-risk equipment fault predictions</p></div>
<div class="field"><label for="theme">Theme Preference</label><select id="theme" name="theme">{themes}</select></div>"#,
        checked(form.auto_refresh),
        form.refresh_interval,
        checked(form.notifications),
    );
    let body = format!(
        r#"{banner}<form method="post" action="/settings">{}{}<div class="full"><a class="btn btn-outline" href="/settings">Reset to Defaults</a> <button type="submit" class="btn">Save Settings</button></div></form>"#,
        chart_container("API Configuration", None, &format!(r#"<div class="grid-form">{api}</div>"#)),
        chart_container("Dashboard Preferences", None, &format!(r#"<div class="grid-form">{prefs}</div>"#)),
    );
    render_shell(Some(Route::Settings), "Dashboard Settings", &body)
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

pub fn not_found(path: &str) -> String {
    let body = format!(
        r#"<section class="card"><h2>404</h2><p class="description">Oops! Page not found: <code>{}</code></p><a class="btn" href="/">Return to Home</a></section>"#,
        escape(path)
    );
    render_shell(None, "Not Found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_numbers_render_empty() {
        assert_eq!(number_value(f64::NAN), "");
        assert_eq!(number_value(85.5), "85.5");
        assert_eq!(number_value(-3.0), "-3");
    }

    #[test]
    fn loading_state_renders_spinner_only() {
        let html = dataset(&PageState::Loading);
        assert!(html.contains("Loading dataset information..."));
        assert!(!html.contains("Dataset Overview"));
    }

    #[test]
    fn selected_option_is_marked_once() {
        let html = select_options(&LOCATION_OPTIONS, "San Francisco");
        assert_eq!(html.matches(" selected").count(), 1);
        assert!(html.contains(r#"<option value="San Francisco" selected>"#));
    }
}
