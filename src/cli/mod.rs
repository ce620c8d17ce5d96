//! CLI command implementations for equipred.
//!
//! Provides subcommand handlers for:
//! - `equipred serve`: run the web dashboard
//! - `equipred health`: check the prediction API
//! - `equipred metrics`: model performance metrics
//! - `equipred predict`: one prediction from the terminal
//! - `equipred config show|init|set|reset`: configuration management

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::types::{MetricsSummary, PredictionInput};
use crate::api::{ApiClient, PredictionApi};
use crate::config;
use crate::config::schema::DashboardConfig;
use crate::pages::predictions::ResultView;
use crate::transform;
use crate::web::{self, Dashboard};

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// equipred serve
// ---------------------------------------------------------------------------

/// Serve the dashboard, optionally on a different address than configured.
pub fn run_serve(config: &DashboardConfig, addr: Option<String>) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(addr) = addr {
        server.addr = addr;
    }
    let client = ApiClient::from_config(&config.api);
    let base_url = client.base_url().to_string();
    let dashboard = Dashboard::new(Box::new(client), base_url);
    web::serve(&dashboard, &server)
}

// ---------------------------------------------------------------------------
// equipred health
// ---------------------------------------------------------------------------

/// Check the prediction API and the effective configuration.
pub fn run_health(config: &DashboardConfig) -> Result<()> {
    println!("{}", "equipred Health Check".bold().cyan());
    println!("{}", "=".repeat(50));

    let client = ApiClient::from_config(&config.api);
    match client.health() {
        Ok(health) => print_health_item(
            "Prediction API",
            health.is_online(),
            &format!("{} (status: {})", client.base_url(), health.status),
        ),
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "health check failed");
            print_health_item(
                "Prediction API",
                false,
                &format!("{} unreachable", client.base_url()),
            );
        }
    }

    let timeout = if config.api.timeout_ms == 0 {
        "none".to_string()
    } else {
        format!("{}ms", config.api.timeout_ms)
    };
    print_health_item("Request timeout", true, &timeout);

    for source in config_sources() {
        print_health_item(
            source.label,
            source.exists,
            if source.exists {
                source.name
            } else {
                "not found"
            },
        );
    }
    print_health_item("Dashboard address", true, &config.server.addr);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<20} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// equipred metrics
// ---------------------------------------------------------------------------

/// Show the model's performance metrics.
pub fn run_metrics(config: &DashboardConfig, format: OutputFormat) -> Result<()> {
    let client = ApiClient::from_config(&config.api);
    let response = client
        .metrics()
        .with_context(|| format!("is the API running at {}?", client.base_url()))?;

    let Some(metrics) = response.metrics else {
        println!("{}", "The API reported no model metrics.".yellow());
        return Ok(());
    };

    match format {
        OutputFormat::Json => print_metrics_json(&metrics)?,
        OutputFormat::Csv => print!("{}", metrics_csv(&metrics)),
        OutputFormat::Table => print_metrics_table(&metrics),
    }

    Ok(())
}

fn print_metrics_table(metrics: &MetricsSummary) {
    println!("{}", "Model Performance Metrics".bold().cyan());
    println!("{}", "=".repeat(40));
    for (i, record) in transform::prepare_metrics_data(Some(metrics))
        .iter()
        .enumerate()
    {
        let line = format!(
            "  {:<12} {:>8.4} {:>10}",
            record.name,
            record.value,
            transform::format::format_ratio_pct(record.value)
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_metrics_json(metrics: &MetricsSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(metrics)?);
    Ok(())
}

fn metrics_csv(metrics: &MetricsSummary) -> String {
    let mut out = String::from("metric,value\n");
    for record in transform::prepare_metrics_data(Some(metrics)) {
        out.push_str(&format!("{},{}\n", record.name, record.value));
    }
    out
}

// ---------------------------------------------------------------------------
// equipred predict
// ---------------------------------------------------------------------------

/// Readings given on the command line; `None` means "use the sample".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictArgs {
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub vibration: Option<f64>,
    pub humidity: Option<f64>,
    pub equipment: Option<String>,
    pub location: Option<String>,
}

impl PredictArgs {
    fn is_complete(&self) -> bool {
        self.temperature.is_some()
            && self.pressure.is_some()
            && self.vibration.is_some()
            && self.humidity.is_some()
            && self.equipment.is_some()
            && self.location.is_some()
    }

    /// Fill `base` with every reading that was given.
    pub fn apply(self, base: PredictionInput) -> PredictionInput {
        PredictionInput {
            temperature: self.temperature.unwrap_or(base.temperature),
            pressure: self.pressure.unwrap_or(base.pressure),
            vibration: self.vibration.unwrap_or(base.vibration),
            humidity: self.humidity.unwrap_or(base.humidity),
            equipment: self.equipment.unwrap_or(base.equipment),
            location: self.location.unwrap_or(base.location),
        }
    }
}

/// Run one prediction and print the outcome.
pub fn run_predict(config: &DashboardConfig, args: PredictArgs) -> Result<()> {
    let client = ApiClient::from_config(&config.api);
    let input = resolve_input(&client, args)?;
    let result = client
        .predict(&input)
        .with_context(|| format!("is the API running at {}?", client.base_url()))?;

    println!("{}", "Equipment Fault Prediction".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {} {:.2}", "Temperature:".bold(), input.temperature);
    println!("  {} {:.2}", "Pressure:   ".bold(), input.pressure);
    println!("  {} {:.2}", "Vibration:  ".bold(), input.vibration);
    println!("  {} {:.2}", "Humidity:   ".bold(), input.humidity);
    println!("  {} {}", "Equipment:  ".bold(), input.equipment);
    println!("  {} {}", "Location:   ".bold(), input.location);
    println!();

    match ResultView::from_result(&result) {
        ResultView::ModelError(err) => {
            println!("{} {}", "Model error:".red().bold(), err);
        }
        ResultView::Outcome(outcome) => {
            let label = if outcome.fault {
                outcome.label.red().bold()
            } else {
                outcome.label.green().bold()
            };
            println!("  {} {}", "Status:     ".bold(), label);
            println!(
                "  {} {:.2}%",
                "Confidence: ".bold(),
                outcome.confidence * 100.0
            );
            println!(
                "  {} fault {:.2}% · normal {:.2}%",
                "Probability:".bold(),
                outcome.fault_probability * 100.0,
                outcome.normal_probability * 100.0
            );
            println!();
            println!("  {}", outcome.recommendation.dimmed());
        }
    }

    Ok(())
}

/// Complete the readings from the sample endpoint when any flag is missing.
fn resolve_input(api: &dyn PredictionApi, args: PredictArgs) -> Result<PredictionInput> {
    if args.is_complete() {
        return Ok(args.apply(PredictionInput::default()));
    }
    let sample = api
        .sample()
        .context("some readings were omitted and the sample could not be loaded")?;
    Ok(args.apply(sample))
}

// ---------------------------------------------------------------------------
// equipred config show | init | set | reset
// ---------------------------------------------------------------------------

/// One config file layer and whether it is present on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConfigSource {
    label: &'static str,
    name: &'static str,
    exists: bool,
}

/// The config file layers, lowest priority first.
fn config_sources() -> [ConfigSource; 2] {
    let exists = |path: Option<std::path::PathBuf>| path.map(|p| p.exists()).unwrap_or(false);
    [
        ConfigSource {
            label: "Global config",
            name: "~/.equipred/config.toml",
            exists: exists(config::global_config_file()),
        },
        ConfigSource {
            label: "Project config",
            name: ".equipred.toml",
            exists: exists(config::project_config_file()),
        },
    ]
}

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(effective: &DashboardConfig) -> Result<()> {
    let toml_str = config::show_effective_config(effective)?;
    println!("{}", "Effective equipred Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    for source in config_sources() {
        print_source(source.name, source.exists);
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "EQUIPRED_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.equipred/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to point at your prediction API.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_config_sources_cover_both_files() {
        let names: Vec<&str> = config_sources().iter().map(|s| s.name).collect();
        assert_eq!(names, ["~/.equipred/config.toml", ".equipred.toml"]);

        let project = config_sources()[1];
        let on_disk = config::project_config_file()
            .map(|p| p.exists())
            .unwrap_or(false);
        assert_eq!(project.exists, on_disk);
    }

    #[test]
    fn test_metrics_csv_order() {
        let metrics = MetricsSummary {
            accuracy: 0.9,
            precision: 0.8,
            recall: 0.7,
            f1_score: 0.75,
        };
        assert_eq!(
            metrics_csv(&metrics),
            "metric,value\nAccuracy,0.9\nPrecision,0.8\nRecall,0.7\nF1 Score,0.75\n"
        );
    }

    #[test]
    fn test_predict_args_fill_missing_from_base() {
        let args = PredictArgs {
            temperature: Some(99.0),
            location: Some("Dallas".to_string()),
            ..Default::default()
        };
        assert!(!args.is_complete());
        let input = args.apply(PredictionInput::default());
        assert_eq!(input.temperature, 99.0);
        assert_eq!(input.pressure, 42.3);
        assert_eq!(input.equipment, "Turbine");
        assert_eq!(input.location, "Dallas");
    }

    #[test]
    fn test_complete_args_skip_the_sample() {
        let args = PredictArgs {
            temperature: Some(1.0),
            pressure: Some(2.0),
            vibration: Some(3.0),
            humidity: Some(4.0),
            equipment: Some("Pump".to_string()),
            location: Some("Other".to_string()),
        };
        // Port 9 (discard) refuses connections; a sample fetch would fail.
        let client = ApiClient::from_config(&crate::config::schema::ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_ms: 500,
        });
        let input = resolve_input(&client, args).unwrap();
        assert_eq!(input.equipment, "Pump");
        assert_eq!(input.humidity, 4.0);
    }
}
