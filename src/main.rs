use anyhow::Result;
use clap::{Parser, Subcommand};

use equipred::{cli, config, logging};

#[derive(Debug, Parser)]
#[command(name = "equipred")]
#[command(about = "Equipment fault prediction dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the web dashboard
    Serve {
        /// Listen address (overrides `server.addr`)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Check whether the prediction API is reachable
    Health,
    /// Show the model's performance metrics
    Metrics {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Run one prediction; omitted readings come from the API's sample
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        temperature: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        pressure: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        vibration: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        humidity: Option<f64>,
        /// Equipment type, e.g. Turbine
        #[arg(long)]
        equipment: Option<String>,
        /// Site location, e.g. Chicago
        #[arg(long)]
        location: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config to ~/.equipred/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.base_url`
    Set { key: String, value: String },
    /// Restore the default global config
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let loaded = config::load();
    logging::init(&loaded.config.logging.level)?;
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }
    let config = loaded.config;

    match app.command {
        Commands::Serve { addr } => cli::run_serve(&config, addr),
        Commands::Health => cli::run_health(&config),
        Commands::Metrics { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_metrics(&config, fmt)
        }
        Commands::Predict {
            temperature,
            pressure,
            vibration,
            humidity,
            equipment,
            location,
        } => {
            let overrides = cli::PredictArgs {
                temperature,
                pressure,
                vibration,
                humidity,
                equipment,
                location,
            };
            cli::run_predict(&config, overrides)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&config),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
