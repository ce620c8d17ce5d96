/// Configuration schema and defaults for equipred.
///
/// Defines the TOML-serializable configuration with the `[api]`, `[server]`
/// and `[logging]` sections. Every field has a built-in default; users only
/// set what they want to change.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level equipred configuration.
///
/// Maps to `~/.equipred/config.toml` and `.equipred.toml`. Missing sections
/// and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Prediction API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds. `0` waits indefinitely.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Dashboard HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address of `equipred serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter: `"error"`, `"warn"`, `"info"`, `"debug"` or
    /// `"trace"`. `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl DashboardConfig {
    /// Annotated default config file content.
    ///
    /// Kept in sync with the `Default` impls; a test parses it back.
    pub fn default_toml() -> String {
        r#"# equipred configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (EQUIPRED_*)
#   2. Project config (.equipred.toml in current directory)
#   3. User global config (~/.equipred/config.toml)
#   4. Built-in defaults

[api]
base_url = "http://localhost:5000/api"
timeout_ms = 0              # 0 = wait indefinitely

[server]
addr = "127.0.0.1:8080"
open_browser = false

[logging]
level = "info"              # error | warn | info | debug | trace (RUST_LOG overrides)
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_matches_defaults() {
        let parsed: DashboardConfig = toml::from_str(&DashboardConfig::default_toml()).unwrap();
        assert_eq!(parsed, DashboardConfig::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: DashboardConfig = toml::from_str(
            r#"
[api]
base_url = "http://models.internal:5000/api"
"#,
        )
        .unwrap();
        assert_eq!(parsed.api.base_url, "http://models.internal:5000/api");
        assert_eq!(parsed.api.timeout_ms, 0);
        assert_eq!(parsed.server.addr, "127.0.0.1:8080");
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn empty_toml_is_default() {
        let parsed: DashboardConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, DashboardConfig::default());
    }
}
