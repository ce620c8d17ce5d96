/// Configuration system for equipred.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::DashboardConfig::default()`]
/// 2. **User global config**: `~/.equipred/config.toml`
/// 3. **Project local config**: `.equipred.toml` in the current working directory
/// 4. **Environment variables**: `EQUIPRED_*` overrides (highest precedence)
///
/// File layers are merged key by key: a file that only sets `api.base_url`
/// leaves every other value from the layer below untouched.
///
/// # Usage
///
/// ```rust,ignore
/// use equipred::config;
///
/// let loaded = config::load();
/// let client = ApiClient::from_config(&loaded.config.api);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::DashboardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// The resolved configuration and the layers that were skipped on the way.
///
/// Loading happens before logging is installed (the log level is itself a
/// config value), so problems are collected here and reported by the caller
/// once a subscriber exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: DashboardConfig,
    pub warnings: Vec<String>,
}

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars. A file that is
/// not valid TOML, or that does not fit the schema, is skipped as a whole;
/// the layers below it stay in effect.
pub fn load() -> Loaded {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        });
    resolve(layers, |key| std::env::var(key).ok())
}

/// Merge `(source, content)` layers in order, then apply env overrides.
fn resolve(
    layers: impl IntoIterator<Item = (String, String)>,
    var: impl Fn(&str) -> Option<String>,
) -> Loaded {
    let mut merged = toml::Value::Table(toml::map::Map::new());
    let mut warnings = Vec::new();

    for (source, content) in layers {
        let layer: toml::Value = match toml::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warnings.push(format!("ignoring malformed config file {source}: {e}"));
                continue;
            }
        };
        let mut candidate = merged.clone();
        merge_values(&mut candidate, layer);
        let checked: Result<DashboardConfig, _> = candidate.clone().try_into();
        match checked {
            Ok(_) => merged = candidate,
            Err(e) => warnings.push(format!("ignoring config file {source}: {e}")),
        }
    }

    // Every accepted layer was checked against the schema above.
    let mut config: DashboardConfig = merged.try_into().unwrap_or_default();
    apply_overrides(&mut config, var);
    Loaded { config, warnings }
}

/// Merge `overlay` into `base`: tables recursively, anything else replaced.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.equipred/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".equipred").join("config.toml"))
}

/// Path to the project local config: `.equipred.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".equipred.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `EQUIPRED_*` overrides read through `var`.
///
/// Supported variables:
/// - `EQUIPRED_API_URL`: prediction API base URL
/// - `EQUIPRED_API_TIMEOUT_MS`: request timeout (`0` = none)
/// - `EQUIPRED_ADDR`: dashboard listen address
/// - `EQUIPRED_OPEN_BROWSER`: open the browser on start (`1`/`true`/`yes`/`on`)
/// - `EQUIPRED_LOG`: default log level
fn apply_overrides(config: &mut DashboardConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("EQUIPRED_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Some(val) = var("EQUIPRED_API_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Some(val) = var("EQUIPRED_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = var("EQUIPRED_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = var("EQUIPRED_LOG")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.equipred/config.toml`.
///
/// Creates `~/.equipred/` if needed. Fails if the file already exists unless
/// `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.equipred/ directory")?;
    }

    fs::write(&path, DashboardConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set one dotted key (e.g. `api.base_url`) in the global config file.
///
/// Starts from the existing file, or from the serialized defaults when there
/// is none. The result must still deserialize into [`DashboardConfig`].
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&DashboardConfig::default())
            .context("failed to serialize default config")?
    };

    let updated = apply_config_value(&content, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, updated).context("failed to write config file")?;

    Ok(())
}

/// Apply a dotted-key update to TOML text and return the new text.
fn apply_config_value(content: &str, key: &str, value: &str) -> Result<String> {
    let mut root: toml::Value = toml::from_str(content).context("failed to parse config as TOML")?;
    set_toml_value(&mut root, key, value)?;

    let _: DashboardConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("'{key}' = '{value}' does not fit the config schema"))?;

    toml::to_string_pretty(&root).context("failed to serialize updated config")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The existing value's type decides how `raw_value` is parsed. Missing
/// keys inside a known section are stored as strings.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. api.base_url: '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config(config: &DashboardConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = DashboardConfig::default();
        apply_overrides(
            &mut config,
            env(&[
                ("EQUIPRED_API_URL", "http://10.1.1.1:5000/api"),
                ("EQUIPRED_API_TIMEOUT_MS", "1500"),
                ("EQUIPRED_ADDR", "0.0.0.0:9000"),
                ("EQUIPRED_OPEN_BROWSER", "yes"),
                ("EQUIPRED_LOG", "debug"),
            ]),
        );
        assert_eq!(config.api.base_url, "http://10.1.1.1:5000/api");
        assert_eq!(config.api.timeout_ms, 1500);
        assert_eq!(config.server.addr, "0.0.0.0:9000");
        assert!(config.server.open_browser);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_or_empty_env_values_are_ignored() {
        let mut config = DashboardConfig::default();
        apply_overrides(
            &mut config,
            env(&[("EQUIPRED_API_URL", ""), ("EQUIPRED_API_TIMEOUT_MS", "soon")]),
        );
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn merge_is_key_by_key() {
        let mut base: toml::Value = toml::from_str(
            r#"
[api]
base_url = "http://global:5000/api"
timeout_ms = 3000
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[api]
base_url = "http://project:5000/api"
"#,
        )
        .unwrap();
        merge_values(&mut base, overlay);
        let config: DashboardConfig = base.try_into().unwrap();
        assert_eq!(config.api.base_url, "http://project:5000/api");
        assert_eq!(config.api.timeout_ms, 3000);
    }

    fn layer(source: &str, content: &str) -> (String, String) {
        (source.to_string(), content.to_string())
    }

    #[test]
    fn schema_bad_layer_is_skipped_alone() {
        let loaded = resolve(
            [
                layer(
                    "global",
                    "[api]\nbase_url = \"http://global:5000/api\"\ntimeout_ms = 3000\n",
                ),
                layer(
                    "project",
                    "[api]\nbase_url = \"http://127.0.0.1:9/api\"\ntimeout_ms = \"soon\"\n",
                ),
            ],
            env(&[]),
        );
        assert_eq!(loaded.config.api.base_url, "http://global:5000/api");
        assert_eq!(loaded.config.api.timeout_ms, 3000);
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("project"));
    }

    #[test]
    fn malformed_toml_is_reported_and_later_layers_still_apply() {
        let loaded = resolve(
            [
                layer("global", "[api\nbase_url = "),
                layer("project", "[server]\naddr = \"0.0.0.0:9000\"\n"),
            ],
            env(&[("EQUIPRED_LOG", "debug")]),
        );
        assert_eq!(loaded.config.server.addr, "0.0.0.0:9000");
        assert_eq!(loaded.config.api, schema::ApiConfig::default());
        assert_eq!(loaded.config.logging.level, "debug");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("malformed config file global"));
    }

    #[test]
    fn no_layers_gives_defaults() {
        let loaded = resolve(Vec::new(), env(&[]));
        assert_eq!(loaded.config, DashboardConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn set_value_updates_typed_fields() {
        let defaults = toml::to_string_pretty(&DashboardConfig::default()).unwrap();
        let updated = apply_config_value(&defaults, "api.timeout_ms", "2500").unwrap();
        let updated = apply_config_value(&updated, "server.open_browser", "on").unwrap();
        let updated = apply_config_value(&updated, "api.base_url", "http://x:1/api").unwrap();
        let config: DashboardConfig = toml::from_str(&updated).unwrap();
        assert_eq!(config.api.timeout_ms, 2500);
        assert!(config.server.open_browser);
        assert_eq!(config.api.base_url, "http://x:1/api");
    }

    #[test]
    fn set_value_rejects_bad_input() {
        let defaults = toml::to_string_pretty(&DashboardConfig::default()).unwrap();
        assert!(apply_config_value(&defaults, "api.timeout_ms", "fast").is_err());
        assert!(apply_config_value(&defaults, "nonexistent.key", "v").is_err());
        assert!(apply_config_value(&defaults, "undotted", "v").is_err());
    }
}
