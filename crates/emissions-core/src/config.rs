//! Configuration loading and typed config structures for the dashboard.
//!
//! The configuration lives in `emissions-dashboard.yaml`. Every section and
//! field has a default, so an empty file (or no file at all) gives the
//! classic dashboard: the two `co2_total` CSVs, a red world map, and
//! France and the United Kingdom selected.

use std::path::{Path, PathBuf};

use emissions_types::{Margin, SequentialScale};
use serde::Deserialize;

use crate::dataset::{DEFAULT_ENTITIES, DEFAULT_METRIC_COLUMN, DatasetOptions};
use crate::figure::ChoroplethStyle;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// Input files and column naming.
    #[serde(default)]
    pub data: DataConfig,

    /// Presentation and default selection.
    #[serde(default)]
    pub view: ViewConfig,

    /// HTTP listener.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `EMISSIONS_ALL_PATH` overrides `data.all_entities_path`
    /// - `EMISSIONS_WORLD_PATH` overrides `data.world_path`
    /// - `OBSERVER_HOST` overrides `server.host`
    /// - `OBSERVER_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides looked up through `lookup` (normally the process
    /// environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `OBSERVER_PORT` is not a port.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("EMISSIONS_ALL_PATH") {
            self.data.all_entities_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("EMISSIONS_WORLD_PATH") {
            self.data.world_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("OBSERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("OBSERVER_PORT") {
            self.server.port = val.parse().ok().ok_or(ConfigError::InvalidEnv {
                name: "OBSERVER_PORT",
                value: val,
            })?;
        }
        Ok(())
    }

    /// Engine options derived from the `data` and `view` sections.
    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions {
            metric: self.data.metric_column.clone(),
            year_min: self.view.year_min,
            year_max: self.view.year_max,
            default_entities: self.view.default_entities.clone(),
            style: ChoroplethStyle {
                title: self.view.title.clone(),
                scope: self.view.scope.clone(),
                projection: self.view.projection.clone(),
                scale: self.view.color_scale,
                margin: self.view.margin,
            },
            unit_label: self.view.unit_label.clone(),
        }
    }
}

/// Input data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// CSV with every entity.
    #[serde(default = "default_all_entities_path")]
    pub all_entities_path: PathBuf,

    /// CSV with the world aggregate only.
    #[serde(default = "default_world_path")]
    pub world_path: PathBuf,

    /// Header of the emissions metric column in both files.
    #[serde(default = "default_metric_column")]
    pub metric_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            all_entities_path: default_all_entities_path(),
            world_path: default_world_path(),
            metric_column: default_metric_column(),
        }
    }
}

/// Presentation and default-selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewConfig {
    /// Map title and page heading prefix.
    #[serde(default = "default_title")]
    pub title: String,

    /// First selectable year. Derived from the world table when unset;
    /// must not precede the world table's first year.
    #[serde(default)]
    pub year_min: Option<i32>,

    /// Last selectable year. Derived from the world table when unset;
    /// must not pass the world table's last year.
    #[serde(default)]
    pub year_max: Option<i32>,

    /// Entities selected on first load.
    #[serde(default = "default_entities")]
    pub default_entities: Vec<String>,

    /// Sequential colour scale for the map.
    #[serde(default)]
    pub color_scale: SequentialScale,

    /// Map projection.
    #[serde(default = "default_projection")]
    pub projection: String,

    /// Geographic scope.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Map margins.
    #[serde(default)]
    pub margin: Margin,

    /// Unit appended to the world total readout.
    #[serde(default = "default_unit_label")]
    pub unit_label: String,

    /// Attribution line under the dashboard.
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            year_min: None,
            year_max: None,
            default_entities: default_entities(),
            color_scale: SequentialScale::default(),
            projection: default_projection(),
            scope: default_scope(),
            margin: Margin::default(),
            unit_label: default_unit_label(),
            attribution: default_attribution(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_all_entities_path() -> PathBuf {
    PathBuf::from("co2_total.csv")
}

fn default_world_path() -> PathBuf {
    PathBuf::from("co2_total_world.csv")
}

fn default_metric_column() -> String {
    String::from(DEFAULT_METRIC_COLUMN)
}

fn default_title() -> String {
    String::from("World CO2 Emissions")
}

fn default_entities() -> Vec<String> {
    DEFAULT_ENTITIES.iter().map(|s| (*s).to_owned()).collect()
}

fn default_projection() -> String {
    String::from("equirectangular")
}

fn default_scope() -> String {
    String::from("world")
}

fn default_unit_label() -> String {
    String::from("tonnes")
}

fn default_attribution() -> String {
    String::from(
        "Global CO2 Emission Data. Data derived from Our World in Data \
         (https://ourworldindata.org/), with thanks.",
    )
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}
