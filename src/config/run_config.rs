use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::network::topology::Topology;

/// Application configuration, read from a JSON file with camelCase keys.
///
/// Unknown keys are ignored and missing keys take their compiled-in
/// defaults, so partial config files work. Every numeric option is
/// validated at this boundary; the training core assumes its inputs are
/// well-formed and never re-checks them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,

    pub lambda: f64,
    pub max_iterations: usize,
    pub error_threshold: f64,
    pub min_random: f64,
    pub max_random: f64,
    /// Completed epochs between weight checkpoints; 0 disables autosaving.
    pub autosave_interval: usize,

    pub weights_file: Option<String>,
    pub training_file: Option<String>,
    pub testing_file: Option<String>,
    pub saved_weights_file: Option<String>,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            input_nodes: 2,
            hidden_nodes: 2,
            output_nodes: 1,
            lambda: 0.3,
            max_iterations: 100_000,
            error_threshold: 0.0001,
            min_random: -1.5,
            max_random: 1.5,
            autosave_interval: 0,
            weights_file: None,
            training_file: None,
            testing_file: None,
            saved_weights_file: None,
        }
    }
}

/// Where the effective configuration came from. The runner prints a notice
/// for the two fallback cases.
#[derive(Debug)]
pub enum ConfigSource {
    File,
    DefaultsMissingFile,
    DefaultsMalformed(String),
}

/// A configuration value rejected at the boundary.
#[derive(Debug)]
pub enum ConfigError {
    NonPositiveTopology { field: &'static str, value: usize },
    NegativeValue { field: &'static str, value: f64 },
    NonFiniteValue { field: &'static str, value: f64 },
    EmptyRandomRange { min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveTopology { field, value } => {
                write!(f, "{} must be a positive integer, got {}", field, value)
            }
            ConfigError::NegativeValue { field, value } => {
                write!(f, "{} must be non-negative, got {}", field, value)
            }
            ConfigError::NonFiniteValue { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ConfigError::EmptyRandomRange { min, max } => {
                write!(f, "minRandom must be less than maxRandom, got [{}, {})", min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RunConfig {
    /// Loads a config from a JSON file. A missing or malformed file falls
    /// back to the defaults; the returned `ConfigSource` says which case
    /// applied so the caller can report it.
    pub fn load(path: &Path) -> (RunConfig, ConfigSource) {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => return (RunConfig::default(), ConfigSource::DefaultsMissingFile),
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(config) => (config, ConfigSource::File),
            Err(e) => (
                RunConfig::default(),
                ConfigSource::DefaultsMalformed(e.to_string()),
            ),
        }
    }

    /// The network topology declared by this config. Call `validate` first;
    /// this panics on zero-sized layers.
    pub fn topology(&self) -> Topology {
        Topology::new(self.input_nodes, self.hidden_nodes, self.output_nodes)
    }

    /// Rejects out-of-range values before they reach the training core.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let topology_fields = [
            ("inputNodes", self.input_nodes),
            ("hiddenNodes", self.hidden_nodes),
            ("outputNodes", self.output_nodes),
        ];
        for (field, value) in topology_fields {
            if value == 0 {
                return Err(ConfigError::NonPositiveTopology { field, value });
            }
        }

        let non_negative_fields = [
            ("lambda", self.lambda),
            ("errorThreshold", self.error_threshold),
        ];
        for (field, value) in non_negative_fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }

        for (field, value) in [("minRandom", self.min_random), ("maxRandom", self.max_random)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field, value });
            }
        }
        if self.min_random >= self.max_random {
            return Err(ConfigError::EmptyRandomRange {
                min: self.min_random,
                max: self.max_random,
            });
        }

        Ok(())
    }
}
