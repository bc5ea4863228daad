use crate::analysis::enumerator::EnumerationLimits;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "flowgraph.toml";
pub const ENV_PREFIX: &str = "FLOWGRAPH__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// applied when a network auto-populates its paths
    pub enumeration: EnumerationLimits,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enumeration: EnumerationLimits::new(None, Some(1000)),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    /// chance per operational edge per timestep
    pub failure_probability: f64,
    pub repair_turns: u32,
    /// fraction of base capacity, applied as ± around it
    pub capacity_jitter: f64,
    pub auto_handle_failures: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            failure_probability: 0.05,
            repair_turns: 3,
            capacity_jitter: 0.0,
            auto_handle_failures: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
    pub directory: PathBuf,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: PathBuf::from("logs"),
            file_name: "flowgraph.log".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (`flowgraph.toml` unless given), then
    /// `FLOWGRAPH__SECTION__KEY` environment variables.
    pub fn figment(file: Option<&Path>) -> Figment {
        let file = file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(file: Option<&Path>) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that deserialize fine but make no sense to run with.
    pub fn validate(&self) -> Result<(), figment::Error> {
        let rates = [
            ("simulation.failure_probability", self.simulation.failure_probability),
            ("simulation.capacity_jitter", self.simulation.capacity_jitter),
        ];
        for (key, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", key, value).into());
            }
        }
        if self.enumeration.max_paths == Some(0) {
            return Err("enumeration.max_paths must be at least 1".to_string().into());
        }
        Ok(())
    }
}
