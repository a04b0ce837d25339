//! Configuration management for the spinchain CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with SPINCHAIN_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};
use spinchain_render::RenderConfig;
use spinchain_sim::{InitialState, ObservableMode, SimulationParameters, TrotterOrder};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chain and time grid
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// How magnetisation is measured
    #[serde(default)]
    pub observable: ObservableMode,

    /// Canvas and playback settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Where artifacts are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chain and time-grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of sites
    #[serde(default = "default_num_qubits")]
    pub num_qubits: u32,

    /// ZZ coupling J
    #[serde(default = "default_coupling")]
    pub coupling: f64,

    /// Transverse field h
    #[serde(default = "default_field")]
    pub field: f64,

    /// Simulated duration, used when `steps` or `dt` is missing
    #[serde(default = "default_total_time")]
    pub total_time: f64,

    /// Explicit Trotter step count
    #[serde(default)]
    pub steps: Option<usize>,

    /// Explicit step size
    #[serde(default)]
    pub dt: Option<f64>,

    /// Product-formula order: "first" or "second"
    #[serde(default)]
    pub order: TrotterOrder,

    /// Starting state: ground, neel, flip, flip:<site> or a bitstring
    #[serde(default = "default_initial_state")]
    pub initial_state: String,
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Animated GIF path
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Optional directory for a PNG frame sequence
    #[serde(default)]
    pub frames_dir: Option<String>,

    /// Optional JSON trajectory export
    #[serde(default)]
    pub export: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given: "trace", "debug", "info", "warn", "error"
    #[serde(default)]
    pub level: Option<String>,
}

// Default value functions
fn default_num_qubits() -> u32 {
    4
}

fn default_coupling() -> f64 {
    1.0
}

fn default_field() -> f64 {
    1.2
}

fn default_total_time() -> f64 {
    10.0
}

fn default_initial_state() -> String {
    "flip:0".to_string()
}

fn default_output_path() -> String {
    "spin_chain_dynamics.gif".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_qubits: default_num_qubits(),
            coupling: default_coupling(),
            field: default_field(),
            total_time: default_total_time(),
            steps: None,
            dt: None,
            order: TrotterOrder::default(),
            initial_state: default_initial_state(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
            frames_dir: None,
            export: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            Config::default()
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables present in `lookup` override the current values;
    /// values that fail to parse are ignored.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        // Simulation
        if let Some(v) = parsed(&lookup, "SPINCHAIN_QUBITS") {
            self.simulation.num_qubits = v;
        }
        if let Some(v) = parsed(&lookup, "SPINCHAIN_COUPLING") {
            self.simulation.coupling = v;
        }
        if let Some(v) = parsed(&lookup, "SPINCHAIN_FIELD") {
            self.simulation.field = v;
        }
        if let Some(v) = parsed(&lookup, "SPINCHAIN_TOTAL_TIME") {
            self.simulation.total_time = v;
        }
        if let Some(v) = parsed(&lookup, "SPINCHAIN_STEPS") {
            self.simulation.steps = Some(v);
        }
        if let Some(v) = parsed(&lookup, "SPINCHAIN_DT") {
            self.simulation.dt = Some(v);
        }
        if let Some(v) = lookup("SPINCHAIN_INITIAL") {
            self.simulation.initial_state = v;
        }

        // Observable
        if let Some(shots) = parsed(&lookup, "SPINCHAIN_SHOTS") {
            let seed = parsed(&lookup, "SPINCHAIN_SEED").unwrap_or(0);
            self.observable = ObservableMode::Sampled { shots, seed };
        }

        // Render
        if let Some(v) = parsed(&lookup, "SPINCHAIN_FPS") {
            self.render.fps = v;
        }

        // Output
        if let Some(v) = lookup("SPINCHAIN_OUTPUT") {
            self.output.path = v;
        }

        // Logging
        if let Some(v) = lookup("SPINCHAIN_LOG_LEVEL") {
            self.logging.level = Some(v);
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_parameters()?
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        self.initial_state()?;

        if let ObservableMode::Sampled { shots: 0, .. } = self.observable {
            return Err(ConfigError::ValidationError(
                "observable.shots must be greater than 0".to_string(),
            ));
        }

        self.render
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        if self.render.tracked_qubit >= self.simulation.num_qubits as usize {
            return Err(ConfigError::ValidationError(format!(
                "render.tracked_qubit {} is outside a chain of {}",
                self.render.tracked_qubit, self.simulation.num_qubits
            )));
        }

        if self.output.path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.path must not be empty".to_string(),
            ));
        }

        if let Some(level) = &self.logging.level {
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {}
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "Invalid log level: {other}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve the time grid into simulation parameters.
    ///
    /// With both `steps` and `dt` set they are used as given. `steps` alone
    /// splits `total_time` evenly. `dt` alone is kept exactly and the step
    /// count is `total_time / dt` rounded, at least one. With neither the
    /// grid is `total_time` at the render frame rate.
    pub fn simulation_parameters(&self) -> Result<SimulationParameters, ConfigError> {
        let sim = &self.simulation;
        let params = match (sim.steps, sim.dt) {
            (Some(steps), Some(dt)) => {
                SimulationParameters::new(sim.num_qubits, sim.coupling, sim.field, steps, dt)
            }
            (Some(steps), None) => {
                if steps == 0 {
                    return Err(ConfigError::ValidationError(
                        "simulation.steps must be greater than 0".to_string(),
                    ));
                }
                let dt = sim.total_time / steps as f64;
                SimulationParameters::new(sim.num_qubits, sim.coupling, sim.field, steps, dt)
            }
            (None, Some(dt)) => {
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "simulation.dt must be a positive finite number, got {dt}"
                    )));
                }
                let steps = (sim.total_time / dt).round().max(1.0) as usize;
                SimulationParameters::new(sim.num_qubits, sim.coupling, sim.field, steps, dt)
            }
            (None, None) => SimulationParameters::from_duration(
                sim.num_qubits,
                sim.coupling,
                sim.field,
                sim.total_time,
                f64::from(self.render.fps),
            ),
        };
        Ok(params.with_order(sim.order))
    }

    /// Parse the configured starting state.
    pub fn initial_state(&self) -> Result<InitialState, ConfigError> {
        let state: InitialState = self
            .simulation
            .initial_state
            .parse()
            .map_err(|e: spinchain_sim::SimError| ConfigError::ValidationError(e.to_string()))?;
        state
            .basis_index(self.simulation.num_qubits)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Ok(state)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
