//! Shared arguments and helpers for CLI commands.

use anyhow::Result;
use clap::Args;
use spinchain_sim::TrotterOrder;

use crate::config::Config;

/// Chain and time-grid overrides shared by `run` and `slice`.
#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// Number of sites
    #[arg(short = 'n', long)]
    pub qubits: Option<u32>,

    /// ZZ coupling J
    #[arg(short = 'J', long, allow_hyphen_values = true)]
    pub coupling: Option<f64>,

    /// Transverse field h
    #[arg(short = 'H', long, allow_hyphen_values = true)]
    pub field: Option<f64>,

    /// Number of Trotter steps
    #[arg(long)]
    pub steps: Option<usize>,

    /// Step size
    #[arg(long)]
    pub dt: Option<f64>,

    /// Simulated duration (used when --steps or --dt is missing)
    #[arg(long)]
    pub duration: Option<f64>,

    /// Use the second-order Suzuki-Trotter slice
    #[arg(long)]
    pub second_order: bool,

    /// Initial state: ground, neel, flip, flip:<site> or a bitstring
    #[arg(long)]
    pub initial: Option<String>,
}

/// Arguments of `spinchain run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Output GIF path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Estimate magnetisation from this many samples per step
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Seed for sampled magnetisation
    #[arg(long, requires = "shots")]
    pub seed: Option<u64>,

    /// Playback frame rate
    #[arg(long)]
    pub fps: Option<u32>,

    /// Site whose history is plotted
    #[arg(long)]
    pub track: Option<usize>,

    /// Also write every frame as PNG into this directory
    #[arg(long)]
    pub frames_dir: Option<String>,

    /// Write the trajectory as JSON
    #[arg(long)]
    pub export: Option<String>,
}

/// Arguments of `spinchain slice`.
#[derive(Args, Debug, Clone, Default)]
pub struct SliceArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Print instructions as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimArgs {
    /// Apply the flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        let sim = &mut config.simulation;
        if let Some(n) = self.qubits {
            sim.num_qubits = n;
        }
        if let Some(j) = self.coupling {
            sim.coupling = j;
        }
        if let Some(h) = self.field {
            sim.field = h;
        }
        if let Some(steps) = self.steps {
            sim.steps = Some(steps);
        }
        if let Some(dt) = self.dt {
            sim.dt = Some(dt);
        }
        if let Some(t) = self.duration {
            sim.total_time = t;
        }
        if self.second_order {
            sim.order = TrotterOrder::Second;
        }
        if let Some(initial) = &self.initial {
            sim.initial_state = initial.clone();
        }
    }
}

impl RunArgs {
    /// Apply the flags on top of the loaded configuration and re-validate.
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        self.sim.apply(&mut config);
        if let Some(shots) = self.shots {
            config.observable = spinchain_sim::ObservableMode::Sampled {
                shots,
                seed: self.seed.unwrap_or(0),
            };
        }
        if let Some(fps) = self.fps {
            config.render.fps = fps;
        }
        if let Some(track) = self.track {
            config.render.tracked_qubit = track;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(dir) = &self.frames_dir {
            config.output.frames_dir = Some(dir.clone());
        }
        if let Some(export) = &self.export {
            config.output.export = Some(export.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

impl SliceArgs {
    /// Apply the flags on top of the loaded configuration and re-validate.
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        self.sim.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
