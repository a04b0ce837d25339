//! Stepwise time evolution.
//!
//! The driver owns nothing but the slice circuit and the run settings; each
//! call to [`EvolutionDriver::run`] prepares a fresh statevector, replays the
//! slice `n_steps` times and records a [`StateSnapshot`] after every slice.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use spinchain_adapter_sim::Statevector;
use tracing::{debug, info, trace};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::ising::{MAX_QUBITS, SimulationParameters, TrotterStep};
use crate::observable::{ObservableMode, StateSnapshot, Trajectory};
use crate::trotter::TrotterOrder;

/// Computational-basis state the chain starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialState {
    /// Every site |0⟩.
    Ground,
    /// Every site |0⟩ except `site`, which is |1⟩.
    SingleFlip {
        /// The flipped site.
        site: u32,
    },
    /// Alternating spins; site i is |1⟩ when i is even.
    Neel,
    /// Explicit `0`/`1` string, character i is site i.
    Bitstring(String),
}

impl Default for InitialState {
    fn default() -> Self {
        InitialState::SingleFlip { site: 0 }
    }
}

impl InitialState {
    /// Basis index of the state on a chain of `num_qubits` sites.
    ///
    /// Chains longer than [`MAX_QUBITS`] are rejected before any index is built.
    pub fn basis_index(&self, num_qubits: u32) -> SimResult<usize> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::invalid(
                "num_qubits",
                format!("{num_qubits} exceeds the maximum of {MAX_QUBITS}"),
            ));
        }
        match self {
            InitialState::Ground => Ok(0),
            InitialState::SingleFlip { site } => {
                if *site >= num_qubits {
                    return Err(SimError::InvalidInitialState(format!(
                        "site {site} is outside a chain of {num_qubits}"
                    )));
                }
                Ok(1usize << *site)
            }
            InitialState::Neel => Ok((0..num_qubits)
                .filter(|i| i % 2 == 0)
                .fold(0usize, |acc, i| acc | (1 << i))),
            InitialState::Bitstring(bits) => {
                if bits.chars().count() != num_qubits as usize {
                    return Err(SimError::InvalidInitialState(format!(
                        "bitstring '{bits}' has {} sites, chain has {num_qubits}",
                        bits.chars().count()
                    )));
                }
                bits.chars()
                    .enumerate()
                    .try_fold(0usize, |acc, (i, c)| match c {
                        '0' => Ok(acc),
                        '1' => Ok(acc | (1 << i)),
                        other => Err(SimError::InvalidInitialState(format!(
                            "unexpected character '{other}' in bitstring '{bits}'"
                        ))),
                    })
            }
        }
    }
}

impl fmt::Display for InitialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialState::Ground => write!(f, "ground"),
            InitialState::SingleFlip { site } => write!(f, "flip:{site}"),
            InitialState::Neel => write!(f, "neel"),
            InitialState::Bitstring(bits) => write!(f, "{bits}"),
        }
    }
}

impl FromStr for InitialState {
    type Err = SimError;

    /// Accepts `ground`, `neel`, `flip`, `flip:<site>` or a `0`/`1` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "ground" | "zero" => return Ok(InitialState::Ground),
            "neel" => return Ok(InitialState::Neel),
            "flip" => return Ok(InitialState::default()),
            _ => {}
        }
        if let Some(site) = s.strip_prefix("flip:") {
            let site = site.parse::<u32>().map_err(|_| {
                SimError::InvalidInitialState(format!("'{site}' is not a site index"))
            })?;
            return Ok(InitialState::SingleFlip { site });
        }
        if !s.is_empty() && s.chars().all(|c| c == '0' || c == '1') {
            return Ok(InitialState::Bitstring(s.to_string()));
        }
        Err(SimError::InvalidInitialState(format!(
            "'{s}' is not one of ground, neel, flip, flip:<site> or a bitstring"
        )))
    }
}

/// Replays one Trotter slice on a statevector and records magnetisation.
#[derive(Debug, Clone)]
pub struct EvolutionDriver {
    step: TrotterStep,
    n_steps: usize,
    initial_state: InitialState,
    observable: ObservableMode,
}

impl EvolutionDriver {
    /// Validate the TFIM parameters and build the slice.
    pub fn new(params: SimulationParameters) -> SimResult<Self> {
        let step = TrotterStep::build(&params)?;
        Ok(Self::with_step(step, params.n_steps))
    }

    /// Drive an arbitrary Hamiltonian on the same engine.
    pub fn from_hamiltonian(
        hamiltonian: Hamiltonian,
        num_qubits: u32,
        dt: f64,
        n_steps: usize,
        order: TrotterOrder,
    ) -> SimResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(SimError::invalid(
                "num_qubits",
                format!("must be in 1..={MAX_QUBITS}, got {num_qubits}"),
            ));
        }
        if n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::invalid(
                "dt",
                format!("must be finite and positive, got {dt}"),
            ));
        }
        let step = TrotterStep::from_hamiltonian(hamiltonian, num_qubits, dt, order)?;
        Ok(Self::with_step(step, n_steps))
    }

    fn with_step(step: TrotterStep, n_steps: usize) -> Self {
        Self {
            step,
            n_steps,
            initial_state: InitialState::default(),
            observable: ObservableMode::default(),
        }
    }

    /// Choose the starting basis state; checked against the chain length.
    pub fn with_initial_state(mut self, initial_state: InitialState) -> SimResult<Self> {
        initial_state.basis_index(self.step.num_qubits())?;
        self.initial_state = initial_state;
        Ok(self)
    }

    /// Choose how ⟨Z_i⟩ is measured.
    pub fn with_observable(mut self, observable: ObservableMode) -> SimResult<Self> {
        if let ObservableMode::Sampled { shots: 0, .. } = observable {
            return Err(SimError::InvalidShots(0));
        }
        self.observable = observable;
        Ok(self)
    }

    /// The slice replayed every step.
    pub fn step(&self) -> &TrotterStep {
        &self.step
    }

    /// Number of steps a run performs.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// The configured starting state.
    pub fn initial_state(&self) -> &InitialState {
        &self.initial_state
    }

    /// The configured readout.
    pub fn observable(&self) -> ObservableMode {
        self.observable
    }

    /// Run all steps.
    pub fn run(&self) -> SimResult<Trajectory> {
        self.run_with(|_| {})
    }

    /// Run all steps, calling `on_step` after each snapshot is recorded.
    pub fn run_with<F>(&self, mut on_step: F) -> SimResult<Trajectory>
    where
        F: FnMut(&StateSnapshot),
    {
        let num_qubits = self.step.num_qubits();
        let dt = self.step.dt();
        let index = self.initial_state.basis_index(num_qubits)?;
        let mut state = Statevector::from_basis(num_qubits as usize, index)?;
        let mut rng = match self.observable {
            ObservableMode::Sampled { seed, .. } => Some(StdRng::seed_from_u64(seed)),
            ObservableMode::Exact => None,
        };

        info!(
            num_qubits,
            n_steps = self.n_steps,
            dt,
            order = %self.step.order(),
            initial = %self.initial_state,
            "starting evolution"
        );

        let mut trajectory = Trajectory::new(num_qubits as usize, dt);
        for step in 1..=self.n_steps {
            state.run(self.step.circuit())?;

            let magnetization = match (&self.observable, rng.as_mut()) {
                (ObservableMode::Sampled { shots, .. }, Some(rng)) => {
                    state.sample_counts(*shots, rng)?.magnetization()
                }
                _ => state.magnetization(),
            };
            trace!(step, ?magnetization, "recorded snapshot");

            let snapshot = StateSnapshot {
                step,
                time: step as f64 * dt,
                magnetization,
            };
            on_step(&snapshot);
            trajectory.push(snapshot)?;
        }

        debug!(
            snapshots = trajectory.len(),
            norm = state.norm_sqr(),
            "evolution finished"
        );
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_indices() {
        assert_eq!(InitialState::Ground.basis_index(4).unwrap(), 0);
        assert_eq!(InitialState::default().basis_index(4).unwrap(), 0b0001);
        assert_eq!(
            InitialState::SingleFlip { site: 2 }.basis_index(4).unwrap(),
            0b0100
        );
        assert_eq!(InitialState::Neel.basis_index(4).unwrap(), 0b0101);
        assert_eq!(
            InitialState::Bitstring("0011".into()).basis_index(4).unwrap(),
            0b1100
        );
    }

    #[test]
    fn test_initial_state_errors() {
        assert!(InitialState::SingleFlip { site: 4 }.basis_index(4).is_err());
        assert!(InitialState::Bitstring("01".into()).basis_index(4).is_err());
        assert!(InitialState::Bitstring("01x1".into()).basis_index(4).is_err());
    }

    #[test]
    fn test_basis_index_rejects_oversized_chain() {
        let err = InitialState::SingleFlip { site: 70 }.basis_index(100);
        assert!(matches!(
            err,
            Err(SimError::InvalidParameter {
                name: "num_qubits",
                ..
            })
        ));
        assert!(InitialState::Neel.basis_index(64).is_err());
        assert!(InitialState::Ground.basis_index(MAX_QUBITS + 1).is_err());
        assert!(InitialState::Neel.basis_index(MAX_QUBITS).is_ok());
    }

    #[test]
    fn test_initial_state_parse() {
        assert_eq!("ground".parse::<InitialState>().unwrap(), InitialState::Ground);
        assert_eq!("Neel".parse::<InitialState>().unwrap(), InitialState::Neel);
        assert_eq!(
            "flip".parse::<InitialState>().unwrap(),
            InitialState::SingleFlip { site: 0 }
        );
        assert_eq!(
            "flip:3".parse::<InitialState>().unwrap(),
            InitialState::SingleFlip { site: 3 }
        );
        assert_eq!(
            "0110".parse::<InitialState>().unwrap(),
            InitialState::Bitstring("0110".into())
        );
        assert!("flip:x".parse::<InitialState>().is_err());
        assert!("up".parse::<InitialState>().is_err());

        for state in [
            InitialState::Ground,
            InitialState::Neel,
            InitialState::SingleFlip { site: 1 },
            InitialState::Bitstring("101".into()),
        ] {
            assert_eq!(state.to_string().parse::<InitialState>().unwrap(), state);
        }
    }

    #[test]
    fn test_default_start_is_first_site_flipped() {
        let params = SimulationParameters::new(3, 1.0, 0.0, 2, 0.1);
        let traj = EvolutionDriver::new(params).unwrap().run().unwrap();
        for snap in &traj {
            assert!((snap.magnetization[0] + 1.0).abs() < 1e-12);
            assert!((snap.magnetization[1] - 1.0).abs() < 1e-12);
            assert!((snap.magnetization[2] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_run_with_callback_sees_every_step() {
        let params = SimulationParameters::new(2, 1.0, 0.5, 7, 0.1);
        let driver = EvolutionDriver::new(params).unwrap();
        let mut seen = Vec::new();
        let traj = driver.run_with(|s| seen.push(s.step)).unwrap();
        assert_eq!(seen, (1..=7).collect::<Vec<_>>());
        assert_eq!(traj.len(), 7);
        assert!((traj.snapshots()[6].time - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let params = SimulationParameters::new(2, 1.0, 0.5, 3, 0.1);
        let driver = EvolutionDriver::new(params).unwrap();
        assert!(matches!(
            driver.clone().with_observable(ObservableMode::Sampled { shots: 0, seed: 1 }),
            Err(SimError::InvalidShots(0))
        ));
        assert!(matches!(
            driver.with_initial_state(InitialState::SingleFlip { site: 5 }),
            Err(SimError::InvalidInitialState(_))
        ));

        let h = SimulationParameters::new(2, 1.0, 0.5, 3, 0.1).hamiltonian();
        assert!(matches!(
            EvolutionDriver::from_hamiltonian(h, 2, 0.1, 0, TrotterOrder::First),
            Err(SimError::InvalidSteps(0))
        ));
    }
}
