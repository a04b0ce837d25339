//! Magnetisation snapshots and trajectories.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// How ⟨Z_i⟩ is read out of the state after each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ObservableMode {
    /// Exact expectation values from the amplitudes.
    #[default]
    Exact,
    /// Estimate from `shots` computational-basis samples.
    ///
    /// The generator is seeded once per run, so equal seeds give equal
    /// trajectories.
    Sampled {
        /// Samples per step.
        shots: u32,
        /// RNG seed.
        seed: u64,
    },
}

/// Per-site magnetisation after one Trotter step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// 1-based step index.
    pub step: usize,
    /// Simulated time, `step · dt`.
    pub time: f64,
    /// ⟨Z_i⟩ indexed by site, each in [-1, 1].
    pub magnetization: Vec<f64>,
}

impl StateSnapshot {
    /// ⟨Z⟩ of one site, or `None` when the site is outside the chain.
    pub fn site(&self, qubit: usize) -> Option<f64> {
        self.magnetization.get(qubit).copied()
    }

    /// Mean magnetisation over the chain.
    pub fn mean(&self) -> f64 {
        if self.magnetization.is_empty() {
            return 0.0;
        }
        self.magnetization.iter().sum::<f64>() / self.magnetization.len() as f64
    }
}

/// Ordered snapshots of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    num_qubits: usize,
    dt: f64,
    snapshots: Vec<StateSnapshot>,
}

impl Trajectory {
    /// Create an empty trajectory for a chain of `num_qubits` sites.
    pub fn new(num_qubits: usize, dt: f64) -> Self {
        Self {
            num_qubits,
            dt,
            snapshots: Vec::new(),
        }
    }

    /// Append a snapshot.
    ///
    /// Steps must increase strictly and every snapshot must cover the whole
    /// chain.
    pub fn push(&mut self, snapshot: StateSnapshot) -> SimResult<()> {
        if snapshot.magnetization.len() != self.num_qubits {
            return Err(SimError::InvalidSnapshot(format!(
                "expected {} sites, got {}",
                self.num_qubits,
                snapshot.magnetization.len()
            )));
        }
        if let Some(last) = self.snapshots.last() {
            if snapshot.step <= last.step {
                return Err(SimError::InvalidSnapshot(format!(
                    "step {} does not follow step {}",
                    snapshot.step, last.step
                )));
            }
        }
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// All snapshots in step order.
    pub fn snapshots(&self) -> &[StateSnapshot] {
        &self.snapshots
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True before the first step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Chain length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Step duration.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time of the last snapshot, or 0 when empty.
    pub fn duration(&self) -> f64 {
        self.snapshots.last().map_or(0.0, |s| s.time)
    }

    /// ⟨Z⟩ of one site over time. Empty if the site is outside the chain.
    pub fn site_series(&self, qubit: usize) -> Vec<f64> {
        if qubit >= self.num_qubits {
            return Vec::new();
        }
        self.snapshots
            .iter()
            .map(|s| s.magnetization[qubit])
            .collect()
    }

    /// Snapshot times.
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    /// Iterate over snapshots.
    pub fn iter(&self) -> std::slice::Iter<'_, StateSnapshot> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a StateSnapshot;
    type IntoIter = std::slice::Iter<'a, StateSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
