//! Transverse-field Ising chain.
//!
//!   H = J · Σ_{i=0}^{N-2} Z_i Z_{i+1} + h · Σ_{i=0}^{N-1} X_i
//!
//! [`SimulationParameters`] fixes the chain and the time grid for a run;
//! [`TrotterStep`] is the one-slice circuit derived from them.

use serde::{Deserialize, Serialize};
use spinchain_ir::Circuit;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::trotter::{TrotterEvolution, TrotterOrder};

/// Largest chain the statevector engine is allowed to simulate.
pub const MAX_QUBITS: u32 = 16;

/// Parameters of one evolution run. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Chain length N.
    pub num_qubits: u32,
    /// Nearest-neighbour ZZ coupling J.
    pub coupling: f64,
    /// Transverse field h.
    pub field: f64,
    /// Number of Trotter slices.
    pub n_steps: usize,
    /// Duration of one slice.
    pub dt: f64,
    /// Product-formula order.
    #[serde(default)]
    pub order: TrotterOrder,
}

impl Default for SimulationParameters {
    /// Four sites, J = 1, h = 1.2, ten time units at 15 steps per unit.
    fn default() -> Self {
        Self::from_duration(4, 1.0, 1.2, 10.0, 15.0)
    }
}

impl SimulationParameters {
    /// Create parameters from an explicit step count and step size.
    pub fn new(num_qubits: u32, coupling: f64, field: f64, n_steps: usize, dt: f64) -> Self {
        Self {
            num_qubits,
            coupling,
            field,
            n_steps,
            dt,
            order: TrotterOrder::First,
        }
    }

    /// Derive the time grid from a total duration and a frame rate:
    /// `n_steps = ⌊total_time · fps⌋`, `dt = total_time / n_steps`.
    ///
    /// The result is not validated; a grid with no steps is rejected later
    /// by [`validate`](Self::validate).
    pub fn from_duration(
        num_qubits: u32,
        coupling: f64,
        field: f64,
        total_time: f64,
        fps: f64,
    ) -> Self {
        let frames = (total_time * fps).floor();
        let n_steps = if frames.is_finite() && frames > 0.0 {
            frames as usize
        } else {
            0
        };
        let dt = if n_steps > 0 {
            total_time / n_steps as f64
        } else {
            0.0
        };
        Self::new(num_qubits, coupling, field, n_steps, dt)
    }

    /// Set the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Total simulated time, `n_steps · dt`.
    pub fn total_time(&self) -> f64 {
        self.n_steps as f64 * self.dt
    }

    /// Check every field before any simulation work starts.
    pub fn validate(&self) -> SimResult<()> {
        if self.num_qubits == 0 {
            return Err(SimError::invalid("num_qubits", "chain needs at least one site"));
        }
        if self.num_qubits > MAX_QUBITS {
            return Err(SimError::invalid(
                "num_qubits",
                format!("{} exceeds the maximum of {MAX_QUBITS}", self.num_qubits),
            ));
        }
        if self.n_steps == 0 {
            return Err(SimError::invalid("n_steps", "at least one step is required"));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::invalid(
                "dt",
                format!("must be finite and positive, got {}", self.dt),
            ));
        }
        if !self.coupling.is_finite() {
            return Err(SimError::invalid(
                "coupling",
                format!("must be finite, got {}", self.coupling),
            ));
        }
        if !self.field.is_finite() {
            return Err(SimError::invalid(
                "field",
                format!("must be finite, got {}", self.field),
            ));
        }
        Ok(())
    }

    /// The TFIM Hamiltonian: all couplings `J·Z_iZ_{i+1}` in ascending `i`,
    /// then all field terms `h·X_i`.
    pub fn hamiltonian(&self) -> Hamiltonian {
        let n = self.num_qubits;
        let couplings = (0..n.saturating_sub(1)).map(|i| HamiltonianTerm::zz(i, i + 1, self.coupling));
        let fields = (0..n).map(|i| HamiltonianTerm::x(i, self.field));
        couplings.chain(fields).collect()
    }
}

/// One Trotter slice of duration `dt`, ready to be replayed on a state.
///
/// First order, per slice:
///
/// ```text
/// for i in 0..N-1:  CX(i, i+1) · Rz(2·J·dt) on i+1 · CX(i, i+1)
/// barrier
/// for i in 0..N:    Rx(2·h·dt) on i
/// barrier
/// ```
#[derive(Debug, Clone)]
pub struct TrotterStep {
    circuit: Circuit,
    dt: f64,
    order: TrotterOrder,
    num_qubits: u32,
}

impl TrotterStep {
    /// Build the slice for validated TFIM parameters.
    pub fn build(params: &SimulationParameters) -> SimResult<Self> {
        params.validate()?;
        Self::from_hamiltonian(params.hamiltonian(), params.num_qubits, params.dt, params.order)
    }

    /// Build a slice for an arbitrary Hamiltonian on `num_qubits` sites.
    pub fn from_hamiltonian(
        hamiltonian: Hamiltonian,
        num_qubits: u32,
        dt: f64,
        order: TrotterOrder,
    ) -> SimResult<Self> {
        let circuit = TrotterEvolution::new(hamiltonian, dt, 1)
            .with_n_qubits(num_qubits)
            .with_barriers(true)
            .slice(order)?;
        debug!(
            num_qubits,
            dt,
            %order,
            gates = circuit.gate_count(),
            "built Trotter step"
        );
        Ok(Self {
            circuit,
            dt,
            order,
            num_qubits,
        })
    }

    /// The slice circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Duration of the slice.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Product-formula order.
    pub fn order(&self) -> TrotterOrder {
        self.order
    }

    /// Chain length.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of gates (barriers excluded).
    pub fn gate_count(&self) -> usize {
        self.circuit.gate_count()
    }

    /// Number of CX gates.
    pub fn cx_count(&self) -> usize {
        self.circuit.count_ops().get("cx").copied().unwrap_or(0)
    }
}
