//! Trotter-Suzuki product-formula synthesis.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n_steps`
//! slices, each evolved exactly under each term in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_k exp(-i c_{n-k} P_{n-k} τ/2)]
//!
//! Error: O(t³ / n²).

use std::fmt;

use serde::{Deserialize, Serialize};
use spinchain_ir::Circuit;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::synthesis::append_exp_pauli;

/// Order of the product formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrotterOrder {
    /// Lie-Trotter: every term once per slice.
    #[default]
    First,
    /// Symmetric Suzuki-Trotter: forward then reverse half-steps.
    Second,
}

impl fmt::Display for TrotterOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrotterOrder::First => write!(f, "first"),
            TrotterOrder::Second => write!(f, "second"),
        }
    }
}

/// Trotter product-formula time-evolution synthesiser.
#[derive(Debug, Clone)]
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
    /// Number of qubits; if None, inferred from the Hamiltonian.
    n_qubits: Option<u32>,
    /// Separate groups of same-weight terms with barriers.
    barriers: bool,
}

impl TrotterEvolution {
    /// Construct a new first- or second-order Trotter synthesiser.
    ///
    /// # Arguments
    /// * `hamiltonian`: the Hamiltonian H = Σ c_k P_k
    /// * `t`: total evolution time
    /// * `n_steps`: number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: Hamiltonian, t: f64, n_steps: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_steps,
            n_qubits: None,
            barriers: false,
        }
    }

    /// Override the circuit width (number of qubits).
    ///
    /// By default the width is inferred from the highest qubit index in the
    /// Hamiltonian.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Insert a full-width barrier after every run of consecutive terms with
    /// the same Pauli weight.
    ///
    /// For a Hamiltonian listing all couplings before all field terms this
    /// yields `couplings | fields |` per sweep.
    #[must_use]
    pub fn with_barriers(mut self, barriers: bool) -> Self {
        self.barriers = barriers;
        self
    }

    /// Duration of one slice, `t / n_steps`.
    pub fn step_time(&self) -> f64 {
        self.t / self.n_steps as f64
    }

    /// Synthesise a first-order Trotter circuit.
    ///
    /// Each Trotter slice applies every term once with time step `t / n_steps`.
    pub fn first_order(&self) -> SimResult<Circuit> {
        self.circuit(TrotterOrder::First)
    }

    /// Synthesise a second-order Suzuki-Trotter circuit.
    ///
    /// Each slice is a symmetric product: forward half-step then reverse
    /// half-step, giving O(t³/n²) error.
    pub fn second_order(&self) -> SimResult<Circuit> {
        self.circuit(TrotterOrder::Second)
    }

    /// Synthesise all `n_steps` slices of the given order.
    pub fn circuit(&self, order: TrotterOrder) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let step_t = self.step_time();

        let mut circuit = Circuit::with_size(circuit_name(order), n_qubits);
        debug!(
            n_terms = self.hamiltonian.n_terms(),
            n_steps = self.n_steps,
            n_qubits,
            %order,
            "synthesising Trotter circuit"
        );

        for _ in 0..self.n_steps {
            self.append_slice(&mut circuit, step_t, order, n_qubits)?;
        }
        Ok(circuit)
    }

    /// Synthesise a single slice of duration `t / n_steps`.
    ///
    /// Repeating this circuit `n_steps` times is equivalent to
    /// [`circuit`](Self::circuit).
    pub fn slice(&self, order: TrotterOrder) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let mut circuit = Circuit::with_size(circuit_name(order), n_qubits);
        self.append_slice(&mut circuit, self.step_time(), order, n_qubits)?;
        debug!(
            gates = circuit.gate_count(),
            depth = circuit.depth(),
            "synthesised single Trotter slice"
        );
        Ok(circuit)
    }

    fn append_slice(
        &self,
        circuit: &mut Circuit,
        step_t: f64,
        order: TrotterOrder,
        n_qubits: u32,
    ) -> SimResult<()> {
        let terms = self.hamiltonian.terms();
        match order {
            TrotterOrder::First => {
                self.append_sweep(circuit, terms.iter(), step_t, n_qubits)?;
            }
            TrotterOrder::Second => {
                let half_t = step_t / 2.0;
                self.append_sweep(circuit, terms.iter(), half_t, n_qubits)?;
                self.append_sweep(circuit, terms.iter().rev(), half_t, n_qubits)?;
            }
        }
        Ok(())
    }

    fn append_sweep<'a>(
        &self,
        circuit: &mut Circuit,
        terms: impl Iterator<Item = &'a HamiltonianTerm>,
        t: f64,
        n_qubits: u32,
    ) -> SimResult<()> {
        let mut group: Option<usize> = None;
        for term in terms {
            let weight = term.pauli.weight();
            if self.barriers && group.is_some_and(|w| w != weight) {
                circuit.barrier_all()?;
            }
            group = Some(weight);
            append_exp_pauli(circuit, term, t, n_qubits)?;
        }
        if self.barriers && group.is_some() {
            circuit.barrier_all()?;
        }
        Ok(())
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        Ok(())
    }

    fn effective_n_qubits(&self) -> u32 {
        self.n_qubits
            .unwrap_or_else(|| self.hamiltonian.min_qubits())
    }
}

fn circuit_name(order: TrotterOrder) -> &'static str {
    match order {
        TrotterOrder::First => "trotter1",
        TrotterOrder::Second => "trotter2",
    }
}
