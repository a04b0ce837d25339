//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building or running a Trotter evolution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty, no terms to synthesise")]
    EmptyHamiltonian,

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but circuit only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target circuit.
        n_qubits: u32,
    },

    /// A multi-qubit Pauli string mixes in non-Z factors.
    #[error("Unsupported term {0}: multi-qubit strings must be all Z")]
    UnsupportedTerm(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] spinchain_ir::IrError),

    /// Statevector engine returned an error.
    #[error("Statevector error: {0}")]
    State(#[from] spinchain_adapter_sim::StateError),

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// A simulation parameter is outside its valid range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The requested initial state cannot be prepared on this chain.
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(String),

    /// Sampled observables need at least one shot.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// A snapshot does not fit the trajectory it is appended to.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
