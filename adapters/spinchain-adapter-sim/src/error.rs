//! Error types for the statevector engine.

use thiserror::Error;

/// Errors raised while preparing or evolving a statevector.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// The register is wider than the engine will allocate.
    #[error("{num_qubits} qubits exceeds the statevector limit of {max}")]
    TooManyQubits {
        /// Requested width.
        num_qubits: usize,
        /// Largest supported width.
        max: usize,
    },

    /// A basis-state index does not fit in the register.
    #[error("Basis state {index} out of range for a {num_qubits}-qubit register")]
    BasisOutOfRange {
        /// The requested basis index.
        index: usize,
        /// Register width.
        num_qubits: usize,
    },

    /// An instruction touches a qubit the register does not have.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Register width.
        num_qubits: usize,
    },

    /// The circuit width differs from the register width.
    #[error("Circuit has {circuit} qubits but the state has {state}")]
    WidthMismatch {
        /// Circuit width.
        circuit: usize,
        /// Register width.
        state: usize,
    },

    /// Sampling requires at least one shot.
    #[error("shots must be at least 1")]
    NoShots,
}

/// Result type for statevector operations.
pub type StateResult<T> = Result<T, StateError>;
