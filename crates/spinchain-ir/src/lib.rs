//! Spinchain circuit intermediate representation
//!
//! The circuits built here are short and fixed: one Trotter slice of a
//! spin-chain Hamiltonian, replayed many times by the statevector engine.
//! Internally a circuit is a DAG over qubit wires, which gives cheap depth
//! computation and operand validation at build time.
//!
//! # Example
//!
//! ```rust
//! use spinchain_ir::{Circuit, QubitId};
//!
//! // One ZZ interaction slice between neighbours 0 and 1.
//! let mut circuit = Circuit::with_size("zz", 2);
//! circuit
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .rz(0.2, QubitId(1)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `Rx` | 1 | Transverse-field rotation |
//! | `Rz` | 1 | Z rotation, the core of a ZZ coupling |
//! | `CX` | 2 | Controlled-NOT, brackets the `Rz` of a ZZ coupling |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
