//! Spinchain Local Statevector Simulator
//!
//! Exact statevector simulation of `spinchain-ir` circuits. This is the
//! numerical engine behind the evolution driver: the driver owns a
//! [`Statevector`], replays one Trotter slice on it per time step and reads
//! observables back out.
//!
//! # Features
//!
//! - **Exact Simulation**: full amplitude vector, no sampling noise
//! - **Observables**: per-qubit ⟨Z⟩ straight from the amplitudes
//! - **Shot Sampling**: seeded measurement sampling via [`ShotCounts`]
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 4 | 256 B |
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//!
//! # Example
//!
//! ```rust
//! use spinchain_adapter_sim::Statevector;
//! use spinchain_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("flip", 1);
//! circuit.rx(std::f64::consts::PI, QubitId(0)).unwrap();
//!
//! let mut state = Statevector::new(1).unwrap();
//! state.run(&circuit).unwrap();
//! assert!((state.expectation_z(0).unwrap() + 1.0).abs() < 1e-12);
//! ```

mod error;
mod sampler;
mod statevector;

pub use error::{StateError, StateResult};
pub use sampler::ShotCounts;
pub use statevector::{MAX_QUBITS, Statevector};
