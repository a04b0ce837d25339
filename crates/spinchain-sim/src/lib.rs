//! `spinchain-sim`: transverse-field Ising dynamics.
//!
//! Builds the TFIM Hamiltonian
//!
//!   H = J · Σ Z_i Z_{i+1} + h · Σ X_i
//!
//! for an open chain, synthesises one Trotter-Suzuki slice as a
//! `spinchain_ir::Circuit`, and drives a statevector through repeated
//! slices while recording per-site magnetisation after every step.
//!
//! # Quick start
//!
//! ```rust
//! use spinchain_sim::{EvolutionDriver, SimulationParameters};
//!
//! let params = SimulationParameters::from_duration(3, 1.0, 0.8, 1.0, 10.0);
//! let trajectory = EvolutionDriver::new(params).unwrap().run().unwrap();
//!
//! assert_eq!(trajectory.len(), 10);
//! assert_eq!(trajectory.snapshots()[0].magnetization.len(), 3);
//! ```

pub mod error;
pub mod evolution;
pub mod hamiltonian;
pub mod ising;
pub mod observable;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use evolution::{EvolutionDriver, InitialState};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use ising::{MAX_QUBITS, SimulationParameters, TrotterStep};
pub use observable::{ObservableMode, StateSnapshot, Trajectory};
pub use trotter::{TrotterEvolution, TrotterOrder};
