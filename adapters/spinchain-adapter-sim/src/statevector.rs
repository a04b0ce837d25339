//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

use spinchain_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::{StateError, StateResult};
use crate::sampler::ShotCounts;

/// Widest register the engine will allocate: 2^24 amplitudes, 256 MiB.
pub const MAX_QUBITS: usize = 24;

/// A statevector representing a quantum state.
///
/// Basis index bit `q` holds the value of qubit `q` (little-endian), so
/// `|100⟩` on three qubits, with qubit 0 flipped, is index `0b001`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Fails with [`StateError::TooManyQubits`] above [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> StateResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max: MAX_QUBITS,
            });
        }
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Create a computational basis state `|index⟩`.
    pub fn from_basis(num_qubits: usize, index: usize) -> StateResult<Self> {
        let mut state = Self::new(num_qubits)?;
        if index >= state.amplitudes.len() {
            return Err(StateError::BasisOutOfRange { index, num_qubits });
        }
        state.amplitudes[0] = Complex64::new(0.0, 0.0);
        state.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(state)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm of the state; 1 up to rounding.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Basis-state probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Run every instruction of `circuit` in application order.
    pub fn run(&mut self, circuit: &Circuit) -> StateResult<()> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(StateError::WidthMismatch {
                circuit: circuit.num_qubits(),
                state: self.num_qubits,
            });
        }
        for instruction in circuit.instructions() {
            self.apply(instruction)?;
        }
        trace!(circuit = circuit.name(), "applied circuit to statevector");
        Ok(())
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) -> StateResult<()> {
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        if let Some(&qubit) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(StateError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        match &instruction.kind {
            InstructionKind::Gate(gate) => self.apply_standard_gate(gate, &qubits),
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    /// Apply a standard gate. Operand count was validated when the
    /// instruction entered the circuit.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], theta),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], theta),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
        }
    }

    // =========================================================================
    // Observables
    // =========================================================================

    /// ⟨Z_q⟩ = P(q = 0) − P(q = 1).
    pub fn expectation_z(&self, qubit: usize) -> StateResult<f64> {
        if qubit >= self.num_qubits {
            return Err(StateError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        let mask = 1 << qubit;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, amp)| {
                let p = amp.norm_sqr();
                if i & mask == 0 { p } else { -p }
            })
            .sum())
    }

    /// ⟨Z_q⟩ for every qubit, indexed by qubit.
    pub fn magnetization(&self) -> Vec<f64> {
        let mut z = vec![0.0; self.num_qubits];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            for (q, zq) in z.iter_mut().enumerate() {
                if i & (1 << q) == 0 {
                    *zq += p;
                } else {
                    *zq -= p;
                }
            }
        }
        z
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Sample a measurement outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1.
        self.amplitudes.len() - 1
    }

    /// Sample `shots` measurement outcomes of all qubits.
    pub fn sample_counts<R: Rng + ?Sized>(
        &self,
        shots: u32,
        rng: &mut R,
    ) -> StateResult<ShotCounts> {
        if shots == 0 {
            return Err(StateError::NoShots);
        }
        let mut counts = ShotCounts::new(self.num_qubits);
        for _ in 0..shots {
            counts.record(self.sample(rng));
        }
        Ok(counts)
    }

    /// Convert measurement outcome to bitstring, qubit 0 first.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
            .chars()
            .rev()
            .collect()
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spinchain_ir::QubitId;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_register_width_is_bounded() {
        assert!(Statevector::new(MAX_QUBITS + 1).is_err());
        assert!(matches!(
            Statevector::from_basis(64, 0),
            Err(StateError::TooManyQubits { num_qubits: 64, .. })
        ));
    }

    #[test]
    fn test_from_basis() {
        let sv = Statevector::from_basis(3, 0b001).unwrap();
        assert_eq!(sv.magnetization(), vec![-1.0, 1.0, 1.0]);

        assert!(matches!(
            Statevector::from_basis(2, 4),
            Err(StateError::BasisOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_rx_rotates_z_expectation() {
        let theta = 0.7;
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_rx(0, theta);
        assert!((sv.expectation_z(0).unwrap() - theta.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_rx_then_cx_entangles() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_rx(0, PI / 2.0);
        sv.apply_cx(0, 1);

        let r = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(r, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, -r)));
    }

    #[test]
    fn test_cx_rz_cx_is_zz_phase() {
        let theta = 0.4;
        let mut prepared = Statevector::new(2).unwrap();
        prepared.apply_rx(0, 1.3);
        prepared.apply_rx(1, 0.9);

        let mut ladder = prepared.clone();
        ladder.apply_cx(0, 1);
        ladder.apply_rz(1, theta);
        ladder.apply_cx(0, 1);

        // exp(-i θ/2 Z⊗Z): even parity picks up e^{-iθ/2}, odd parity e^{+iθ/2}.
        for (i, (a, b)) in ladder.amplitudes().iter().zip(prepared.amplitudes()).enumerate() {
            let odd = ((i & 1) ^ ((i >> 1) & 1)) == 1;
            let phase = Complex64::from_polar(1.0, if odd { theta / 2.0 } else { -theta / 2.0 });
            assert!(approx_eq(*a, phase * b));
        }
    }

    #[test]
    fn test_run_circuit() {
        let mut circuit = Circuit::with_size("flip", 2);
        circuit.rx(PI, QubitId(1)).unwrap().barrier_all().unwrap();

        let mut sv = Statevector::new(2).unwrap();
        sv.run(&circuit).unwrap();
        let z = sv.magnetization();
        assert!((z[0] - 1.0).abs() < 1e-12);
        assert!((z[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_width_mismatch() {
        let circuit = Circuit::with_size("wide", 3);
        let mut sv = Statevector::new(2).unwrap();
        assert!(matches!(
            sv.run(&circuit),
            Err(StateError::WidthMismatch {
                circuit: 3,
                state: 2
            })
        ));
    }

    #[test]
    fn test_expectation_out_of_range() {
        let sv = Statevector::new(2).unwrap();
        assert!(matches!(
            sv.expectation_z(2),
            Err(StateError::QubitOutOfRange { qubit: 2, .. })
        ));
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1
        let sv = Statevector::from_basis(1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_sample_counts_reproducible_with_seed() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_rx(0, PI / 2.0);
        sv.apply_rx(1, 1.1);

        let a = sv
            .sample_counts(512, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = sv
            .sample_counts(512, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shots(), 512);
    }

    #[test]
    fn test_sample_counts_rejects_zero_shots() {
        let sv = Statevector::new(1).unwrap();
        assert!(matches!(
            sv.sample_counts(0, &mut StdRng::seed_from_u64(0)),
            Err(StateError::NoShots)
        ));
    }

    #[test]
    fn test_outcome_to_bitstring() {
        let sv = Statevector::new(3).unwrap();
        assert_eq!(sv.outcome_to_bitstring(0b001), "100");
        assert_eq!(sv.outcome_to_bitstring(0b110), "011");
    }
}
