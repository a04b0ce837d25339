//! Pauli-string exponentiation.
//!
//! Emits the gate sequence for
//!
//!   exp(-i · coeff · t · P)
//!
//! Single-qubit strings map onto one native rotation
//! (`X → Rx`, `Z → Rz`, both with angle `2·coeff·t`).
//!
//! Z-only strings of any length use the parity identity
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//! For a nearest-neighbour `Z_i Z_{i+1}` coupling this is exactly
//! `CX(i, i+1) · Rz(2·coeff·t) on i+1 · CX(i, i+1)`.

use spinchain_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{HamiltonianTerm, PauliOp};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// `n_qubits` is the total width of the circuit (used for bounds checking
/// only; the circuit must already have been allocated with that many qubits).
///
/// If the Pauli string is the identity operator the function is a no-op
/// (global phase, unobservable). Multi-qubit strings must be all-Z; anything
/// else is [`SimError::UnsupportedTerm`].
pub fn append_exp_pauli(
    circuit: &mut Circuit,
    term: &HamiltonianTerm,
    t: f64,
    n_qubits: u32,
) -> SimResult<()> {
    let ops = term.pauli.ops();

    for &(q, _) in ops {
        if q >= n_qubits {
            return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
        }
    }

    // Rz(θ) implements exp(-i θ/2 Z)
    let theta = 2.0 * term.coeff * t;

    match ops {
        [] => {}
        &[(q, op)] => {
            let qid = QubitId(q);
            match op {
                PauliOp::X => {
                    circuit.rx(theta, qid)?;
                }
                PauliOp::Z => {
                    circuit.rz(theta, qid)?;
                }
                PauliOp::I => {}
            }
        }
        [.., (last, _)] => {
            if ops.iter().any(|(_, op)| *op != PauliOp::Z) {
                return Err(SimError::UnsupportedTerm(term.pauli.to_string()));
            }
            let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();

            cnot_ladder(circuit, &qubits)?;
            circuit.rz(theta, QubitId(*last))?;
            cnot_ladder_reverse(circuit, &qubits)?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Forward CNOT ladder: CX(q[0],q[1]), CX(q[1],q[2]), …, CX(q[k-2], q[k-1]).
///
/// Accumulates the parity of all qubits onto the last one.
fn cnot_ladder(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2) {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

/// The ladder run backwards undoes the forward ladder.
fn cnot_ladder_reverse(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2).rev() {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::PauliString;
    use spinchain_ir::StandardGate;

    fn gates(circuit: &Circuit) -> Vec<StandardGate> {
        circuit
            .instructions()
            .filter_map(|inst| inst.as_gate().copied())
            .collect()
    }

    #[test]
    fn test_single_x_is_native_rx() {
        let mut circuit = Circuit::with_size("x", 1);
        append_exp_pauli(&mut circuit, &HamiltonianTerm::x(0, 1.2), 0.5, 1).unwrap();
        assert_eq!(gates(&circuit), vec![StandardGate::Rx(1.2)]);
    }

    #[test]
    fn test_single_z_is_native_rz() {
        let mut circuit = Circuit::with_size("z", 2);
        append_exp_pauli(&mut circuit, &HamiltonianTerm::z(1, -0.5), 1.0, 2).unwrap();
        assert_eq!(gates(&circuit), vec![StandardGate::Rz(-1.0)]);
    }

    #[test]
    fn test_zz_is_cx_rz_cx() {
        let mut circuit = Circuit::with_size("zz", 3);
        append_exp_pauli(&mut circuit, &HamiltonianTerm::zz(1, 2, 1.0), 0.25, 3).unwrap();
        assert_eq!(
            gates(&circuit),
            vec![StandardGate::CX, StandardGate::Rz(0.5), StandardGate::CX]
        );
        let rz = circuit.instructions().nth(1).unwrap();
        assert_eq!(rz.qubits, vec![QubitId(2)]);
    }

    #[test]
    fn test_zzz_ladder_accumulates_parity_on_last_qubit() {
        let mut circuit = Circuit::with_size("zzz", 3);
        let term = HamiltonianTerm::new(0.5, PauliString::zz([0, 1, 2]));
        append_exp_pauli(&mut circuit, &term, 1.0, 3).unwrap();
        let ops: Vec<_> = circuit
            .instructions()
            .map(|inst| (inst.name(), inst.qubits.clone()))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("cx", vec![QubitId(0), QubitId(1)]),
                ("cx", vec![QubitId(1), QubitId(2)]),
                ("rz", vec![QubitId(2)]),
                ("cx", vec![QubitId(1), QubitId(2)]),
                ("cx", vec![QubitId(0), QubitId(1)]),
            ]
        );
    }

    #[test]
    fn test_mixed_multi_qubit_term_is_rejected() {
        let mut circuit = Circuit::with_size("xz", 2);
        let term = HamiltonianTerm::new(
            0.5,
            PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Z)]),
        );
        let err = append_exp_pauli(&mut circuit, &term, 1.0, 2);
        assert!(matches!(err, Err(SimError::UnsupportedTerm(ref s)) if s == "X0 Z1"));
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_identity_is_noop() {
        let mut circuit = Circuit::with_size("id", 2);
        let term = HamiltonianTerm::new(3.0, PauliString::from_ops([(0, PauliOp::I)]));
        append_exp_pauli(&mut circuit, &term, 1.0, 2).unwrap();
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let mut circuit = Circuit::with_size("oob", 2);
        let err = append_exp_pauli(&mut circuit, &HamiltonianTerm::zz(1, 2, 1.0), 1.0, 2);
        assert!(matches!(
            err,
            Err(SimError::QubitOutOfRange {
                qubit: 2,
                n_qubits: 2
            })
        ));
    }
}
