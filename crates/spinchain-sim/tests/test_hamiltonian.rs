//! Tests for Hamiltonian data structures.

use spinchain_sim::SimulationParameters;
use spinchain_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_drops_identity() {
    let ps = PauliString::from_ops([(0, PauliOp::I), (1, PauliOp::Z)]);
    assert_eq!(ps.ops().len(), 1);
    assert_eq!(ps.ops()[0], (1, PauliOp::Z));
    assert_eq!(ps.weight(), 1);
}

#[test]
fn pauli_string_sorted_by_qubit() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::Z), (0, PauliOp::X)]);
    let qubits: Vec<u32> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 1, 3]);
    assert_eq!(ps.to_string(), "X0 Z1 X3");
}

#[test]
fn pauli_string_identity_is_empty() {
    let ps = PauliString::from_ops([] as [(u32, PauliOp); 0]);
    assert!(ps.is_identity());
    assert_eq!(ps.max_qubit(), None);
    assert_eq!(ps.to_string(), "I");
}

#[test]
fn pauli_string_zz() {
    let ps = PauliString::zz([2u32, 0, 4]);
    let qubits: Vec<u32> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 2, 4]);
    assert!(ps.ops().iter().all(|(_, op)| *op == PauliOp::Z));
}

// ---------------------------------------------------------------------------
// HamiltonianTerm shorthands
// ---------------------------------------------------------------------------

#[test]
fn term_shorthands() {
    let t = HamiltonianTerm::z(3, -0.5);
    assert!((t.coeff - (-0.5)).abs() < 1e-15);
    assert_eq!(t.pauli.ops(), &[(3, PauliOp::Z)]);

    assert_eq!(HamiltonianTerm::x(2, 0.3).pauli.ops(), &[(2, PauliOp::X)]);

    let zz = HamiltonianTerm::zz(0, 1, 1.0);
    assert_eq!(zz.pauli.ops(), &[(0, PauliOp::Z), (1, PauliOp::Z)]);
    assert_eq!(zz.to_string(), "+1.0000·Z0 Z1");
}

// ---------------------------------------------------------------------------
// Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn hamiltonian_min_qubits() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::z(0, 1.0),
        HamiltonianTerm::zz(2, 4, 0.5),
    ]);
    assert_eq!(h.min_qubits(), 5);
    assert_eq!(Hamiltonian::default().min_qubits(), 0);
}

#[test]
fn hamiltonian_from_iter() {
    let h: Hamiltonian = vec![HamiltonianTerm::z(0, 1.0), HamiltonianTerm::x(1, -0.5)]
        .into_iter()
        .collect();
    assert_eq!(h.n_terms(), 2);
}

// ---------------------------------------------------------------------------
// Transverse-field Ising chain
// ---------------------------------------------------------------------------

#[test]
fn ising_chain_term_counts() {
    for n in 1..=6u32 {
        let h = SimulationParameters::new(n, 1.0, 1.2, 1, 0.1).hamiltonian();
        let couplings = h.terms().iter().filter(|t| t.pauli.weight() == 2).count();
        let fields = h.terms().iter().filter(|t| t.pauli.weight() == 1).count();
        assert_eq!(couplings, n as usize - 1);
        assert_eq!(fields, n as usize);
        assert_eq!(h.min_qubits(), n);
    }
}

#[test]
fn ising_coefficients_follow_parameters() {
    let h = SimulationParameters::new(4, -1.0, 1.2, 1, 0.1).hamiltonian();
    for term in h.terms() {
        match term.pauli.weight() {
            2 => assert_eq!(term.coeff, -1.0),
            1 => {
                assert_eq!(term.coeff, 1.2);
                assert_eq!(term.pauli.ops()[0].1, PauliOp::X);
            }
            w => panic!("unexpected weight {w}"),
        }
    }
}
