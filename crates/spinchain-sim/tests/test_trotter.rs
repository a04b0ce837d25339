//! Tests for Trotter product-formula synthesis.

use spinchain_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use spinchain_sim::trotter::{TrotterEvolution, TrotterOrder};
use spinchain_sim::{SimError, SimulationParameters, TrotterStep};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn empty_hamiltonian_returns_error() {
    let evol = TrotterEvolution::new(Hamiltonian::from_terms(vec![]), 1.0, 1);
    assert!(matches!(evol.first_order(), Err(SimError::EmptyHamiltonian)));
    assert!(matches!(evol.second_order(), Err(SimError::EmptyHamiltonian)));
    assert!(matches!(
        evol.slice(TrotterOrder::First),
        Err(SimError::EmptyHamiltonian)
    ));
}

#[test]
fn zero_steps_returns_error() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let evol = TrotterEvolution::new(h, 1.0, 0);
    assert!(matches!(evol.first_order(), Err(SimError::InvalidSteps(0))));
}

#[test]
fn qubit_out_of_range_returns_error() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(5, 1.0)]);
    let evol = TrotterEvolution::new(h, 1.0, 1).with_n_qubits(2);
    assert!(matches!(
        evol.first_order(),
        Err(SimError::QubitOutOfRange { .. })
    ));
}

// ---------------------------------------------------------------------------
// Circuit structure
// ---------------------------------------------------------------------------

#[test]
fn qubit_count_inferred() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::zz(0, 1, 1.0),
        HamiltonianTerm::z(2, -0.5),
    ]);
    let evol = TrotterEvolution::new(h, 1.0, 1);
    assert_eq!(evol.first_order().unwrap().num_qubits(), 3);
    assert_eq!(evol.second_order().unwrap().num_qubits(), 3);
}

#[test]
fn with_n_qubits_overrides_inferred_width() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let evol = TrotterEvolution::new(h, 1.0, 1).with_n_qubits(5);
    assert_eq!(evol.first_order().unwrap().num_qubits(), 5);
}

#[test]
fn more_steps_produce_deeper_circuit() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::zz(0, 1, 1.0),
        HamiltonianTerm::z(0, -0.5),
    ]);
    let circuit_1 = TrotterEvolution::new(h.clone(), 1.0, 1)
        .first_order()
        .unwrap();
    let circuit_4 = TrotterEvolution::new(h, 1.0, 4).first_order().unwrap();
    assert!(circuit_4.depth() > circuit_1.depth());
}

#[test]
fn full_circuit_repeats_slice() {
    let h = SimulationParameters::new(3, 1.0, 0.4, 1, 0.1).hamiltonian();
    let evol = TrotterEvolution::new(h, 1.0, 5).with_barriers(true);
    let slice = evol.slice(TrotterOrder::First).unwrap();
    let full = evol.circuit(TrotterOrder::First).unwrap();
    assert_eq!(full.gate_count(), 5 * slice.gate_count());
    assert!((evol.step_time() - 0.2).abs() < 1e-15);
}

#[test]
fn second_order_is_deeper_than_first_order() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::zz(0, 1, 1.0),
        HamiltonianTerm::z(0, -0.5),
    ]);
    let c1 = TrotterEvolution::new(h.clone(), 1.0, 1)
        .first_order()
        .unwrap();
    let c2 = TrotterEvolution::new(h, 1.0, 1).second_order().unwrap();
    assert!(c2.depth() > c1.depth());
}

#[test]
fn second_order_slice_is_symmetric() {
    let params = SimulationParameters::new(2, 1.0, 1.0, 1, 0.5).with_order(TrotterOrder::Second);
    let step = TrotterStep::build(&params).unwrap();
    let names: Vec<&str> = step.circuit().instructions().map(|i| i.name()).collect();
    assert_eq!(
        names,
        vec![
            "cx", "rz", "cx", "barrier", "rx", "rx", "barrier", // forward half
            "rx", "rx", "barrier", "cx", "rz", "cx", "barrier", // reverse half
        ]
    );
    let angles: Vec<f64> = step
        .circuit()
        .instructions()
        .filter_map(|i| i.as_gate().and_then(|g| g.angle()))
        .collect();
    assert!(angles.iter().all(|a| (a - 0.5).abs() < 1e-15));
}

#[test]
fn mixed_coupling_is_rejected() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
        0.5,
        PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::X)]),
    )]);
    let err = TrotterEvolution::new(h, 1.0, 1).first_order();
    assert!(matches!(err, Err(SimError::UnsupportedTerm(_))));
}

#[test]
fn barriers_are_off_by_default() {
    let h = SimulationParameters::new(3, 1.0, 0.4, 1, 0.1).hamiltonian();
    let circuit = TrotterEvolution::new(h, 1.0, 2).first_order().unwrap();
    assert!(circuit.instructions().all(|i| i.is_gate()));
}
