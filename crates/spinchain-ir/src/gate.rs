//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates a transverse-field Ising slice is built from.
///
/// Rotation angles are concrete radians: a Trotter slice is fully determined
/// by the model parameters, so there is nothing left to bind symbolically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Rotation around X axis: `exp(-i θ/2 X)`.
    Rx(f64),
    /// Rotation around Z axis: `exp(-i θ/2 Z)`.
    Rz(f64),
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::Rx(_) => "rx",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Rx(_) | StandardGate::Rz(_) => 1,
            StandardGate::CX => 2,
        }
    }

    /// The rotation angle, for rotation gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Rz(theta) => Some(*theta),
            StandardGate::CX => None,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(theta) => write!(f, "{}({theta:.6})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::Rz(0.1).num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);

        assert_eq!(StandardGate::CX.angle(), None);
        assert_eq!(StandardGate::Rx(PI).angle(), Some(PI));
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(StandardGate::CX.to_string(), "cx");
        assert_eq!(StandardGate::Rz(0.5).to_string(), "rz(0.500000)");
    }
}
