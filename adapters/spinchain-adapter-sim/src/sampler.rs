//! Shot-count histograms.

use rustc_hash::FxHashMap;

/// Histogram of sampled measurement outcomes.
///
/// Keys are basis indices using the same bit layout as [`crate::Statevector`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotCounts {
    counts: FxHashMap<usize, u32>,
    shots: u32,
    num_qubits: usize,
}

impl ShotCounts {
    /// Create an empty histogram for `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            counts: FxHashMap::default(),
            shots: 0,
            num_qubits,
        }
    }

    pub(crate) fn record(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Number of qubits measured per shot.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// How often `outcome` was observed.
    pub fn get(&self, outcome: usize) -> u32 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Iterate over `(outcome, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Estimated ⟨Z_q⟩ = (n₀ − n₁) / shots.
    pub fn marginal_z(&self, qubit: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let mask = 1 << qubit;
        let (zeros, ones) = self.counts.iter().fold((0u64, 0u64), |(z, o), (&k, &v)| {
            if k & mask == 0 {
                (z + u64::from(v), o)
            } else {
                (z, o + u64::from(v))
            }
        });
        (zeros as f64 - ones as f64) / f64::from(self.shots)
    }

    /// Estimated ⟨Z_q⟩ for every qubit.
    pub fn magnetization(&self) -> Vec<f64> {
        (0..self.num_qubits).map(|q| self.marginal_z(q)).collect()
    }
}
