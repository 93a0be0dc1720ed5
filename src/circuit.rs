//! Statevector simulation of the fixed 5-qubit decision circuit.
//!
//! The stochastic evaluator encodes three board features as RY rotation
//! angles, wires the feature qubits to two ancillas through CNOTs, and reads
//! joint outcome statistics off the ancillas. Sampling sits behind the
//! [`Sampler`] trait so the decision pipeline can be driven by a
//! deterministic stub in tests, independent of the simulation itself.
//!
//! Circuit layout (qubits 0-2 = features, 3-4 = ancillas):
//!
//! ```text
//! q0: RY(a0) --o-----------------
//! q1: RY(a1) --|--o--------------
//! q2: RY(a2) --|--|--o-----------
//! q3: H -------X--|--X--H--o--H--  measure
//! q4: H ----------X--------X-----  measure
//! ```

use std::f64::consts::FRAC_1_SQRT_2;

use serde::Serialize;
use thiserror::Error;

/// Qubits in the decision circuit: three features plus two ancillas.
const QUBITS: usize = 5;

/// First ancilla (measured as the low outcome bit).
const ANCILLA0: usize = 3;

/// Second ancilla (measured as the high outcome bit).
const ANCILLA1: usize = 4;

/// Tolerance on the statevector norm before sampling is refused.
const NORM_TOLERANCE: f64 = 1e-6;

/// Sampling could not run or produced invalid statistics.
///
/// Fatal to the decision attempt: callers propagate it instead of silently
/// falling back to a different move-selection path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("sampler produced zero shots")]
    NoShots,
    #[error("statevector norm drifted to {norm}")]
    NormDrift { norm: f64 },
}

/// Tallies of the four joint ancilla outcomes.
///
/// Field names read high-bit-first: `one_zero` is ancilla 1 measured 1 and
/// ancilla 0 measured 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    #[serde(rename = "00")]
    pub zero_zero: u32,
    #[serde(rename = "01")]
    pub zero_one: u32,
    #[serde(rename = "10")]
    pub one_zero: u32,
    #[serde(rename = "11")]
    pub one_one: u32,
}

impl OutcomeCounts {
    pub fn total(&self) -> u32 {
        self.zero_zero + self.zero_one + self.one_zero + self.one_one
    }

    /// Outcome frequencies `[p00, p01, p10, p11]`, summing to 1.
    pub fn probabilities(&self) -> Result<[f64; 4], SimulationError> {
        let total = self.total();
        if total == 0 {
            return Err(SimulationError::NoShots);
        }
        let total = f64::from(total);
        Ok([
            f64::from(self.zero_zero) / total,
            f64::from(self.zero_one) / total,
            f64::from(self.one_zero) / total,
            f64::from(self.one_one) / total,
        ])
    }

    fn tally(&mut self, outcome: usize) {
        match outcome {
            0 => self.zero_zero += 1,
            1 => self.zero_one += 1,
            2 => self.one_zero += 1,
            _ => self.one_one += 1,
        }
    }
}

/// Source of joint outcome statistics for the decision circuit.
pub trait Sampler {
    /// Run the circuit biased by the three feature angles and tally the
    /// measured ancilla outcomes.
    fn sample(&mut self, angles: [f64; 3]) -> Result<OutcomeCounts, SimulationError>;
}

/// Real-amplitude statevector.
///
/// Every gate used here (RY, H, CNOT) has a real matrix, so complex
/// amplitudes are unnecessary.
pub struct Statevector {
    amp: Vec<f64>,
}

impl Statevector {
    /// The all-zeros basis state on `qubits` qubits.
    pub fn new(qubits: usize) -> Self {
        let mut amp = vec![0.0; 1 << qubits];
        amp[0] = 1.0;
        Self { amp }
    }

    fn apply(&mut self, qubit: usize, m: [[f64; 2]; 2]) {
        let bit = 1usize << qubit;
        for i in 0..self.amp.len() {
            if i & bit == 0 {
                let j = i | bit;
                let (a, b) = (self.amp[i], self.amp[j]);
                self.amp[i] = m[0][0] * a + m[0][1] * b;
                self.amp[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Rotation around Y by `theta`.
    pub fn ry(&mut self, qubit: usize, theta: f64) {
        let (sin, cos) = (theta / 2.0).sin_cos();
        self.apply(qubit, [[cos, -sin], [sin, cos]]);
    }

    /// Hadamard.
    pub fn h(&mut self, qubit: usize) {
        let r = FRAC_1_SQRT_2;
        self.apply(qubit, [[r, r], [r, -r]]);
    }

    /// Controlled NOT.
    pub fn cx(&mut self, control: usize, target: usize) {
        let (c, t) = (1usize << control, 1usize << target);
        for i in 0..self.amp.len() {
            if i & c != 0 && i & t == 0 {
                self.amp.swap(i, i | t);
            }
        }
    }

    /// Sum of squared amplitudes; 1 up to rounding for a valid state.
    pub fn norm(&self) -> f64 {
        self.amp.iter().map(|a| a * a).sum()
    }

    /// Probability that `qubit` measures 1.
    pub fn prob_one(&self, qubit: usize) -> f64 {
        let bit = 1usize << qubit;
        self.amp
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a * a)
            .sum()
    }

    /// Marginal distribution of two qubits; outcome index is
    /// `hi_bit << 1 | lo_bit`.
    pub fn joint_distribution(&self, lo: usize, hi: usize) -> [f64; 4] {
        let mut dist = [0.0; 4];
        for (i, a) in self.amp.iter().enumerate() {
            let outcome = ((i >> hi & 1) << 1) | (i >> lo & 1);
            dist[outcome] += a * a;
        }
        dist
    }
}

/// Samples the decision circuit with a seedable RNG.
pub struct CircuitSampler {
    rng: fastrand::Rng,
    shots: u32,
}

impl CircuitSampler {
    pub fn new(shots: u32) -> Self {
        Self {
            rng: fastrand::Rng::new(),
            shots,
        }
    }

    /// Reproducible sampler for replays and tests.
    pub fn with_seed(shots: u32, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            shots,
        }
    }

    fn build(angles: [f64; 3]) -> Statevector {
        let mut sv = Statevector::new(QUBITS);
        for (qubit, &angle) in angles.iter().enumerate() {
            sv.ry(qubit, angle);
        }
        sv.h(ANCILLA0);
        sv.h(ANCILLA1);
        sv.cx(0, ANCILLA0);
        sv.cx(1, ANCILLA1);
        sv.cx(2, ANCILLA0);
        sv.h(ANCILLA0);
        sv.cx(ANCILLA0, ANCILLA1);
        sv.h(ANCILLA0);
        sv
    }
}

impl Sampler for CircuitSampler {
    fn sample(&mut self, angles: [f64; 3]) -> Result<OutcomeCounts, SimulationError> {
        if self.shots == 0 {
            return Err(SimulationError::NoShots);
        }
        let sv = Self::build(angles);
        let norm = sv.norm();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimulationError::NormDrift { norm });
        }
        let dist = sv.joint_distribution(ANCILLA0, ANCILLA1);
        let mut counts = OutcomeCounts::default();
        for _ in 0..self.shots {
            let mut r = self.rng.f64();
            // rounding slack falls into the last bucket
            let mut outcome = 3;
            for (k, p) in dist.iter().enumerate() {
                if r < *p {
                    outcome = k;
                    break;
                }
                r -= p;
            }
            counts.tally(outcome);
        }
        Ok(counts)
    }
}
