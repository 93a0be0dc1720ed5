//! Stochastic feature-driven evaluator.
//!
//! Pipeline: extract three score deltas from the board, squash each into a
//! rotation angle, sample the decision circuit, reduce the joint outcome
//! frequencies to an entanglement score, classify the position as winning or
//! losing, and dispatch to an aggressive or defensive move scan. The
//! classification decides which heuristic runs, so a sampling failure
//! propagates instead of being papered over with a default move.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::Serialize;

use crate::board::{Board, Coord, Occupant};
use crate::circuit::{OutcomeCounts, Sampler, SimulationError};
use crate::constants::{
    ATTACK_CENTER_BASE, ATTACK_CENTER_STEP, ATTACK_CONNECT, ATTACK_EXPAND, DEFEND_BLOCK,
    DEFEND_BREATHE, DEFEND_EDGE_PENALTY, FEATURE_SCALE,
};

/// Raw score deltas between the evaluator's player and the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Features {
    pub territory_delta: i32,
    pub liberty_pressure: i32,
    pub connectivity_delta: i32,
}

impl Features {
    pub fn extract(board: &Board, player: Occupant, opponent: Occupant) -> Self {
        Self {
            territory_delta: board.territory(player) as i32 - board.territory(opponent) as i32,
            liberty_pressure: board.total_liberties(player) as i32
                - board.total_liberties(opponent) as i32,
            connectivity_delta: board.connectivity(player) as i32
                - board.connectivity(opponent) as i32,
        }
    }

    /// Rotation angles for the three feature qubits, each in `(0, π)`.
    pub fn angles(&self) -> [f64; 3] {
        [
            normalize_feature(self.territory_delta),
            normalize_feature(self.liberty_pressure),
            normalize_feature(self.connectivity_delta),
        ]
    }
}

/// Map a raw delta to an angle: `tanh(v / 10) * π/2 + π/2`.
///
/// Bounded to `(0, π)` regardless of magnitude; zero maps to `π/2`.
pub fn normalize_feature(value: i32) -> f64 {
    (f64::from(value) / FEATURE_SCALE).tanh() * FRAC_PI_2 + FRAC_PI_2
}

/// Correlation signal from the joint outcome frequencies, in `[-1, 1]`.
///
/// Positive when the ancillas tend to agree, negative when they tend to
/// disagree.
pub fn entanglement_score(probs: [f64; 4]) -> f64 {
    (probs[0] + probs[3]) - (probs[1] + probs[2])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Winning,
    Losing,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Winning => write!(f, "WINNING"),
            Classification::Losing => write!(f, "LOSING"),
        }
    }
}

/// Classify by entanglement score. Confidence lands in `[0, 100]` on both
/// branches.
pub fn classify(score: f64) -> (Classification, f64) {
    if score > 0.0 {
        (Classification::Winning, (score + 1.0) / 2.0 * 100.0)
    } else {
        (Classification::Losing, (1.0 - score.abs()) / 2.0 * 100.0)
    }
}

/// Everything one decision produced, for the caller to log or display.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    /// Chosen cell, or `None` to pass.
    pub choice: Option<Coord>,
    pub features: Features,
    pub counts: OutcomeCounts,
    /// `[p00, p01, p10, p11]`.
    pub probabilities: [f64; 4],
    pub entanglement_score: f64,
    pub classification: Classification,
    pub confidence: f64,
    pub strategy: &'static str,
    pub rationale: String,
}

/// The circuit-sampling agent.
pub struct QuantumAgent<S> {
    player: Occupant,
    sampler: S,
}

impl<S: Sampler> QuantumAgent<S> {
    pub fn new(player: Occupant, sampler: S) -> Self {
        Self { player, sampler }
    }

    pub fn player(&self) -> Occupant {
        self.player
    }

    /// Run the full pipeline and return the decision with its diagnostics.
    ///
    /// # Errors
    ///
    /// Propagates [`SimulationError`] from the sampling step.
    pub fn choose_move(
        &mut self,
        board: &Board,
        opponent: Occupant,
    ) -> Result<Decision, SimulationError> {
        let features = Features::extract(board, self.player, opponent);
        let counts = self.sampler.sample(features.angles())?;
        let probabilities = counts.probabilities()?;
        let score = entanglement_score(probabilities);
        let (classification, confidence) = classify(score);

        let (choice, strategy) = match classification {
            Classification::Winning => (
                aggressive_move(board, self.player),
                "expand territory and connectivity",
            ),
            Classification::Losing => (
                defensive_move(board, opponent),
                "block the opponent and keep liberties",
            ),
        };
        let rationale = match choice {
            Some(_) => format!("{classification} (conf={confidence:.1}%): {strategy}"),
            None => format!("{classification} (conf={confidence:.1}%): no legal moves"),
        };

        Ok(Decision {
            choice,
            features,
            counts,
            probabilities,
            entanglement_score: score,
            classification,
            confidence,
            strategy,
            rationale,
        })
    }
}

/// Grab the center and grow the own group.
fn aggressive_move(board: &Board, player: Occupant) -> Option<Coord> {
    let mut best: Option<(Coord, i32)> = None;
    for coord in board.legal_moves() {
        let mut score =
            ATTACK_CENTER_BASE - ATTACK_CENTER_STEP * board.center_distance(coord) as i32;
        score += ATTACK_CONNECT * board.adjacent_count(coord, player) as i32;
        score += ATTACK_EXPAND * board.adjacent_count(coord, Occupant::Empty) as i32;
        if best.is_none_or(|(_, b)| score > b) {
            best = Some((coord, score));
        }
    }
    best.map(|(coord, _)| coord)
}

/// Crowd the opponent and keep breathing room, away from the edge.
fn defensive_move(board: &Board, opponent: Occupant) -> Option<Coord> {
    let mut best: Option<(Coord, i32)> = None;
    for coord in board.legal_moves() {
        let mut score = DEFEND_BLOCK * board.adjacent_count(coord, opponent) as i32;
        score += DEFEND_BREATHE * board.adjacent_count(coord, Occupant::Empty) as i32;
        if board.is_edge(coord) {
            score -= DEFEND_EDGE_PENALTY;
        }
        if best.is_none_or(|(_, b)| score > b) {
            best = Some((coord, score));
        }
    }
    best.map(|(coord, _)| coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOARD_SIZE;
    use std::f64::consts::PI;

    /// Always returns the same tallies, whatever the angles.
    struct FixedSampler(OutcomeCounts);

    impl Sampler for FixedSampler {
        fn sample(&mut self, _angles: [f64; 3]) -> Result<OutcomeCounts, SimulationError> {
            Ok(self.0)
        }
    }

    struct FailingSampler;

    impl Sampler for FailingSampler {
        fn sample(&mut self, _angles: [f64; 3]) -> Result<OutcomeCounts, SimulationError> {
            Err(SimulationError::NoShots)
        }
    }

    fn correlated() -> OutcomeCounts {
        OutcomeCounts {
            zero_zero: 512,
            one_one: 512,
            ..OutcomeCounts::default()
        }
    }

    fn anti_correlated() -> OutcomeCounts {
        OutcomeCounts {
            zero_one: 512,
            one_zero: 512,
            ..OutcomeCounts::default()
        }
    }

    #[test]
    fn test_normalize_feature_bounds() {
        assert!((normalize_feature(0) - FRAC_PI_2).abs() < 1e-12);
        // tanh saturates in f64, so the extremes close on [0, π] exactly
        let high = normalize_feature(1_000);
        let low = normalize_feature(-1_000);
        assert!(high <= PI && high > 3.0);
        assert!(low >= 0.0 && low < 0.2);
    }

    #[test]
    fn test_classify_branches() {
        let (class, conf) = classify(1.0);
        assert_eq!(class, Classification::Winning);
        assert!((conf - 100.0).abs() < 1e-9);

        let (class, conf) = classify(0.0);
        assert_eq!(class, Classification::Losing);
        assert!((conf - 50.0).abs() < 1e-9);

        let (class, conf) = classify(-1.0);
        assert_eq!(class, Classification::Losing);
        assert!(conf.abs() < 1e-9);
    }

    #[test]
    fn test_winning_dispatches_aggressive() {
        let board = Board::new(BOARD_SIZE);
        let mut agent = QuantumAgent::new(Occupant::Quantum, FixedSampler(correlated()));
        let decision = agent.choose_move(&board, Occupant::Rules).unwrap();
        assert_eq!(decision.classification, Classification::Winning);
        assert!((decision.entanglement_score - 1.0).abs() < 1e-9);
        assert!((decision.confidence - 100.0).abs() < 1e-9);
        // aggressive scan grabs the center on an empty board
        assert_eq!(decision.choice, Some((2, 2)));
        assert!(decision.rationale.contains("WINNING"));
    }

    #[test]
    fn test_losing_dispatches_defensive() {
        let board = Board::new(BOARD_SIZE);
        let mut agent = QuantumAgent::new(Occupant::Quantum, FixedSampler(anti_correlated()));
        let decision = agent.choose_move(&board, Occupant::Rules).unwrap();
        assert_eq!(decision.classification, Classification::Losing);
        // defensive scan ties every interior cell; first row-major wins
        assert_eq!(decision.choice, Some((1, 1)));
        assert!(decision.rationale.contains("LOSING"));
    }

    #[test]
    fn test_defensive_prefers_crowding_the_opponent() {
        let mut board = Board::new(BOARD_SIZE);
        board.set((2, 2), Occupant::Rules);
        let mut agent = QuantumAgent::new(Occupant::Quantum, FixedSampler(anti_correlated()));
        let decision = agent.choose_move(&board, Occupant::Rules).unwrap();
        // first of the four cells adjacent to the lone opponent stone
        assert_eq!(decision.choice, Some((1, 2)));
    }

    #[test]
    fn test_feature_extraction_deltas() {
        let mut board = Board::new(BOARD_SIZE);
        board.set((2, 2), Occupant::Quantum);
        board.set((0, 0), Occupant::Rules);
        let features = Features::extract(&board, Occupant::Quantum, Occupant::Rules);
        assert_eq!(features.territory_delta, 2);
        assert_eq!(features.liberty_pressure, 2);
        assert_eq!(features.connectivity_delta, 0);
    }

    #[test]
    fn test_pass_when_board_is_full() {
        let mut board = Board::new(2);
        for row in 0..2 {
            for col in 0..2 {
                board.set((row, col), Occupant::Rules);
            }
        }
        let mut agent = QuantumAgent::new(Occupant::Quantum, FixedSampler(correlated()));
        let decision = agent.choose_move(&board, Occupant::Rules).unwrap();
        assert_eq!(decision.choice, None);
        assert!(decision.rationale.contains("no legal moves"));
    }

    #[test]
    fn test_sampler_failure_propagates() {
        let board = Board::new(BOARD_SIZE);
        let mut agent = QuantumAgent::new(Occupant::Quantum, FailingSampler);
        assert_eq!(
            agent.choose_move(&board, Occupant::Rules).unwrap_err(),
            SimulationError::NoShots
        );
    }
}
