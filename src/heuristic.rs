//! Deterministic weighted-scan evaluator.
//!
//! Scores every legal move with a fixed formula (liberties, blocking,
//! connecting, center control, edge penalty) and keeps the first maximum in
//! row-major order, so repeated calls on an identical board always pick the
//! same cell. Read-only: the board is never touched.

use crate::board::{Board, Coord, Occupant};
use crate::constants::{
    CENTER_RADIUS, EVAL_BLOCK, EVAL_CENTER, EVAL_CONNECT, EVAL_EDGE_PENALTY, EVAL_LIBERTY,
    HIGH_LIBERTY_COUNT,
};

/// The rule-based agent.
pub struct HeuristicAgent {
    player: Occupant,
}

impl HeuristicAgent {
    pub fn new(player: Occupant) -> Self {
        Self { player }
    }

    pub fn player(&self) -> Occupant {
        self.player
    }

    /// Best-scoring legal move and its rationale, or `None` to pass.
    pub fn choose_move(&self, board: &Board, opponent: Occupant) -> (Option<Coord>, String) {
        let mut best: Option<(Coord, i32)> = None;
        for coord in board.legal_moves() {
            let score = self.evaluate(board, coord, opponent);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((coord, score));
            }
        }
        match best {
            Some((coord, score)) => (Some(coord), self.rationale(board, coord, opponent, score)),
            None => (None, "no legal moves available - pass".to_string()),
        }
    }

    fn evaluate(&self, board: &Board, coord: Coord, opponent: Occupant) -> i32 {
        let mut score = EVAL_LIBERTY * board.adjacent_count(coord, Occupant::Empty) as i32;
        score += EVAL_BLOCK * board.adjacent_count(coord, opponent) as i32;
        score += EVAL_CONNECT * board.adjacent_count(coord, self.player) as i32;
        let span = (board.size() - 1) as i32;
        score += EVAL_CENTER * (span - board.center_distance(coord) as i32);
        if board.is_edge(coord) {
            score -= EVAL_EDGE_PENALTY;
        }
        score
    }

    /// Names the sub-criteria that actually contributed to the choice.
    fn rationale(&self, board: &Board, coord: Coord, opponent: Occupant, score: i32) -> String {
        let mut reasons = Vec::new();

        let empty_adjacent = board.adjacent_count(coord, Occupant::Empty);
        if empty_adjacent >= HIGH_LIBERTY_COUNT {
            reasons.push(format!("high liberties ({empty_adjacent})"));
        }
        let enemy_adjacent = board.adjacent_count(coord, opponent);
        if enemy_adjacent > 0 {
            reasons.push(format!("blocks opponent ({enemy_adjacent} adj)"));
        }
        let friendly_adjacent = board.adjacent_count(coord, self.player);
        if friendly_adjacent > 0 {
            reasons.push(format!("connects stones ({friendly_adjacent} adj)"));
        }
        if board.center_distance(coord) <= CENTER_RADIUS {
            reasons.push("center control".to_string());
        }

        let (row, col) = coord;
        if reasons.is_empty() {
            format!("Move ({row},{col}): strategic position [score={score}]")
        } else {
            format!("Move ({row},{col}): {} [score={score}]", reasons.join(", "))
        }
    }
}
