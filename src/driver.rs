//! Match driver: owns one game, alternates the agents, records events.
//!
//! The driver is the only writer of its [`GameState`]. It checks the terminal
//! flag before every action (the engine itself does not), passes for an agent
//! whose chosen move is rejected as suicide, and appends a tagged event for
//! everything that happens. Human play goes through [`MatchDriver::play_human`]
//! or the line-based [`MatchDriver::run_interactive`] loop.

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::board::{Coord, MoveError, Occupant};
use crate::circuit::CircuitSampler;
use crate::game::{GameConfig, GameEvent, GameMode, GameState, Winner};
use crate::heuristic::HeuristicAgent;
use crate::quantum::QuantumAgent;

pub struct MatchDriver {
    state: GameState,
    quantum: QuantumAgent<CircuitSampler>,
    rules: HeuristicAgent,
}

impl MatchDriver {
    pub fn new(mode: GameMode, config: GameConfig, sampler: CircuitSampler) -> Self {
        let mut state = GameState::with_config(mode, config);
        state.record(GameEvent::Started { mode });
        info!(mode = mode.label(), "new game");
        Self {
            state,
            quantum: QuantumAgent::new(Occupant::Quantum, sampler),
            rules: HeuristicAgent::new(Occupant::Rules),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// One move by the current autonomous agent.
    ///
    /// # Errors
    ///
    /// Fails on a terminated game, on a human turn, or when sampling fails;
    /// a sampling failure is never masked with a fallback move.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_over() {
            bail!("game is already over");
        }
        let player = self.state.current_player();
        let opponent = self.state.opponent();
        match player {
            Occupant::Quantum => {
                let decision = self
                    .quantum
                    .choose_move(self.state.board(), opponent)
                    .context("circuit sampling failed")?;
                info!(
                    player = player.name(),
                    classification = %decision.classification,
                    confidence = decision.confidence,
                    entanglement = decision.entanglement_score,
                    "position classified"
                );
                self.resolve(player, decision.choice, decision.rationale);
            }
            Occupant::Rules => {
                let (choice, rationale) = self.rules.choose_move(self.state.board(), opponent);
                self.resolve(player, choice, rationale);
            }
            Occupant::Human => bail!("waiting for a human move"),
            Occupant::Empty => unreachable!("empty cells never hold a turn"),
        }
        self.finish_turn();
        Ok(())
    }

    /// Apply an agent's choice: place, or pass when there is no choice or the
    /// placement turns out to be suicide.
    fn resolve(&mut self, player: Occupant, choice: Option<Coord>, rationale: String) {
        let turn = self.state.turn_count() + 1;
        let Some(coord) = choice else {
            info!(player = player.name(), "pass");
            self.state.pass_turn();
            self.state.record(GameEvent::Passed {
                turn,
                player,
                rationale,
            });
            return;
        };
        match self.state.try_move(coord, player) {
            Ok(captured) => {
                info!(
                    player = player.name(),
                    coord = ?coord,
                    captures = captured.len(),
                    "move applied"
                );
                self.state.record(GameEvent::MoveApplied {
                    turn,
                    player,
                    coord,
                    captured,
                    scores: self.state.scores(),
                    rationale,
                });
            }
            Err(err @ MoveError::Suicide { .. }) => {
                warn!(player = player.name(), error = %err, "passing instead");
                self.state.record(GameEvent::SuicideRejected {
                    turn,
                    player,
                    coord,
                });
                self.state.pass_turn();
                self.state.record(GameEvent::Passed {
                    turn,
                    player,
                    rationale,
                });
            }
            Err(err) => {
                // agents only propose empty in-bounds cells, so this is a bug
                // in the evaluator rather than a game situation; pass anyway
                warn!(player = player.name(), error = %err, "rejected move, passing instead");
                self.state.pass_turn();
                self.state.record(GameEvent::Passed {
                    turn,
                    player,
                    rationale,
                });
            }
        }
    }

    fn finish_turn(&mut self) {
        self.state.advance_turn();
        if !self.state.check_game_over() {
            return;
        }
        if let Some(winner) = self.state.winner() {
            info!(winner = %winner, turns = self.state.turn_count(), "game over");
            self.state.record(GameEvent::Ended { winner });
        }
    }

    /// Apply an externally supplied move for the current player.
    ///
    /// # Errors
    ///
    /// [`MoveError`] variants are recoverable: the game is unchanged and the
    /// caller may retry with another coordinate or pass.
    pub fn play_human(&mut self, coord: Coord) -> Result<Vec<Coord>, MoveError> {
        let player = self.state.current_player();
        let turn = self.state.turn_count() + 1;
        match self.state.try_move(coord, player) {
            Ok(captured) => {
                self.state.record(GameEvent::MoveApplied {
                    turn,
                    player,
                    coord,
                    captured: captured.clone(),
                    scores: self.state.scores(),
                    rationale: "human move".to_string(),
                });
                self.finish_turn();
                Ok(captured)
            }
            Err(err) => {
                if matches!(err, MoveError::Suicide { .. }) {
                    self.state.record(GameEvent::SuicideRejected {
                        turn,
                        player,
                        coord,
                    });
                }
                Err(err)
            }
        }
    }

    /// Pass for the current player.
    pub fn pass_human(&mut self) {
        let player = self.state.current_player();
        let turn = self.state.turn_count() + 1;
        self.state.pass_turn();
        self.state.record(GameEvent::Passed {
            turn,
            player,
            rationale: "pass".to_string(),
        });
        self.finish_turn();
    }

    /// Drive an AI-vs-AI game to completion and return the winner.
    pub fn run(&mut self) -> Result<Winner> {
        while !self.state.is_over() {
            self.step()?;
        }
        self.state
            .winner()
            .context("terminated game without a winner")
    }

    /// Line-based human-vs-AI loop over stdin: `row col`, `pass`, or `quit`.
    pub fn run_interactive(&mut self) -> Result<()> {
        if self.state.mode() != GameMode::HumanVsAi {
            bail!("interactive play requires the human-vs-AI mode");
        }
        println!(
            "You are {}. Enter moves as `row col`, `pass`, or `quit`.",
            Occupant::Human.name()
        );
        println!("{}", self.state.board());

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") {
                break;
            }

            let seen = self.state.log().len();
            if input.eq_ignore_ascii_case("pass") {
                self.pass_human();
            } else {
                let Some(coord) = parse_coord(input) else {
                    println!("expected `row col`, `pass`, or `quit`");
                    continue;
                };
                if let Err(err) = self.play_human(coord) {
                    println!("illegal move: {err}");
                    continue;
                }
            }

            while !self.state.is_over() && self.state.current_player() == Occupant::Quantum {
                self.step()?;
            }

            for event in &self.state.log()[seen..] {
                println!("{event}");
            }
            println!("{}", self.state.board());
            if self.state.is_over() {
                break;
            }
        }
        Ok(())
    }
}

/// Parse `row col` with both numbers in decimal.
fn parse_coord(input: &str) -> Option<Coord> {
    let mut parts = input.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("2 3"), Some((2, 3)));
        assert_eq!(parse_coord("  0   4 "), Some((0, 4)));
        assert_eq!(parse_coord("2"), None);
        assert_eq!(parse_coord("2 3 4"), None);
        assert_eq!(parse_coord("a b"), None);
    }
}
