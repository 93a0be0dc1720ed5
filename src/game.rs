//! Game state: player pairing, turn rotation, termination, and the event log.
//!
//! [`GameState`] owns one [`Board`] plus the counters that decide when the
//! game ends. It is mutated by exactly one caller at a time; the terminal
//! state is absorbing, but the engine does not self-guard against
//! post-terminal mutation; callers check [`GameState::is_over`] first.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Coord, MoveError, Occupant, ScoreBreakdown};
use crate::constants::{BOARD_SIZE, MAX_TURNS, PASS_LIMIT};

/// Which pairing plays, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameMode {
    /// Stochastic agent vs rule-based agent; the stochastic agent opens.
    AiVsAi,
    /// Human vs stochastic agent; the human opens.
    HumanVsAi,
}

impl GameMode {
    /// Active players in turn order.
    pub fn players(self) -> [Occupant; 2] {
        match self {
            GameMode::AiVsAi => [Occupant::Quantum, Occupant::Rules],
            GameMode::HumanVsAi => [Occupant::Human, Occupant::Quantum],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::AiVsAi => "AI vs AI",
            GameMode::HumanVsAi => "Human vs AI",
        }
    }
}

/// Per-game configuration, frozen at construction.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub board_size: usize,
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            max_turns: MAX_TURNS,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Player(Occupant),
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player(p) => write!(f, "{} wins", p.name()),
            Winner::Draw => write!(f, "draw"),
        }
    }
}

/// Score sheet entry attached to move events.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerScore {
    pub player: Occupant,
    pub score: ScoreBreakdown,
}

/// One entry of the append-only game log.
///
/// A closed set of tagged variants, so consumers can match exhaustively
/// instead of probing for optional keys.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    Started {
        mode: GameMode,
    },
    MoveApplied {
        turn: u32,
        player: Occupant,
        coord: Coord,
        captured: Vec<Coord>,
        scores: [PlayerScore; 2],
        rationale: String,
    },
    Passed {
        turn: u32,
        player: Occupant,
        rationale: String,
    },
    SuicideRejected {
        turn: u32,
        player: Occupant,
        coord: Coord,
    },
    Ended {
        winner: Winner,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Started { mode } => write!(f, "game started: {}", mode.label()),
            GameEvent::MoveApplied {
                turn,
                player,
                coord,
                captured,
                rationale,
                ..
            } => {
                write!(f, "turn {turn}: {} plays ({}, {})", player.name(), coord.0, coord.1)?;
                if !captured.is_empty() {
                    write!(f, ", captures {}", captured.len())?;
                }
                write!(f, " - {rationale}")
            }
            GameEvent::Passed {
                turn,
                player,
                rationale,
            } => write!(f, "turn {turn}: {} passes - {rationale}", player.name()),
            GameEvent::SuicideRejected { turn, player, coord } => write!(
                f,
                "turn {turn}: {} move ({}, {}) rejected as suicide",
                player.name(),
                coord.0,
                coord.1
            ),
            GameEvent::Ended { winner } => write!(f, "game over: {winner}"),
        }
    }
}

/// State of one match.
pub struct GameState {
    board: Board,
    mode: GameMode,
    players: [Occupant; 2],
    current: usize,
    turn_count: u32,
    max_turns: u32,
    consecutive_passes: u32,
    game_over: bool,
    winner: Option<Winner>,
    log: Vec<GameEvent>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self::with_config(mode, GameConfig::default())
    }

    pub fn with_config(mode: GameMode, config: GameConfig) -> Self {
        Self {
            board: Board::new(config.board_size),
            mode,
            players: mode.players(),
            current: 0,
            turn_count: 0,
            max_turns: config.max_turns,
            consecutive_passes: 0,
            game_over: false,
            winner: None,
            log: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, bypassing the move rules. For position setup and
    /// diagnostics only.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn players(&self) -> [Occupant; 2] {
        self.players
    }

    pub fn current_player(&self) -> Occupant {
        self.players[self.current]
    }

    /// The active player who is not to move.
    pub fn opponent(&self) -> Occupant {
        self.players[(self.current + 1) % self.players.len()]
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Set once the game is over, `None` before.
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Rule-checked placement for `player`; resets the pass streak on success.
    ///
    /// Returns the captured coordinates. On any error the board and counters
    /// are unchanged and the caller may retry with a different coordinate.
    pub fn try_move(&mut self, coord: Coord, player: Occupant) -> Result<Vec<Coord>, MoveError> {
        let captured = self.board.try_place(coord, player)?;
        self.consecutive_passes = 0;
        Ok(captured)
    }

    /// Convenience wrapper over [`GameState::try_move`] for callers that do
    /// not need the capture report.
    pub fn apply_move(&mut self, coord: Coord, player: Occupant) -> bool {
        self.try_move(coord, player).is_ok()
    }

    /// Forfeit the move. Does not touch the board.
    pub fn pass_turn(&mut self) {
        self.consecutive_passes += 1;
    }

    pub fn legal_moves(&self) -> Vec<Coord> {
        self.board.legal_moves()
    }

    pub fn score_breakdown(&self, player: Occupant) -> ScoreBreakdown {
        self.board.score_breakdown(player)
    }

    /// Current score sheet for both active players, in turn order.
    pub fn scores(&self) -> [PlayerScore; 2] {
        self.players.map(|player| PlayerScore {
            player,
            score: self.board.score_breakdown(player),
        })
    }

    /// Rotate to the next player and count the turn.
    pub fn advance_turn(&mut self) {
        self.turn_count += 1;
        self.current = (self.current + 1) % self.players.len();
    }

    /// Terminal when the turn limit is reached, both players passed in a row,
    /// or no legal move remains. The winner is computed and frozen on first
    /// detection; later calls return `true` without recomputing.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        if self.turn_count >= self.max_turns
            || self.consecutive_passes >= PASS_LIMIT
            || self.board.legal_moves().is_empty()
        {
            self.game_over = true;
            self.winner = Some(self.decide_winner());
            return true;
        }
        false
    }

    fn decide_winner(&self) -> Winner {
        let [first, second] = self.players;
        let a = self.board.score_breakdown(first).total;
        let b = self.board.score_breakdown(second).total;
        if a > b {
            Winner::Player(first)
        } else if b > a {
            Winner::Player(second)
        } else {
            Winner::Draw
        }
    }

    /// Append to the game log.
    pub fn record(&mut self, event: GameEvent) {
        self.log.push(event);
    }

    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }
}
