//! Quantum Go: a 5x5 Go variant engine with a circuit-sampling evaluator.
//!
//! Two autonomous agents (and optionally a human) play a simplified Go
//! variant with capture and suicide rules. Positions are scored on
//! territory, liberties, and connectivity; the stochastic agent classifies
//! the position by sampling a small probabilistic circuit before picking
//! its move heuristic.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, game limits, and evaluator weights
//! - [`board`] - Grid state, groups, liberties, captures, scoring
//! - [`game`] - Turn/termination state machine and the event log
//! - [`circuit`] - Statevector simulation of the decision circuit
//! - [`heuristic`] - Deterministic weighted-scan evaluator
//! - [`quantum`] - Stochastic feature-driven evaluator
//! - [`driver`] - Match loop tying the agents to one game
//!
//! ## Example
//!
//! ```
//! use quantum_go::circuit::CircuitSampler;
//! use quantum_go::constants::SHOTS;
//! use quantum_go::driver::MatchDriver;
//! use quantum_go::game::{GameConfig, GameMode};
//!
//! // Play a reproducible AI-vs-AI match
//! let sampler = CircuitSampler::with_seed(SHOTS, 7);
//! let mut driver = MatchDriver::new(GameMode::AiVsAi, GameConfig::default(), sampler);
//! let winner = driver.run().unwrap();
//! println!("{winner}");
//! ```

pub mod board;
pub mod circuit;
pub mod constants;
pub mod driver;
pub mod game;
pub mod heuristic;
pub mod quantum;
