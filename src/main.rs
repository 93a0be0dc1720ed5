//! Quantum Go: a 5x5 Go variant with a circuit-sampling evaluator.
//!
//! ## Usage
//!
//! - `quantum-go selfplay` - Play a full AI-vs-AI match and print the log
//! - `quantum-go play` - Play against the stochastic engine on the terminal
//! - `quantum-go demo` - Show capture resolution and one sampled decision

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quantum_go::board::{Board, Occupant};
use quantum_go::circuit::CircuitSampler;
use quantum_go::constants::{BOARD_SIZE, SHOTS};
use quantum_go::driver::MatchDriver;
use quantum_go::game::{GameConfig, GameMode};
use quantum_go::quantum::QuantumAgent;

/// Quantum Go: simplified Go with a circuit-sampling evaluator
#[derive(Parser)]
#[command(name = "quantum-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full AI-vs-AI match and print the event log
    Selfplay {
        /// Seed for the circuit sampler (reproducible matches)
        #[arg(long)]
        seed: Option<u64>,
        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
        /// Override the turn limit
        #[arg(long)]
        turns: Option<u32>,
    },
    /// Play against the stochastic engine on the terminal
    Play {
        /// Seed for the circuit sampler
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a short scripted demo
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Selfplay { seed, json, turns }) => run_selfplay(seed, json, turns),
        Some(Commands::Play { seed }) => run_play(seed),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn sampler_for(seed: Option<u64>) -> CircuitSampler {
    match seed {
        Some(seed) => CircuitSampler::with_seed(SHOTS, seed),
        None => CircuitSampler::new(SHOTS),
    }
}

fn run_selfplay(seed: Option<u64>, json: bool, turns: Option<u32>) -> Result<()> {
    let mut config = GameConfig::default();
    if let Some(turns) = turns {
        config.max_turns = turns;
    }
    let mut driver = MatchDriver::new(GameMode::AiVsAi, config, sampler_for(seed));
    let winner = driver.run()?;

    if json {
        for event in driver.state().log() {
            println!("{}", serde_json::to_string(event)?);
        }
        return Ok(());
    }

    for event in driver.state().log() {
        println!("{event}");
    }
    println!("\n{}", driver.state().board());
    for entry in driver.state().scores() {
        let s = entry.score;
        println!(
            "{}: {} points (territory {} x2 + liberties {} + connectivity {} x3)",
            entry.player.name(),
            s.total,
            s.territory,
            s.liberties,
            s.connectivity
        );
    }
    println!("result: {winner}");
    Ok(())
}

fn run_play(seed: Option<u64>) -> Result<()> {
    let mut driver = MatchDriver::new(GameMode::HumanVsAi, GameConfig::default(), sampler_for(seed));
    driver.run_interactive()
}

fn run_demo() -> Result<()> {
    println!("Quantum Go: capture resolution and a sampled decision\n");

    let mut board = Board::new(BOARD_SIZE);
    board.set((2, 2), Occupant::Rules);
    board.set((1, 2), Occupant::Quantum);
    board.set((3, 2), Occupant::Quantum);
    board.set((2, 1), Occupant::Quantum);
    println!("{} stone at (2,2) in atari:\n{board}", Occupant::Rules.name());

    let captured = board.try_place((2, 3), Occupant::Quantum)?;
    println!("{} plays (2,3), captures {captured:?}:\n{board}", Occupant::Quantum.name());

    let mut agent = QuantumAgent::new(Occupant::Quantum, CircuitSampler::with_seed(SHOTS, 42));
    let decision = agent.choose_move(&board, Occupant::Rules)?;
    println!("features: {:?}", decision.features);
    println!(
        "outcome probabilities [p00 p01 p10 p11]: {:?}",
        decision.probabilities
    );
    println!("{}", decision.rationale);
    if let Some((row, col)) = decision.choice {
        println!("chosen move: ({row}, {col})");
    }
    Ok(())
}
