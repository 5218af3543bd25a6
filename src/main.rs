//! Headless match-three simulator (default binary).
//!
//! Plays one level with an automated policy and prints the outcome.
//! Settings come from `MATCH3_*` environment variables; see [`config`].

mod config;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use match_three::core::{Chain, LevelDefinition, LevelSnapshot, SimpleRng};
use match_three::engine::{policy_from_str, Session, SessionStatus, TurnReport};
use match_three::types::{DEFAULT_COLUMNS, DEFAULT_ROWS};

use config::SimConfig;

/// One line of the JSON-lines turn log
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LogRecord<'a> {
    Start {
        seed: u32,
        policy: &'a str,
        target_score: u32,
        maximum_moves: u32,
        board: &'a LevelSnapshot,
    },
    Turn {
        turn: u32,
        /// `[[column, row], [column, row]]`, absent for a shuffle
        swap: Option<[(usize, usize); 2]>,
        chains: Vec<&'a Chain>,
        cascades: usize,
        gained: u32,
        score: u32,
        moves_left: u32,
        reshuffled: bool,
        status: SessionStatus,
    },
}

struct TurnLog {
    out: BufWriter<File>,
}

impl TurnLog {
    fn create(path: &str) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("open turn log {}", path))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    fn write(&mut self, record: &LogRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let config = SimConfig::from_env();

    let definition = LevelDefinition::full(
        DEFAULT_COLUMNS,
        DEFAULT_ROWS,
        config.target_score,
        config.maximum_moves,
    )
    .and_then(|d| d.with_symbol_count(config.symbol_count))
    .context("invalid level settings")?;

    let mut policy = policy_from_str::<SimpleRng>(&config.policy)
        .ok_or_else(|| anyhow!("unknown policy: {}", config.policy))?;

    let mut session = Session::new(&definition, SimpleRng::new(config.seed))
        .context("could not deal a playable board")?;

    let mut log = match config.log_path.as_deref() {
        Some(path) => Some(TurnLog::create(path)?),
        None => None,
    };

    if !config.quiet {
        println!(
            "[Sim] seed={} policy={} target={} moves={} symbols={}",
            config.seed,
            policy.name(),
            config.target_score,
            config.maximum_moves,
            config.symbol_count
        );
    }

    if let Some(log) = log.as_mut() {
        let board = session.level().snapshot();
        log.write(&LogRecord::Start {
            seed: config.seed,
            policy: policy.name(),
            target_score: config.target_score,
            maximum_moves: config.maximum_moves,
            board: &board,
        })?;
    }

    while !session.status().is_finished() {
        let report = match policy.choose(session.level()) {
            Some(swap) => session.play_swap(&swap),
            None => session.shuffle(),
        }
        .with_context(|| format!("turn {} failed", session.turns() + 1))?;

        if !config.quiet {
            print_turn(session.turns(), &report);
        }
        if let Some(log) = log.as_mut() {
            log.write(&turn_record(session.turns(), &report))?;
        }
    }

    if let Some(log) = log {
        log.finish()?;
    }

    if !config.quiet {
        println!("{}", session.level().snapshot());
    }
    println!(
        "[Sim] {} with score {}/{} after {} turns",
        session.status().as_str(),
        session.score(),
        session.target_score(),
        session.turns()
    );

    Ok(())
}

fn print_turn(turn: u32, report: &TurnReport) {
    let Some(swap) = report.swap else {
        println!("[Sim] turn {:>2}: shuffle moves_left={}", turn, report.moves_left);
        return;
    };

    let chains: Vec<String> = report
        .resolution
        .chains()
        .map(|c| format!("{}:{}", c.kind().as_str(), c.len()))
        .collect();
    let cells = format!(
        "({},{})<->({},{})",
        swap.a.column, swap.a.row, swap.b.column, swap.b.row
    );
    println!(
        "[Sim] turn {:>2}: swap {} chains=[{}] cascades={} +{} score={} moves_left={}",
        turn,
        cells,
        chains.join(","),
        report.resolution.steps.len(),
        report.resolution.score,
        report.score,
        report.moves_left
    );
    if report.reshuffled.is_some() {
        println!("[Sim] no swaps left, board reshuffled");
    }
}

fn turn_record(turn: u32, report: &TurnReport) -> LogRecord<'_> {
    LogRecord::Turn {
        turn,
        swap: report.swap.map(|s| [s.a.position(), s.b.position()]),
        chains: report.resolution.chains().collect(),
        cascades: report.resolution.steps.len(),
        gained: report.resolution.score,
        score: report.score,
        moves_left: report.moves_left,
        reshuffled: report.reshuffled.is_some(),
        status: report.status,
    }
}
