use anyhow::{anyhow, Result};

use crate::core::rotation::describe_shape_rotations;
use crate::core::{GameSession, Placement};
use crate::types::CoordinatePair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub seed: u32,
    /// None means the stored active set
    pub block_set_id: Option<String>,
    pub max_turns: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            block_set_id: None,
            max_turns: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sets,
    /// Path to a blueprint file, or `-` for stdin
    Blueprint { source: String },
    Autoplay(AutoplayConfig),
    Scores,
    Help,
}

pub const USAGE: &str = "\
usage: blockfit <command>

commands:
  sets                                   list block sets
  blueprint <file|->                     parse a shape blueprint and show its rotations
  autoplay [--seed N] [--set ID] [--max-turns N]
                                         play a greedy headless game
  scores                                 show stored high scores";

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a String> {
    args.get(i)
        .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))
}

/// Parse arguments after the program name
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };

    match first.as_str() {
        "sets" => Ok(Command::Sets),
        "scores" => Ok(Command::Scores),
        "help" | "--help" | "-h" => Ok(Command::Help),
        "blueprint" => {
            let source = args
                .get(1)
                .ok_or_else(|| anyhow!("blueprint: missing <file|->"))?;
            Ok(Command::Blueprint {
                source: source.clone(),
            })
        }
        "autoplay" => {
            let mut config = AutoplayConfig::default();
            let mut i = 1usize;
            while i < args.len() {
                match args[i].as_str() {
                    "--seed" => {
                        i += 1;
                        let v = flag_value(args, i, "--seed")?;
                        config.seed = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("autoplay: invalid --seed value: {}", v))?;
                    }
                    "--set" => {
                        i += 1;
                        config.block_set_id = Some(flag_value(args, i, "--set")?.clone());
                    }
                    "--max-turns" => {
                        i += 1;
                        let v = flag_value(args, i, "--max-turns")?;
                        config.max_turns = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("autoplay: invalid --max-turns value: {}", v))?;
                    }
                    other => {
                        return Err(anyhow!("autoplay: unknown argument: {}", other));
                    }
                }
                i += 1;
            }
            Ok(Command::Autoplay(config))
        }
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoplayReport {
    pub turns: u32,
    pub score: u32,
    /// Rows plus columns cleared
    pub lines: u32,
    pub cleared_cells: u32,
    pub game_over: bool,
}

/// Greedy play: the first slot that fits anywhere goes to its first fitting anchor.
///
/// Stops at game over or after `max_turns` placements.
pub fn autoplay(session: &mut GameSession, max_turns: u32) -> AutoplayReport {
    let mut report = AutoplayReport::default();
    while report.turns < max_turns && !session.is_game_over() {
        let choice = (0..session.tray().len())
            .find_map(|slot| session.fit_positions(slot).first().map(|&a| (slot, a)));
        let Some((slot, anchor)) = choice else {
            break;
        };
        match session.attempt_placement(slot, anchor) {
            Placement::Placed(outcome) => {
                report.turns += 1;
                report.lines += (outcome.rows.len() + outcome.columns.len()) as u32;
                report.cleared_cells += outcome.cleared.len() as u32;
            }
            Placement::Rejected(_) => break,
        }
    }
    report.score = session.score();
    report.game_over = session.is_game_over();
    report
}

/// One block per angle: header line, then the rotated blueprint
pub fn rotation_table(points: &[CoordinatePair]) -> Vec<String> {
    let mut lines = Vec::new();
    for d in describe_shape_rotations(points) {
        let note = if d.is_duplicate_of_base {
            " (same as 0)"
        } else if d.is_redundant {
            " (repeat)"
        } else {
            ""
        };
        lines.push(format!("{:>3}{}  key={}", d.angle, note, d.key));
        for row in crate::core::shape_to_blueprint(&d.coordinates).lines() {
            lines.push(format!("     {}", row));
        }
    }
    lines
}
