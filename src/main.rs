//! Headless block-placement runner (default binary).
//!
//! Uses the file-backed store configured by `BLOCKFIT_DATA_DIR`, so high scores
//! and custom block sets persist between runs.

use std::io::Read;

use anyhow::{Context, Result};

use blockfit::cli::{autoplay, parse_args, rotation_table, Command, USAGE};
use blockfit::core::{parse_shape_blueprint, BlockSetRegistry, GameSession, SessionConfig};
use blockfit::store::{
    ActiveBlockSet, CustomSetStore, FileStore, HighScoreStore, StoreConfig,
};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    let config = StoreConfig::from_env();
    let store = FileStore::new(&config.data_dir);

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Sets => list_sets(store),
        Command::Blueprint { source } => show_blueprint(&source)?,
        Command::Scores => show_scores(store),
        Command::Autoplay(autoplay_config) => {
            let mut registry = BlockSetRegistry::new();
            CustomSetStore::new(store.clone()).sync_registry(&mut registry);

            let mut active = ActiveBlockSet::new(store.clone(), config.block_set_id.clone());
            let block_set_id = match autoplay_config.block_set_id {
                Some(id) => registry.resolve(&id).id.clone(),
                None => active.resolve(&registry),
            };
            active
                .set(&block_set_id)
                .context("saving active block set")?;

            let session_config = SessionConfig {
                seed: autoplay_config.seed,
                block_set_id,
                ..SessionConfig::default()
            };
            let mut session = GameSession::new(
                session_config,
                registry,
                Box::new(HighScoreStore::new(store)),
            );

            let report = autoplay(&mut session, autoplay_config.max_turns);
            if report.game_over {
                println!("[Session] game over after {} placements", report.turns);
            }

            let snap = session.snapshot();
            for row in snap.board_rows() {
                println!("{}", row);
            }
            println!();
            println!("block set:  {}", snap.block_set_id);
            println!("placements: {}", report.turns);
            println!("lines:      {}", report.lines);
            println!("score:      {}", snap.score);
            println!("best:       {} (overall {})", snap.high_score, snap.overall_high_score);
        }
    }
    Ok(())
}

fn list_sets(store: FileStore) {
    let mut registry = BlockSetRegistry::new();
    CustomSetStore::new(store).sync_registry(&mut registry);
    for set in registry.block_sets() {
        println!(
            "{:<24} {:<20} {:>3} variants  {}",
            set.id,
            set.name,
            set.shapes.len(),
            set.description
        );
    }
}

fn show_blueprint(source: &str) -> Result<()> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading blueprint from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {}", source))?
    };

    let parsed = parse_shape_blueprint(&text)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
    println!("{}", parsed.blueprint);
    println!();
    for line in rotation_table(&parsed.coordinates) {
        println!("{}", line);
    }
    Ok(())
}

fn show_scores(store: FileStore) {
    let snapshot = HighScoreStore::new(store).get_snapshot();
    println!("overall: {}", snapshot.overall);
    for (id, score) in &snapshot.per_set {
        println!("{:<24} {}", id, score);
    }
}
