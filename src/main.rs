//! Street Runner headless entry point
//!
//! Drives the game with the autopilot, logs the HUD, and keeps the high
//! score file up to date. Rendering is left to real frontends.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use street_runner::consts::TICK_MS;
use street_runner::persistence::DEFAULT_HIGHSCORE_FILE;
use street_runner::sim::{GameEvent, GameMode};
use street_runner::{
    Autopilot, FileScoreStore, Game, LogPresenter, MemoryScoreStore, Presenter, ScoreStore, Tuning,
};

#[derive(Debug, Parser)]
#[command(name = "street-runner", about = "Run Street Runner headless with the autopilot")]
struct Args {
    /// Stop after this many simulation ticks
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,
    /// Stop after this many finished runs
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// High score file (plain decimal integer)
    #[arg(long, default_value = DEFAULT_HIGHSCORE_FILE)]
    highscore_file: PathBuf,
    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,
    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// World seed (0 = classic road)
    #[arg(long)]
    seed: Option<u32>,
    /// Autopilot RNG seed
    #[arg(long, default_value_t = 1)]
    bot_seed: u64,
    /// Chance per tick that the autopilot does nothing
    #[arg(long, default_value_t = 0.02)]
    hesitation: f64,
    /// Log the HUD every N ticks
    #[arg(long, default_value_t = 120)]
    hud_every: u64,
    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Print a JSON summary and final snapshot to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunResult {
    distance: u64,
    coins: u64,
    segment: i64,
}

#[derive(Debug, Serialize)]
struct Summary {
    ticks: u64,
    runs: Vec<RunResult>,
    high_score: u64,
    snapshot: street_runner::Snapshot,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if let Some(seed) = args.seed {
        tuning.world_seed = seed;
    }
    tuning.validate().context("invalid tuning")?;

    let summary = if args.no_persist {
        run(Game::new(tuning, MemoryScoreStore::default()), &args)
    } else {
        run(Game::new(tuning, FileScoreStore::new(&args.highscore_file)), &args)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn run<S: ScoreStore>(mut game: Game<S>, args: &Args) -> Summary {
    let mut bot = Autopilot::new(args.bot_seed, args.hesitation);
    let mut presenter = LogPresenter::new(args.hud_every);
    let mut runs = Vec::new();
    let mut ticks = 0;

    log::info!(
        "Starting: {} ticks max, {} run(s), high score {}",
        args.ticks,
        args.runs,
        game.state().high_score.best()
    );

    let tick_interval = Duration::from_millis(TICK_MS);
    let mut last = Instant::now();

    while ticks < args.ticks && (runs.len() as u32) < args.runs {
        game.queue(&bot.decide(game.state()));

        if args.realtime {
            std::thread::sleep(tick_interval);
            let now = Instant::now();
            ticks += u64::from(game.update((now - last).as_secs_f32()));
            last = now;
        } else {
            game.step();
            ticks += 1;
        }

        for event in game.take_events() {
            if let GameEvent::ModeChanged {
                to: GameMode::GameOver,
                ..
            } = event
            {
                let state = game.state();
                runs.push(RunResult {
                    distance: state.distance,
                    coins: state.coin_score,
                    segment: state.segment,
                });
            }
        }

        presenter.present(&game.snapshot());
    }

    let high_score = game.state().high_score.best();
    log::info!(
        "Finished after {ticks} ticks: {} run(s), high score {high_score}",
        runs.len()
    );

    Summary {
        ticks,
        runs,
        high_score,
        snapshot: game.snapshot(),
    }
}
