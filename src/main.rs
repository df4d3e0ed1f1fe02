//! Maze Chase headless demo.
//!
//! Generates a maze, lets the autopilot walk the player toward the exit at a fixed
//! 60 Hz step and logs whether it escaped or was caught. Set `RUST_LOG=debug` to see
//! every pursuer replan.

use clap::Parser;
use log::{error, info, warn};
use maze_chase::config::{Difficulty, GameConfig};
use maze_chase::error::Result;
use maze_chase::game::player::{Autopilot, MoveIntent};
use maze_chase::game::{GameSession, SessionStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const TICK_SECONDS: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid columns (odd, at least 5)
    #[arg(long)]
    columns: Option<usize>,

    /// Grid rows (odd, at least 5)
    #[arg(long)]
    rows: Option<usize>,

    /// easy, normal or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for a reproducible maze
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value = "36000")]
    max_frames: u64,

    /// Sleep between ticks to run at wall-clock speed
    #[arg(long)]
    realtime: bool,

    /// Save the generated maze as a `.mz` file in this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    if let Err(err) = run(args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(config, &mut rng)?;

    if let Some(dir) = &args.save_dir {
        session.maze().save_to_file(dir)?;
    }

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    if let Err(err) = ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst)) {
        warn!("Could not install Ctrl-C handler: {err}");
    }

    let mut autopilot = Autopilot::plan(session.maze());
    if autopilot.is_none() {
        warn!("No route to the exit; the player will stand still");
    }

    let mut frames = 0;
    let mut status = SessionStatus::Playing;
    while status == SessionStatus::Playing && frames < args.max_frames {
        if !running.load(Ordering::SeqCst) {
            info!("Interrupted after {frames} ticks");
            break;
        }

        let center = session.player().center();
        let intent = autopilot
            .as_mut()
            .map_or(MoveIntent::IDLE, |pilot| pilot.steer(center));
        status = session.update(TICK_SECONDS, intent);
        frames += 1;

        if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(TICK_SECONDS));
        }
    }

    let pursuer = session.pursuer();
    info!(
        "Finished: {:?} after {frames} ticks ({:.2}s), pursuer {:?} with {} waypoints",
        status,
        session.elapsed(),
        pursuer.phase(),
        pursuer.path().len()
    );
    Ok(())
}
