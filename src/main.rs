//! Tickslice demo entry point.
//!
//! A headless tick loop built on **bevy_ecs** that exercises the two
//! tick-sliced subsystems of the library:
//!
//! - a loading phase that fills a 2D floor grid a few milliseconds per tick
//!   (see [`tickslice::resources::gridfill`]) and reports a loading bar;
//! - a playing phase where the avatar runs its `"fly"` animation sequence
//!   (see [`tickslice::components::actionsequence`]).
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (or `--config`) and optional animation JSON
//! 2. Build the ECS world and enter `Setup`
//! 3. Every tick: update time, run the schedule, sleep out the rest of the
//!    tick slot
//! 4. Stop when the game reaches `Quitting` or `--ticks` have run
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --unthrottled
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn};

use tickslice::game;
use tickslice::resources::animationstore::AnimationStore;
use tickslice::resources::gameconfig::GameConfig;
use tickslice::resources::gamestate::{GameState, GameStates};
use tickslice::resources::workbudget::FillClock;
use tickslice::resources::worldtime::WorldTime;
use tickslice::systems::time::update_world_time;

/// Tickslice: budgeted grid loading and tick-driven animation sequences
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON list of extra animation definitions.
    #[arg(long, value_name = "PATH")]
    animations: Option<String>,

    /// Stop after this many ticks regardless of state.
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Run ticks back to back instead of pacing them to the target rate.
    #[arg(long)]
    unthrottled: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{} ({}); using defaults", e, cli.config.display());
    }

    let mut animations = AnimationStore::with_defaults();
    if let Some(path) = &cli.animations {
        if let Err(e) = animations.load_from_file(path) {
            error!("Failed to load animations from {}: {}", path, e);
            std::process::exit(1);
        }
    }

    let tick_slot = Duration::from_secs_f32(config.tick_seconds());
    let mut world = game::init_world(config, animations, FillClock::system());
    let mut update = game::build_schedule();

    game::begin(&mut world);

    // --------------- Main loop ---------------
    let mut last_tick = Instant::now();
    let mut overran = false;
    loop {
        let tick_start = Instant::now();
        let dt = tick_start.duration_since(last_tick).as_secs_f32();
        last_tick = tick_start;
        update_world_time(&mut world, dt, overran);

        update.run(&mut world);
        world.clear_trackers();

        if *world.resource::<GameState>().get() == GameStates::Quitting {
            break;
        }
        if let Some(limit) = cli.ticks {
            if world.resource::<WorldTime>().tick >= limit {
                info!("Tick limit {} reached", limit);
                break;
            }
        }

        let spent = tick_start.elapsed();
        overran = spent > tick_slot;
        if !cli.unthrottled && !overran {
            std::thread::sleep(tick_slot - spent);
        }
    }
}
