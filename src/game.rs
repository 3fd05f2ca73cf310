//! World construction, state hooks and the per-tick schedule.
//!
//! The flow mirrors a scene that must load before it can play:
//!
//! 1. [`init_world`] inserts the core resources and registers the hooks.
//! 2. `Setup` runs [`setup`]: creates the grid fill engine for the `"floor"`
//!    and `"stuff"` categories, the [`TileRegistry`] producer, and the
//!    avatar entity, then requests `Loading`.
//! 3. `Loading` runs [`grid_fill_system`] once per tick until the grid is
//!    ready, which requests `Playing`.
//! 4. Entering `Playing` runs [`enter_play`], starting each avatar's
//!    startup sequence; [`update`] counts play ticks and eventually
//!    requests `Quitting`.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::{Animatable, AnimationRegistry};
use crate::components::avatar::Avatar;
use crate::components::sprite::Sprite;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::gridfill::GridFillEngine;
use crate::resources::loadingbar::LoadingBar;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::tileregistry::{FLOOR_CATEGORY, FloorTile, STUFF_CATEGORY, TileRegistry};
use crate::resources::workbudget::FillClock;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_sequence_system;
use crate::systems::gamestate::{check_pending_state, state_is_loading, state_is_playing};
use crate::systems::gridfill::grid_fill_system;
use crate::systems::render::{render_loading_system, render_sprites_system};

/// Ticks spent in the Playing state so far.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayTicks(pub u64);

/// Build a world ready to enter `Setup`.
///
/// The clock is injected so tests can drive the load budget by hand.
pub fn init_world(config: GameConfig, animations: AnimationStore, clock: FillClock) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(LoadingBar::default());
    world.insert_resource(PlayTicks::default());
    world.insert_resource(config);
    world.insert_resource(animations);
    world.insert_resource(clock);

    let mut systems_store = SystemsStore::new();
    systems_store.insert("setup", world.register_system(setup));
    systems_store.insert("enter_play", world.register_system(enter_play));
    systems_store.insert("quit_game", world.register_system(quit_game));
    world.insert_resource(systems_store);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.flush();
    world
}

/// Request `Setup` and apply it immediately.
pub fn begin(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

/// The systems run once per tick.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        grid_fill_system::<FloorTile, TileRegistry>
            .run_if(state_is_loading)
            .run_if(resource_exists::<GridFillEngine<FloorTile>>),
    );
    schedule.add_systems(
        render_loading_system::<FloorTile>
            .run_if(state_is_loading)
            .run_if(resource_exists::<GridFillEngine<FloorTile>>)
            .after(grid_fill_system::<FloorTile, TileRegistry>),
    );
    schedule.add_systems(animation_sequence_system.run_if(state_is_playing));
    schedule.add_systems(render_sprites_system.after(animation_sequence_system));
    schedule.add_systems(update.run_if(state_is_playing).after(animation_sequence_system));
    schedule.add_systems(
        check_pending_state
            .after(grid_fill_system::<FloorTile, TileRegistry>)
            .after(update),
    );
    schedule
}

/// Create the grid engine, the producer and the avatar.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    animations: Res<AnimationStore>,
    mut next_state: ResMut<NextGameState>,
) {
    info!(
        "Setting up world: {}x{} grid ({} cells per category)",
        config.grid_width,
        config.grid_height,
        config.grid_width as u64 * config.grid_height as u64
    );

    commands.insert_resource(
        GridFillEngine::<FloorTile>::new(config.grid_width, config.grid_height)
            .with_category(FLOOR_CATEGORY)
            .with_empty_category(STUFF_CATEGORY),
    );
    commands.insert_resource(TileRegistry::new(config.grid_width, config.grid_height));

    let mut registry = AnimationRegistry::new();
    if let Err(e) = animations.register_all(&mut registry) {
        error!("Invalid animation definition for avatar: {}", e);
    }
    let resting = registry
        .get(&config.avatar_sequence)
        .map(|s| s.current_value().clone());
    commands.spawn((
        Avatar::new("dragon", config.avatar_sequence.clone()),
        registry,
        Sprite {
            current: resting,
        },
    ));

    next_state.set(GameStates::Loading);
}

/// Start every avatar's startup sequence.
pub fn enter_play(mut query: Query<(&Avatar, &mut AnimationRegistry)>) {
    for (avatar, mut registry) in query.iter_mut() {
        match registry.run_animation_sequence(&avatar.startup_sequence) {
            Ok(()) => info!("{} runs '{}'", avatar.name, avatar.startup_sequence),
            Err(e) => error!("{} cannot start its animation: {}", avatar.name, e),
        }
    }
}

/// Count play ticks and quit once the configured number has run.
pub fn update(
    mut play_ticks: ResMut<PlayTicks>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    play_ticks.0 += 1;
    if config.play_ticks > 0 && play_ticks.0 >= config.play_ticks {
        next_state.set(GameStates::Quitting);
    }
}

pub fn quit_game(time: Res<WorldTime>, play_ticks: Res<PlayTicks>) {
    info!(
        "Quitting after {} ticks ({} playing, {} missed)",
        time.tick, play_ticks.0, time.missed_ticks
    );
}
