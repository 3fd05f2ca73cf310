//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Count a tick and record how long the previous one took.
///
/// `dt` is the wall-clock length of the previous tick in seconds;
/// `overran` marks ticks that took longer than their slot.
pub fn update_world_time(world: &mut World, dt: f32, overran: bool) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.tick += 1;
    wt.elapsed += dt;
    wt.delta = dt;
    if overran {
        wt.missed_ticks += 1;
    }
}
