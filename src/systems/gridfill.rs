//! Load-phase grid fill system.
//!
//! While the game is [`Loading`](crate::resources::gamestate::GameStates::Loading),
//! [`grid_fill_system`] runs one budgeted slice of the
//! [`GridFillEngine`] per tick, using the producer resource `P` and the
//! [`FillClock`]. When the engine reports ready it requests the transition to
//! `Playing`.
//!
//! The system is generic so any cell type/producer pair can be loaded:
//!
//! ```ignore
//! update.add_systems(
//!     grid_fill_system::<FloorTile, TileRegistry>.run_if(state_is_loading),
//! );
//! ```

use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::gridfill::{CellProducer, GridFillEngine};
use crate::resources::workbudget::FillClock;

/// Fill one slice of the grid and hand over to play when complete.
pub fn grid_fill_system<T, P>(
    mut engine: ResMut<GridFillEngine<T>>,
    mut producer: ResMut<P>,
    clock: Res<FillClock>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) where
    T: Send + Sync + 'static,
    P: CellProducer<T> + Resource,
{
    if engine.is_ready() {
        next_state.set(GameStates::Playing);
        return;
    }

    let outcome = engine.fill(config.load_budget_ms, &*clock.0, &mut *producer);
    debug!(
        "Grid fill slice: {} cells, {:.1}% overall",
        outcome.cells_visited,
        engine.overall_fraction() * 100.0
    );

    if outcome.ready {
        next_state.set(GameStates::Playing);
    }
}
