use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

/// Emit a [`GameStateChangedEvent`] when a transition has been requested.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_loading(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Loading)
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
