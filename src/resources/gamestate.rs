//! High-level game state resources.
//!
//! The tick loop moves through `Setup -> Loading -> Playing -> Quitting`.
//! Systems request a change by writing [`NextGameState`]; see
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Build the world: grid engine, producer, avatar.
    Setup,
    /// The grid is being filled a slice per tick.
    Loading,
    /// Steady state: animations tick.
    Playing,
    Quitting,
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> &GameStates {
        &self.current
    }
    /// Update the current state immediately, skipping enter/exit hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next`; `check_pending_state` emits the event.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
