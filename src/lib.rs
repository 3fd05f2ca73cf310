//! Tickslice library.
//!
//! Tick-sliced work for a fixed-rate game loop: a grid that fills itself a
//! few milliseconds per tick, and animation sequences that advance one tick
//! at a time. Components, resources, systems and events are exposed for use
//! in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
