//! Tick systems.
//!
//! Submodules overview
//! - [`animation`] – advance active animation sequences and update sprites
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`gridfill`] – run one budgeted slice of the grid fill while loading
//! - [`render`] – report loading progress and displayed sprites to the log
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod gamestate;
pub mod gridfill;
pub mod render;
pub mod time;
