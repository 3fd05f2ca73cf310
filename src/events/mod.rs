//! Event types and observers.
//!
//! Submodules:
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`sequence`] – emitted when an animation sequence runs out of repeats
pub mod gamestate;
pub mod sequence;
