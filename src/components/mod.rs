//! ECS components for entities.
//!
//! This module groups the component types and the per-entity animation
//! machinery that can be attached to entities in the game world.
//!
//! Submodules overview:
//! - [`action`] – a single timed step of a sequence and its interpolation
//! - [`actionsequence`] – tick-driven state machine over a list of actions
//! - [`animation`] – per-entity registry of named sequences and the `Animatable` capability
//! - [`avatar`] – the animated character and the sequence it starts with
//! - [`sprite`] – what an entity currently displays

pub mod action;
pub mod actionsequence;
pub mod animation;
pub mod avatar;
pub mod sprite;
