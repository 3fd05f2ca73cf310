//! The player-visible avatar.
//!
//! An avatar is an entity carrying [`Avatar`], an
//! [`AnimationRegistry`](super::animation::AnimationRegistry) and a
//! [`Sprite`](super::sprite::Sprite). When play starts it runs the sequence
//! named in [`Avatar::startup_sequence`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Avatar {
    pub name: String,
    /// Sequence started on entering play, e.g. `"fly"`.
    pub startup_sequence: String,
}

impl Avatar {
    pub fn new(name: impl Into<String>, startup_sequence: impl Into<String>) -> Self {
        Avatar {
            name: name.into(),
            startup_sequence: startup_sequence.into(),
        }
    }
}
