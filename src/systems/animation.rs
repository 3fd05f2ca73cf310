//! Animation sequence runner.
//!
//! [`animation_sequence_system`] is the per-tick driver for every
//! [`AnimationRegistry`]: it advances each *active* sequence by one tick,
//! copies the displayed value onto the entity's [`Sprite`] (if it has one),
//! and triggers a [`SequenceFinishedEvent`] for each sequence that ran out
//! of repeats on this tick.
//!
//! # Animation Flow
//!
//! 1. Definitions live in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. At setup each entity gets its own sequences in an `AnimationRegistry`
//! 3. Something calls `run_animation_sequence(name)` to make one active
//! 4. This system ticks it; renderers read `Sprite`
//!
//! Idle and exhausted sequences are left alone, so a sequence replaced while
//! running simply stops being ticked.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::AnimationRegistry;
use crate::components::sprite::Sprite;
use crate::events::sequence::SequenceFinishedEvent;

/// Advance all active sequences one tick and update sprites.
pub fn animation_sequence_system(
    mut query: Query<(Entity, &mut AnimationRegistry, Option<&mut Sprite>)>,
    mut commands: Commands,
) {
    for (entity, mut registry, maybe_sprite) in query.iter_mut() {
        for sequence in registry.advance_active() {
            debug!("Sequence '{}' finished on {:?}", sequence, entity);
            commands.trigger(SequenceFinishedEvent { entity, sequence });
        }

        if let Some(mut sprite) = maybe_sprite {
            let shown = registry.displayed_value();
            if shown.is_some() && sprite.current != shown {
                sprite.current = shown;
            }
        }
    }
}
