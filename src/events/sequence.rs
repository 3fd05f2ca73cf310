//! Sequence completion events.
//!
//! When a finite [`ActionSequence`](crate::components::actionsequence::ActionSequence)
//! on an entity's [`AnimationRegistry`](crate::components::animation::AnimationRegistry)
//! runs out of repeats, the
//! [`animation_sequence_system`](crate::systems::animation::animation_sequence_system)
//! triggers a [`SequenceFinishedEvent`]. Observers can use it to chain
//! timelines or change entity state.
//!
//! # Example
//!
//! ```ignore
//! commands.add_observer(|trigger: On<SequenceFinishedEvent>, mut q: Query<&mut AnimationRegistry>| {
//!     if trigger.sequence == "hit" {
//!         if let Ok(mut registry) = q.get_mut(trigger.entity) {
//!             let _ = registry.start("fly");
//!         }
//!     }
//! });
//! ```

use bevy_ecs::prelude::*;

/// Event emitted once when a named sequence becomes exhausted.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SequenceFinishedEvent {
    /// The entity owning the sequence.
    pub entity: Entity,
    /// Name the sequence is registered under.
    pub sequence: String,
}
