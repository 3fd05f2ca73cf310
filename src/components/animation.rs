//! Named animation timelines per entity.
//!
//! An [`AnimationRegistry`] maps sequence names (`"fly"`, `"idle"`, ...) to
//! [`ActionSequence`]s. Any type that owns a registry gets the
//! [`Animatable`] capability by implementing two accessors; in the ECS world
//! an entity is animatable simply by carrying an `AnimationRegistry`
//! component, which the
//! [`animation_sequence_system`](crate::systems::animation::animation_sequence_system)
//! advances every tick.
//!
//! Timelines can also be described as data with [`BasicAnimationDef`] and
//! loaded from JSON:
//!
//! ```json
//! [
//!   { "name": "fly", "frames": [["dragon_1", 4], ["dragon_2", 4]], "repeat": "Forever" },
//!   { "name": "hit", "frames": [["dragon_hit", 6]], "repeat": { "Count": 2 } }
//! ]
//! ```

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::action::{Action, ActionTarget};
use crate::components::actionsequence::{ActionSequence, RepeatPolicy, SequenceError, SequenceStep};

/// Sprite image path for a short frame name, e.g. `dragon_1` becomes
/// `sprites/dragon_1.png`.
pub fn sprite_path(name: &str) -> String {
    format!("sprites/{}.png", name)
}

/// Named sequences owned by one entity.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationRegistry {
    sequences: FxHashMap<String, ActionSequence>,
    /// Most recently started sequence; its value is what the entity shows.
    displayed: Option<String>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the sequence stored under `name`.
    ///
    /// A replaced sequence is dropped, running or not; the new one starts Idle.
    pub fn register(&mut self, name: impl Into<String>, sequence: ActionSequence) {
        self.sequences.insert(name.into(), sequence);
    }

    /// Start (or restart) the named sequence.
    ///
    /// Unknown names fail with [`SequenceError::UnknownSequence`] and leave
    /// every sequence untouched.
    pub fn start(&mut self, name: &str) -> Result<(), SequenceError> {
        let sequence = self
            .sequences
            .get_mut(name)
            .ok_or_else(|| SequenceError::UnknownSequence(name.to_string()))?;
        sequence.start();
        self.displayed = Some(name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ActionSequence> {
        self.sequences.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActionSequence> {
        self.sequences.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    /// Name of the sequence the entity currently shows.
    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// Value the entity should show this tick, if anything was ever started.
    pub fn displayed_value(&self) -> Option<ActionTarget> {
        let name = self.displayed.as_deref()?;
        self.sequences.get(name).map(ActionSequence::interpolated_value)
    }

    /// Advance every active sequence by one tick.
    ///
    /// Returns the names of sequences that finished on this tick.
    pub fn advance_active(&mut self) -> Vec<String> {
        let mut finished = Vec::new();
        for (name, sequence) in self.sequences.iter_mut() {
            if sequence.advance_one_tick() == SequenceStep::Finished {
                finished.push(name.clone());
            }
        }
        finished
    }
}

/// Capability of owning named timelines and being told to start one.
pub trait Animatable {
    fn animation_registry(&self) -> &AnimationRegistry;
    fn animation_registry_mut(&mut self) -> &mut AnimationRegistry;

    fn register_animation_sequence(&mut self, name: impl Into<String>, sequence: ActionSequence)
    where
        Self: Sized,
    {
        self.animation_registry_mut().register(name, sequence);
    }

    /// Register a sequence of immediate sprite-path actions from
    /// `(frame_name, ticks_to_hold)` pairs.
    fn new_basic_animation(
        &mut self,
        name: impl Into<String>,
        frames: &[(&str, u32)],
        repeat: RepeatPolicy,
    ) -> Result<(), SequenceError>
    where
        Self: Sized,
    {
        let sequence = basic_sequence(frames.iter().map(|(f, d)| (*f, *d)), repeat)?;
        self.register_animation_sequence(name, sequence);
        Ok(())
    }

    fn run_animation_sequence(&mut self, name: &str) -> Result<(), SequenceError> {
        self.animation_registry_mut().start(name)
    }

    fn animation_sequence(&self, name: &str) -> Option<&ActionSequence> {
        self.animation_registry().get(name)
    }
}

impl Animatable for AnimationRegistry {
    fn animation_registry(&self) -> &AnimationRegistry {
        self
    }
    fn animation_registry_mut(&mut self) -> &mut AnimationRegistry {
        self
    }
}

fn basic_sequence<'a>(
    frames: impl Iterator<Item = (&'a str, u32)>,
    repeat: RepeatPolicy,
) -> Result<ActionSequence, SequenceError> {
    let actions = frames
        .enumerate()
        .map(|(index, (frame, duration))| {
            Action::new(ActionTarget::Path(sprite_path(frame)), duration)
                .map_err(|_| SequenceError::InvalidDuration { index, duration })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ActionSequence::new(actions, repeat)
}

/// Data form of [`Animatable::new_basic_animation`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BasicAnimationDef {
    pub name: String,
    pub frames: Vec<(String, u32)>,
    #[serde(default = "default_repeat")]
    pub repeat: RepeatPolicy,
}

fn default_repeat() -> RepeatPolicy {
    RepeatPolicy::Forever
}

impl BasicAnimationDef {
    pub fn to_sequence(&self) -> Result<ActionSequence, SequenceError> {
        basic_sequence(
            self.frames.iter().map(|(f, d)| (f.as_str(), *d)),
            self.repeat,
        )
    }

    /// Register this definition on anything animatable.
    pub fn register_on<A: Animatable>(&self, target: &mut A) -> Result<(), SequenceError> {
        let sequence = self.to_sequence()?;
        target.register_animation_sequence(self.name.clone(), sequence);
        Ok(())
    }

    /// Parse a JSON list of definitions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a JSON list of definitions from a file.
    pub fn load_from_file(path: &str) -> Result<Vec<Self>, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Ok(Self::list_from_json(&file_content)?)
    }
}
