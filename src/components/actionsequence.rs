//! Tick-driven action sequences.
//!
//! An [`ActionSequence`] walks an ordered list of [`Action`]s, holding each
//! one for its duration in ticks, and repeats according to a
//! [`RepeatPolicy`]. All resume state (`cursor`, `ticks_held`, remaining
//! repeats) lives on the struct, so a sequence is advanced by calling
//! [`ActionSequence::advance_one_tick`] once per tick instead of running a
//! loop of its own.
//!
//! # States
//!
//! ```text
//!   Idle --start--> Active --last action of final repeat--> Exhausted
//!                     ^                                        |
//!                     +-----------------start------------------+
//! ```
//!
//! `start` may also be called while Active; it restarts from the first
//! action.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::components::action::{Action, ActionTarget, Interpolation, ease};

/// Errors raised when building or starting sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// `start` was asked for a name that was never registered.
    #[error("no animation sequence named '{0}' registered")]
    UnknownSequence(String),
    #[error("an action sequence needs at least one action")]
    EmptySequence,
    #[error("action {index} has invalid duration {duration}; durations must be at least one tick")]
    InvalidDuration { index: usize, duration: u32 },
    #[error("a counted repeat policy needs a count of at least one")]
    InvalidRepeatCount,
}

/// What a sequence does after its last action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RepeatPolicy {
    /// Play through once.
    Once,
    /// Play through `n` times.
    Count(u32),
    /// Loop until restarted or replaced.
    Forever,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Never started.
    #[default]
    Idle,
    /// The current action is counting down.
    Active,
    /// A finite repeat policy ran out.
    Exhausted,
}

/// What a single [`ActionSequence::advance_one_tick`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceStep {
    /// The sequence is not active; nothing changed.
    Inactive,
    /// The current action is still being held.
    Held,
    /// Moved to the next action.
    Advanced,
    /// Wrapped back to the first action for another repeat.
    Looped,
    /// The final repeat ended; the sequence is now exhausted.
    Finished,
}

/// Hook invoked once when a finite sequence becomes exhausted.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ActionSequence {
    actions: Vec<Action>,
    repeat_policy: RepeatPolicy,
    cursor: usize,
    ticks_held: u32,
    repeats_left: u32,
    /// Set once the sequence has wrapped back to its first action.
    wrapped: bool,
    state: SequenceState,
    on_complete: Option<CompletionCallback>,
}

impl ActionSequence {
    /// Build a sequence, rejecting empty action lists, zero durations and
    /// `Count(0)`.
    pub fn new(actions: Vec<Action>, repeat_policy: RepeatPolicy) -> Result<Self, SequenceError> {
        if actions.is_empty() {
            return Err(SequenceError::EmptySequence);
        }
        if let Some((index, action)) = actions
            .iter()
            .enumerate()
            .find(|(_, a)| a.duration() == 0)
        {
            return Err(SequenceError::InvalidDuration {
                index,
                duration: action.duration(),
            });
        }
        if repeat_policy == RepeatPolicy::Count(0) {
            return Err(SequenceError::InvalidRepeatCount);
        }
        Ok(ActionSequence {
            actions,
            repeat_policy,
            cursor: 0,
            ticks_held: 0,
            repeats_left: Self::initial_repeats(repeat_policy),
            wrapped: false,
            state: SequenceState::Idle,
            on_complete: None,
        })
    }

    /// Attach a callback run when the sequence finishes (builder pattern).
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    fn initial_repeats(policy: RepeatPolicy) -> u32 {
        match policy {
            RepeatPolicy::Count(n) => n,
            RepeatPolicy::Once | RepeatPolicy::Forever => 1,
        }
    }

    /// Begin (or restart) playback from the first action.
    pub fn start(&mut self) {
        self.cursor = 0;
        self.ticks_held = 0;
        self.repeats_left = Self::initial_repeats(self.repeat_policy);
        self.wrapped = false;
        self.state = SequenceState::Active;
    }

    /// Count one tick against the current action and cross the action
    /// boundary when its duration is reached.
    pub fn advance_one_tick(&mut self) -> SequenceStep {
        if self.state != SequenceState::Active {
            return SequenceStep::Inactive;
        }

        self.ticks_held += 1;
        if self.ticks_held < self.actions[self.cursor].duration() {
            return SequenceStep::Held;
        }

        let next_cursor = (self.cursor + 1) % self.actions.len();
        if next_cursor != 0 {
            self.cursor = next_cursor;
            self.ticks_held = 0;
            return SequenceStep::Advanced;
        }

        match self.repeat_policy {
            RepeatPolicy::Forever => {
                self.cursor = 0;
                self.ticks_held = 0;
                self.wrapped = true;
                SequenceStep::Looped
            }
            RepeatPolicy::Count(_) => {
                self.repeats_left = self.repeats_left.saturating_sub(1);
                if self.repeats_left > 0 {
                    self.cursor = 0;
                    self.ticks_held = 0;
                    self.wrapped = true;
                    SequenceStep::Looped
                } else {
                    self.finish()
                }
            }
            RepeatPolicy::Once => self.finish(),
        }
    }

    fn finish(&mut self) -> SequenceStep {
        self.state = SequenceState::Exhausted;
        if let Some(callback) = &self.on_complete {
            callback();
        }
        SequenceStep::Finished
    }

    /// Target value of the current action. Idle sequences rest on the first.
    pub fn current_value(&self) -> &ActionTarget {
        &self.actions[self.cursor].target_value
    }

    /// Value to display this tick, blending eased actions from the previous
    /// action's target.
    ///
    /// The first action blends from the last one only after the sequence has
    /// wrapped; on the first pass it has nothing to blend from and shows its
    /// own target.
    pub fn interpolated_value(&self) -> ActionTarget {
        let action = self.current_action();
        match action.interpolation {
            Interpolation::Immediate => action.target_value.clone(),
            Interpolation::Eased(_) if self.cursor == 0 && !self.wrapped => {
                action.target_value.clone()
            }
            Interpolation::Eased(easing) => {
                let previous = if self.cursor == 0 {
                    self.actions.len() - 1
                } else {
                    self.cursor - 1
                };
                let t = ease(easing, self.ticks_held as f32 / action.duration() as f32);
                self.actions[previous].target_value.lerp(&action.target_value, t)
            }
        }
    }

    pub fn current_action(&self) -> &Action {
        &self.actions[self.cursor]
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn repeat_policy(&self) -> RepeatPolicy {
        self.repeat_policy
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ticks_held(&self) -> u32 {
        self.ticks_held
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SequenceState::Active
    }
}

impl fmt::Debug for ActionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSequence")
            .field("actions", &self.actions)
            .field("repeat_policy", &self.repeat_policy)
            .field("cursor", &self.cursor)
            .field("ticks_held", &self.ticks_held)
            .field("repeats_left", &self.repeats_left)
            .field("wrapped", &self.wrapped)
            .field("state", &self.state)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
