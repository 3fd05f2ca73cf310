//! Timed actions, the building blocks of an
//! [`ActionSequence`](super::actionsequence::ActionSequence).
//!
//! An [`Action`] holds a target value for a fixed number of ticks. The value
//! is either applied at once ([`Interpolation::Immediate`]) or reached
//! gradually from the previous action's value along an [`Easing`] curve
//! ([`Interpolation::Eased`]).

use serde::{Deserialize, Serialize};

use crate::components::actionsequence::SequenceError;

/// Easing curves for eased actions.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// How an action's target value is reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Interpolation {
    /// The target applies as soon as the action becomes current.
    #[default]
    Immediate,
    /// The value moves from the previous action's target along a curve.
    Eased(Easing),
}

/// Payload an entity displays or applies while an action is current.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionTarget {
    /// A resource path, typically a sprite image.
    Path(String),
    Scalar(f32),
    Point { x: f32, y: f32 },
}

impl ActionTarget {
    pub fn path(path: impl Into<String>) -> Self {
        ActionTarget::Path(path.into())
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            ActionTarget::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Value between `self` and `to` at eased position `t`.
    ///
    /// Only numeric payloads of the same shape blend; anything else snaps to
    /// `to`.
    pub fn lerp(&self, to: &ActionTarget, t: f32) -> ActionTarget {
        match (self, to) {
            (ActionTarget::Scalar(a), ActionTarget::Scalar(b)) => {
                ActionTarget::Scalar(a + (b - a) * t)
            }
            (ActionTarget::Point { x: ax, y: ay }, ActionTarget::Point { x: bx, y: by }) => {
                ActionTarget::Point {
                    x: ax + (bx - ax) * t,
                    y: ay + (by - ay) * t,
                }
            }
            _ => to.clone(),
        }
    }
}

/// A target value held for `duration` ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub target_value: ActionTarget,
    duration: u32,
    pub interpolation: Interpolation,
}

impl Action {
    /// Create an immediate action. A zero duration is rejected.
    pub fn new(target_value: ActionTarget, duration: u32) -> Result<Self, SequenceError> {
        if duration == 0 {
            return Err(SequenceError::InvalidDuration { index: 0, duration });
        }
        Ok(Action {
            target_value,
            duration,
            interpolation: Interpolation::Immediate,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.interpolation = Interpolation::Eased(easing);
        self
    }

    /// Ticks this action stays current once started.
    pub fn duration(&self) -> u32 {
        self.duration
    }
}
