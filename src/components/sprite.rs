use bevy_ecs::prelude::Component;

use crate::components::action::ActionTarget;

/// What an entity currently shows, as last written by the animation runner.
/// Renderers read it and never write it.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub current: Option<ActionTarget>,
}

impl Sprite {
    pub fn new(initial: ActionTarget) -> Self {
        Sprite {
            current: Some(initial),
        }
    }

    /// Image path being shown, if the current value is a path.
    pub fn path(&self) -> Option<&str> {
        self.current.as_ref().and_then(ActionTarget::as_path)
    }
}
