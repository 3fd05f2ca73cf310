//! Loading indicator state.
//!
//! Written by [`render_loading_system`](crate::systems::render::render_loading_system)
//! from the grid fill's completion fraction; a real front end would draw it.

use bevy_ecs::prelude::Resource;

const BAR_WIDTH: usize = 20;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LoadingBar {
    /// Completion in whole percent, 0..=100.
    pub percent: u32,
    /// Text rendition, e.g. `[##########----------]  50%`.
    pub text: String,
}

impl LoadingBar {
    /// Redraw the bar for `fraction` (clamped to 0..=1).
    ///
    /// Returns true when the whole-percent value changed.
    pub fn update(&mut self, fraction: f32) -> bool {
        let fraction = fraction.clamp(0.0, 1.0);
        let percent = (fraction * 100.0).floor() as u32;
        if percent == self.percent && !self.text.is_empty() {
            return false;
        }
        let filled = (fraction * BAR_WIDTH as f32).floor() as usize;
        self.percent = percent;
        self.text = format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            percent
        );
        true
    }
}
