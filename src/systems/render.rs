//! Headless presentation systems.
//!
//! No pixels are drawn; these systems play the renderer's part by reading
//! engine state and never writing it back:
//! - [`render_loading_system`] turns the grid fill fraction into a
//!   [`LoadingBar`] and logs each step.
//! - [`render_sprites_system`] logs sprites whose displayed value changed.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::avatar::Avatar;
use crate::components::sprite::Sprite;
use crate::resources::gridfill::GridFillEngine;
use crate::resources::loadingbar::LoadingBar;

/// Update the loading bar from the grid fill progress.
pub fn render_loading_system<T: Send + Sync + 'static>(
    engine: Res<GridFillEngine<T>>,
    mut bar: ResMut<LoadingBar>,
) {
    if bar.update(engine.overall_fraction()) && bar.percent % 10 == 0 {
        info!("Loading {}", bar.text);
    }
}

/// Report avatar frames as they change.
pub fn render_sprites_system(query: Query<(&Avatar, &Sprite), Changed<Sprite>>) {
    for (avatar, sprite) in query.iter() {
        if let Some(path) = sprite.path() {
            debug!("{} shows {}", avatar.name, path);
        } else if let Some(value) = &sprite.current {
            debug!("{} shows {:?}", avatar.name, value);
        }
    }
}
