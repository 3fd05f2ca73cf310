//! Floor tile producer for the grid fill.
//!
//! [`TileRegistry`] manufactures a [`FloorTile`] for every cell of the
//! `"floor"` category: a white base sprite tinted by a colour wheel centred
//! on the grid. The hue comes from the angle around the centre and the
//! brightness fades with distance from it. Other categories produce nothing.

use std::f32::consts::PI;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::resources::gridfill::CellProducer;

pub const FLOOR_CATEGORY: &str = "floor";
pub const STUFF_CATEGORY: &str = "stuff";
const FLOOR_SPRITE: &str = "white_1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Convert HSV to RGB. `hue` in degrees, `saturation` and `value` in
/// percent (0..=100, clamped).
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (value / 100.0).clamp(0.0, 1.0);
    let h = hue.rem_euclid(360.0) / 60.0;

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: to_byte(r),
        g: to_byte(g),
        b: to_byte(b),
    }
}

/// One drawable floor cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorTile {
    pub name: String,
    pub sprite: String,
    pub color: Rgb,
}

/// Cell producer for the demo world.
#[derive(Resource, Debug, Clone)]
pub struct TileRegistry {
    width: u32,
    height: u32,
}

impl TileRegistry {
    pub fn new(width: u32, height: u32) -> Self {
        TileRegistry { width, height }
    }

    fn center(&self) -> (f32, f32) {
        ((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// 1.0 at the centre, 0.0 at half the grid width away, negative beyond.
    pub fn distance_from_center(&self, x: u32, y: u32) -> f32 {
        let (cx, cy) = self.center();
        let dist = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        let radius = (self.width / 2).max(1) as f32;
        1.0 - dist / radius
    }

    /// Hue in degrees of the angle from `(x, y)` to the centre.
    pub fn hue_at(&self, x: u32, y: u32) -> f32 {
        let (cx, cy) = self.center();
        let rads = (cy - y as f32).atan2(cx - x as f32);
        (rads + PI) / (2.0 * PI) * 360.0
    }

    pub fn floor_tile(&self, x: u32, y: u32) -> FloorTile {
        let color = hsv_to_rgb(
            self.hue_at(x, y),
            100.0,
            100.0 * self.distance_from_center(x, y),
        );
        FloorTile {
            name: format!("floor_{}_{}", x, y),
            sprite: FLOOR_SPRITE.to_string(),
            color,
        }
    }
}

impl CellProducer<FloorTile> for TileRegistry {
    fn produce(&mut self, category: &str, x: u32, y: u32) -> Option<FloorTile> {
        match category {
            FLOOR_CATEGORY => Some(self.floor_tile(x, y)),
            _ => None,
        }
    }
}
