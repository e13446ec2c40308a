use bevy::prelude::*;

/// Field population (fixed for the process lifetime)
pub const PARTICLE_COUNT: usize = 100;

/// Pairs closer than this (px) get a connective line
pub const CONNECTION_DISTANCE: f32 = 150.0;

/// Per-axis drift: v = (random01 - 0.5) * VELOCITY_SPREAD, px per frame
pub const VELOCITY_SPREAD: f32 = 0.5;

/// Disc radius: r = random01 * RADIUS_SPAN + RADIUS_MIN, so uniform in [1, 3) px
pub const RADIUS_MIN: f32 = 1.0;
pub const RADIUS_SPAN: f32 = 2.0;

/// Fixed hue for discs and lines, sRGB (0, 217, 255)
pub const FIELD_COLOR: Color = Color::srgb(0.0, 217.0 / 255.0, 1.0);

/// Disc fill opacity
pub const PARTICLE_ALPHA: f32 = 0.8;

/// Line opacity at distance 0; fades linearly to 0 at CONNECTION_DISTANCE
pub const LINE_ALPHA_MAX: f32 = 0.3;

/// z layers: the line mesh sits under the discs
pub const LINE_Z: f32 = 0.0;
pub const PARTICLE_Z: f32 = 1.0;
