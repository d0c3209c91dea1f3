//! Growing Pains - SDF scene and collision core
//!
//! Core modules:
//! - `math`: Vector/matrix helpers and projection builders (on top of glam)
//! - `sim`: Deterministic simulation (entities, primitives, distance field, movement)
//! - `input`: Logical input queries consumed by the simulation
//! - `audio`: Sound requests and the bounded voice-pool mixer
//! - `renderer`: GPU-shaped records handed to an external renderer
//! - `level`: Level loading
//! - `settings`: Data-driven tuning

pub mod audio;
pub mod error;
pub mod input;
pub mod level;
pub mod math;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical render resolution the renderer letterboxes into the window
    pub const RENDER_WIDTH: f32 = 1600.0;
    pub const RENDER_HEIGHT: f32 = 900.0;

    /// Playable area; the player is clamped to `[0, LEVEL_WIDTH] x [0, LEVEL_HEIGHT]`
    pub const LEVEL_WIDTH: f32 = 1600.0;
    pub const LEVEL_HEIGHT: f32 = 900.0;

    /// Entity list capacity
    pub const MAX_ENTITIES: usize = 128;
    /// Slots per primitive layer (level and overlay)
    pub const MAX_PRIMITIVES: usize = 128;

    /// Running-minimum seed and "nothing found" distance
    pub const DISTANCE_NONE: f32 = 999_999.0;
    /// Object index the GPU side uses for "nothing found"
    pub const OBJECT_NONE: u32 = 0x00FF_FFFF;

    /// Smooth-min blend radius for circles and spiked circles
    pub const SMOOTH_MIN_BLEND: f32 = 10.0;
    /// Central-difference sample offset for surface normals (world units)
    pub const NORMAL_EPSILON: f32 = 10.0;
    /// Collision boxes are shrunk to this fraction of their visual extent
    pub const BOX_COLLISION_SCALE: f32 = 0.85;

    /// Clearance below which the player counts as touching a surface
    pub const CONTACT_THRESHOLD: f32 = 0.1;
    /// Fixed number of push-out passes per step
    pub const PUSH_ITERATIONS: u32 = 4;

    /// Number of discrete growth states on the growth cycle
    pub const GROWTH_STATES: u32 = 3;

    /// Deaths are displayed with two digits
    pub const MAX_DEATHS: u32 = 99;

    /// Default player radius used by the built-in levels
    pub const PLAYER_RADIUS: f32 = 25.0;
}

/// Wrap a value into `[0, 1)`.
///
/// Uses truncated remainder followed by a sign fix, and never returns exactly `1.0`
/// even when `1.0 + tiny_negative` rounds up.
#[inline]
pub fn wrap_unit(value: f32) -> f32 {
    let mut wrapped = value % 1.0;
    if wrapped < 0.0 {
        wrapped += 1.0;
    }
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
