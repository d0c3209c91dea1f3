//! Renderer handoff
//!
//! The simulation never draws. Once per frame the host captures a
//! [`FrameSnapshot`] of GPU-shaped records and hands it to whatever
//! implements [`Renderer`].

pub mod gpu;
pub mod projection;

pub use gpu::{CameraUniform, GpuPrimitive, PlayerUniform, pack_layer};
pub use projection::image_projection;

use crate::Result;
use crate::consts::*;
use crate::sim::{Background, SimulationState};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    pub level: [GpuPrimitive; MAX_PRIMITIVES],
    pub overlay: [GpuPrimitive; MAX_PRIMITIVES],
    pub player: PlayerUniform,
    pub camera: CameraUniform,
    pub background: Background,
}

impl FrameSnapshot {
    /// Capture the state for a window of the given size
    pub fn capture(state: &SimulationState, window_width: f32, window_height: f32) -> Self {
        let projection = image_projection(window_width, window_height, RENDER_WIDTH, RENDER_HEIGHT);
        Self {
            level: pack_layer(&state.scene.level),
            overlay: pack_layer(&state.scene.overlay),
            player: PlayerUniform::new(&state.player),
            camera: CameraUniform::new(projection),
            background: state.background,
        }
    }

    /// Raw bytes of the level structured buffer
    pub fn level_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.level[..])
    }

    /// Raw bytes of the overlay structured buffer
    pub fn overlay_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.overlay[..])
    }

    pub fn player_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.player)
    }

    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera)
    }
}

/// Something that can present a frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()>;
}
