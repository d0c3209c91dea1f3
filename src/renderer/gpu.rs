//! GPU buffer records
//!
//! Layouts mirror the shader's structured buffer and constant buffers, so they
//! can be uploaded with `bytemuck::cast_slice` as-is.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::consts::*;
use crate::sim::{Player, PrimitiveLayer};

/// One primitive in the shader's structured buffer (48 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPrimitive {
    /// `PrimitiveKind` code; 0 ends the list
    pub kind: u32,
    pub entity: u32,
    pub growth_sizes1: [f32; 3],
    pub growth_sizes2: [f32; 3],
    pub position: [f32; 2],
    pub sprite_index: [f32; 2],
}

/// Player constant buffer (padded to 64 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PlayerUniform {
    pub position: [f32; 2],
    pub debug: [f32; 2],
    pub radius: f32,
    pub growth_state: u32,
    pub growth_factor: f32,
    pub time: f32,
    /// Primitive highlighted by an editor, `OBJECT_NONE` when unused
    pub level_edit_object: u32,
    pub screen_fade: f32,
    pub scale: f32,
    pub maggots: u32,
    pub deaths: u32,
    pub _pad: [u32; 3],
}

impl PlayerUniform {
    pub fn new(player: &Player) -> Self {
        Self {
            position: player.position.to_array(),
            debug: player.debug.to_array(),
            radius: player.radius,
            growth_state: player.growth_state,
            growth_factor: player.growth_factor,
            time: player.time,
            level_edit_object: OBJECT_NONE,
            screen_fade: player.screen_fade,
            scale: player.scale,
            maggots: player.maggots,
            deaths: player.deaths,
            _pad: [0; 3],
        }
    }
}

/// Camera constant buffer (80 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// Row-major (transposed) model-view-projection for HLSL-style `mul(v, M)`
    pub model_view_projection: [[f32; 4]; 4],
    pub render_size: [f32; 2],
    pub _pad: [f32; 2],
}

impl CameraUniform {
    pub fn new(projection: Mat4) -> Self {
        Self {
            model_view_projection: projection.transpose().to_cols_array_2d(),
            render_size: [RENDER_WIDTH, RENDER_HEIGHT],
            _pad: [0.0; 2],
        }
    }
}

/// Pack a layer into a full buffer; slots past the live range stay zero (Invalid)
pub fn pack_layer(layer: &PrimitiveLayer) -> [GpuPrimitive; MAX_PRIMITIVES] {
    let mut out = [GpuPrimitive::zeroed(); MAX_PRIMITIVES];
    for ((_, p), slot) in layer.live().zip(out.iter_mut()) {
        *slot = GpuPrimitive {
            kind: p.kind.code(),
            entity: u32::try_from(p.entity).unwrap_or(OBJECT_NONE),
            growth_sizes1: p.growth_sizes1.to_array(),
            growth_sizes2: p.growth_sizes2.to_array(),
            position: p.position.to_array(),
            sprite_index: p.sprite_index.to_array(),
        };
    }
    out
}
