//! Implicit-shape primitives
//!
//! Two fixed-capacity layers are rebuilt from the entity list every step:
//! the level layer (collidable) and the overlay layer (decoration only).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PRIMITIVES;

/// Shape kind of a primitive
///
/// Discriminants are the codes the GPU shader switches on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PrimitiveKind {
    #[default]
    Invalid = 0,
    Circle = 1,
    SpikedCircle = 2,
    Box = 3,
    BoxTextured = 4,
    BoxText = 5,
    BoxFlower = 6,
    Portal = 7,
    Maggot = 8,
    Particles = 9,
}

impl PrimitiveKind {
    /// Shader code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Trigger shapes: tracked by the evaluator but never solid
    pub fn is_overlapping(self) -> bool {
        matches!(self, PrimitiveKind::Portal | PrimitiveKind::Maggot)
    }
}

/// One implicit shape instance
///
/// The meaning of the size channels depends on the kind: circles use
/// `growth_sizes1` as radius, boxes use `growth_sizes1`/`growth_sizes2` as
/// half-extents, particle and text boxes carry progress in `growth_sizes1.z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Index of the owning entity
    pub entity: usize,
    pub growth_sizes1: Vec3,
    pub growth_sizes2: Vec3,
    pub position: Vec2,
    pub sprite_index: Vec2,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind, entity: usize, position: Vec2, growth_sizes1: Vec3) -> Self {
        Self {
            kind,
            entity,
            growth_sizes1,
            position,
            ..Default::default()
        }
    }

    pub fn with_sizes2(mut self, growth_sizes2: Vec3) -> Self {
        self.growth_sizes2 = growth_sizes2;
        self
    }

    pub fn with_sprite(mut self, sprite_index: Vec2) -> Self {
        self.sprite_index = sprite_index;
        self
    }
}

/// Fixed-capacity primitive array
#[derive(Debug, Clone)]
pub struct PrimitiveLayer {
    primitives: Vec<Primitive>,
    capacity: usize,
}

impl Default for PrimitiveLayer {
    fn default() -> Self {
        Self::with_capacity(MAX_PRIMITIVES)
    }
}

impl PrimitiveLayer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Drop every primitive from the previous build
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Append a primitive. Returns `false` (and drops it) when the layer is full.
    pub fn push(&mut self, primitive: Primitive) -> bool {
        if self.primitives.len() >= self.capacity {
            log::warn!(
                "primitive layer full ({} slots), dropping {:?} of entity {}",
                self.capacity,
                primitive.kind,
                primitive.entity
            );
            return false;
        }
        self.primitives.push(primitive);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Primitives up to the first `Invalid` entry
    pub fn live(&self) -> impl Iterator<Item = (usize, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .take_while(|(_, p)| p.kind != PrimitiveKind::Invalid)
    }
}
